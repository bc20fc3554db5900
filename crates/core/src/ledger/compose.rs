//! Default entry composition for supplier and customer invoices.
//!
//! Given the amounts of an invoice, the composer proposes the conventional
//! lines a bookkeeper would enter: cost (or revenue), VAT, and settlement.
//! The user may edit them before posting; nothing here is final.

use bokforing_shared::AccountDefaults;
use bokforing_shared::types::{AccountCode, round_amount};
use rust_decimal::Decimal;

use super::bank::compose_bank_entries;
use super::entry::{EntryType, LedgerLine};
use super::types::{FlowDirection, TransactionContext};
use crate::vat::{VatRate, split_vat};

/// Composes default voucher lines from transaction data.
#[derive(Debug, Clone, Default)]
pub struct EntryComposer {
    accounts: AccountDefaults,
}

impl EntryComposer {
    /// Creates a composer with the given fallback and settlement accounts.
    #[must_use]
    pub fn new(accounts: AccountDefaults) -> Self {
        Self { accounts }
    }

    /// Returns the accounts this composer falls back to.
    #[must_use]
    pub fn accounts(&self) -> &AccountDefaults {
        &self.accounts
    }

    /// Proposes the default lines for an invoice.
    ///
    /// Standard case, for a purchase (a sale mirrors every side):
    /// 1. cost line, debit, `net` (or `gross - tax` when net is missing)
    /// 2. VAT line, debit, `tax`, on the input VAT account for the rate
    /// 3. settlement line, credit, `gross`, on accounts payable
    ///
    /// With reverse charge, four lines are produced instead: cost debit
    /// `gross`, input VAT debit `tax`, payable credit `gross`, output VAT
    /// credit `tax`.
    ///
    /// When only the gross amount and an explicit rate are known, net and
    /// tax are derived by splitting the gross.
    ///
    /// Lines whose amount is zero or negative are omitted, so incomplete
    /// input may yield fewer than two lines.
    #[must_use]
    pub fn compose(&self, ctx: &TransactionContext) -> Vec<LedgerLine> {
        let gross = round_amount(ctx.gross);
        let mut net = round_amount(ctx.net);
        let mut tax = round_amount(ctx.tax);

        if net.is_zero()
            && tax.is_zero()
            && !ctx.reverse_charge
            && let Some(split) = ctx
                .vat_rate
                .and_then(|rate| split_vat(gross, rate, ctx.direction).ok())
        {
            net = split.base_amount;
            tax = split.vat_amount;
        }

        let rate = ctx
            .vat_rate
            .or_else(|| VatRate::infer(net, tax))
            .unwrap_or_default();

        if ctx.reverse_charge {
            return self.compose_reverse_charge(ctx, gross, tax, rate);
        }

        let (cost_side, cost, settlement) = match ctx.direction {
            FlowDirection::Incoming => (
                EntryType::Debit,
                cost_account(ctx, &self.accounts.purchase_fallback),
                self.accounts.payable.clone(),
            ),
            FlowDirection::Outgoing => (
                EntryType::Credit,
                cost_account(ctx, &self.accounts.sale_fallback),
                self.accounts.sale_settlement.clone(),
            ),
        };
        let cost_amount = if net > Decimal::ZERO {
            net
        } else {
            gross.checked_sub(tax).unwrap_or(Decimal::ZERO)
        };

        let mut lines = Vec::with_capacity(3);
        push_line(&mut lines, cost, cost_side, cost_amount);
        push_line(&mut lines, rate.account(ctx.direction), cost_side, tax);
        push_line(&mut lines, settlement, cost_side.opposite(), gross);
        lines
    }

    /// Proposes the two lines for a bank transaction against `contra`.
    ///
    /// See [`compose_bank_entries`].
    #[must_use]
    pub fn compose_bank(&self, amount: Decimal, contra: &AccountCode) -> Vec<LedgerLine> {
        compose_bank_entries(amount, &self.accounts.bank, contra)
    }

    fn compose_reverse_charge(
        &self,
        ctx: &TransactionContext,
        gross: Decimal,
        tax: Decimal,
        rate: VatRate,
    ) -> Vec<LedgerLine> {
        let cost = cost_account(ctx, &self.accounts.purchase_fallback);

        let mut lines = Vec::with_capacity(4);
        push_line(&mut lines, cost, EntryType::Debit, gross);
        push_line(&mut lines, rate.input_account(), EntryType::Debit, tax);
        push_line(
            &mut lines,
            self.accounts.payable.clone(),
            EntryType::Credit,
            gross,
        );
        push_line(&mut lines, rate.output_account(), EntryType::Credit, tax);
        lines
    }
}

/// Composes default lines with the standard BAS accounts.
#[must_use]
pub fn compose_default_entries(ctx: &TransactionContext) -> Vec<LedgerLine> {
    EntryComposer::default().compose(ctx)
}

fn cost_account(ctx: &TransactionContext, fallback: &AccountCode) -> AccountCode {
    ctx.suggested_account
        .clone()
        .unwrap_or_else(|| fallback.clone())
}

fn push_line(lines: &mut Vec<LedgerLine>, account: AccountCode, side: EntryType, amount: Decimal) {
    if amount > Decimal::ZERO {
        lines.push(LedgerLine::new(account, side, amount));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::validate;
    use rust_decimal_macros::dec;

    fn konto(code: &'static str) -> AccountCode {
        AccountCode::from_static(code)
    }

    fn debit(code: &'static str, amount: Decimal) -> LedgerLine {
        LedgerLine::debit(konto(code), amount)
    }

    fn credit(code: &'static str, amount: Decimal) -> LedgerLine {
        LedgerLine::credit(konto(code), amount)
    }

    #[test]
    fn test_purchase_three_lines() {
        let ctx = TransactionContext::purchase(dec!(1250), dec!(1000), dec!(250))
            .with_account(konto("4010"));
        let lines = compose_default_entries(&ctx);
        assert_eq!(
            lines,
            vec![
                debit("4010", dec!(1000)),
                debit("2641", dec!(250)),
                credit("2440", dec!(1250)),
            ]
        );
        assert!(validate(&lines).balanced);
    }

    #[test]
    fn test_reverse_charge_four_lines() {
        let ctx = TransactionContext::purchase(dec!(1000), Decimal::ZERO, dec!(250))
            .with_account(konto("5410"))
            .with_reverse_charge();
        let lines = compose_default_entries(&ctx);
        assert_eq!(
            lines,
            vec![
                debit("5410", dec!(1000)),
                debit("2641", dec!(250)),
                credit("2440", dec!(1000)),
                credit("2611", dec!(250)),
            ]
        );
        assert!(validate(&lines).balanced);
    }

    #[test]
    fn test_reverse_charge_uses_rate_tier() {
        let ctx = TransactionContext::purchase(dec!(1000), dec!(1000), dec!(120))
            .with_reverse_charge();
        let lines = compose_default_entries(&ctx);
        assert_eq!(lines[0], debit("4010", dec!(1000)));
        assert_eq!(lines[1], debit("2642", dec!(120)));
        assert_eq!(lines[3], credit("2612", dec!(120)));
    }

    #[test]
    fn test_missing_net_uses_gross_minus_tax() {
        let ctx = TransactionContext::purchase(dec!(1250), Decimal::ZERO, dec!(250));
        let lines = compose_default_entries(&ctx);
        assert_eq!(lines[0], debit("4010", dec!(1000)));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_no_tax_omits_vat_line() {
        let ctx = TransactionContext::purchase(dec!(500), dec!(500), Decimal::ZERO)
            .with_account(konto("6250"));
        let lines = compose_default_entries(&ctx);
        assert_eq!(lines, vec![debit("6250", dec!(500)), credit("2440", dec!(500))]);
    }

    #[test]
    fn test_sale_mirrors_sides() {
        let ctx = TransactionContext::sale(dec!(1120), dec!(1000), dec!(120));
        let lines = compose_default_entries(&ctx);
        assert_eq!(
            lines,
            vec![
                credit("3041", dec!(1000)),
                credit("2612", dec!(120)),
                debit("1930", dec!(1120)),
            ]
        );
        assert!(validate(&lines).balanced);
    }

    #[test]
    fn test_gross_only_with_rate_is_split() {
        let ctx = TransactionContext::purchase(dec!(106), Decimal::ZERO, Decimal::ZERO)
            .with_vat_rate(VatRate::Low)
            .with_account(konto("5410"));
        let lines = compose_default_entries(&ctx);
        assert_eq!(
            lines,
            vec![
                debit("5410", dec!(100)),
                debit("2643", dec!(6)),
                credit("2440", dec!(106)),
            ]
        );
    }

    #[test]
    fn test_gross_only_without_rate_books_full_cost() {
        let ctx = TransactionContext::purchase(dec!(300), Decimal::ZERO, Decimal::ZERO);
        let lines = compose_default_entries(&ctx);
        assert_eq!(lines, vec![debit("4010", dec!(300)), credit("2440", dec!(300))]);
    }

    #[test]
    fn test_empty_context_yields_no_lines() {
        let lines = compose_default_entries(&TransactionContext::default());
        assert!(lines.is_empty());
        assert!(!validate(&lines).balanced);
    }

    #[test]
    fn test_tax_only_is_not_postable() {
        let ctx = TransactionContext::purchase(Decimal::ZERO, Decimal::ZERO, dec!(25));
        let lines = compose_default_entries(&ctx);
        assert_eq!(lines, vec![debit("2641", dec!(25))]);
        assert!(!validate(&lines).balanced);
    }

    #[test]
    fn test_tiny_net_huge_tax_does_not_infer_rate() {
        let ctx = TransactionContext::purchase(Decimal::ZERO, dec!(0.01), dec!(10000000000000000000000000000));
        let lines = compose_default_entries(&ctx);
        assert_eq!(
            lines,
            vec![debit("4010", dec!(0.01)), debit("2641", dec!(10000000000000000000000000000))]
        );
        assert!(!validate(&lines).balanced);
    }

    #[test]
    fn test_missing_net_with_out_of_range_tax() {
        let ctx = TransactionContext::purchase(Decimal::MAX, Decimal::ZERO, Decimal::MIN);
        let lines = compose_default_entries(&ctx);
        assert_eq!(lines, vec![credit("2440", Decimal::MAX)]);
    }

    #[test]
    fn test_custom_accounts() {
        let accounts = AccountDefaults {
            purchase_fallback: konto("5611"),
            payable: konto("2893"),
            ..AccountDefaults::default()
        };
        let composer = EntryComposer::new(accounts);
        let lines = composer.compose(&TransactionContext::purchase(dec!(100), dec!(80), dec!(20)));
        assert_eq!(lines[0].account, "5611");
        assert_eq!(lines[2].account, "2893");
    }

    #[test]
    fn test_composer_bank_uses_configured_bank() {
        let composer = EntryComposer::default();
        let lines = composer.compose_bank(dec!(-200), &konto("6570"));
        assert_eq!(lines, vec![credit("1930", dec!(200)), debit("6570", dec!(200))]);
    }
}
