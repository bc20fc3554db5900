//! Rule templates that turn a bank amount into voucher lines.
//!
//! A rule lists `{konto, debet, kredit}` templates whose amounts are
//! expressions over the transaction amount, for instance
//!
//! ```json
//! {"entries": [
//!     {"konto": "1930", "kredit": "ABS_AMOUNT"},
//!     {"konto": "5611", "debet": "ABS_AMOUNT * 0,8"},
//!     {"konto": "2641", "debet": "ABS_AMOUNT * 0,2"}
//! ]}
//! ```

pub mod expression;

use bokforing_shared::types::{AccountCode, round_amount};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::ledger::{LedgerError, LedgerLine};
use expression::{ExpressionError, Placeholders, evaluate_expression};

/// Largest accepted difference between the debit and credit totals of a rule.
pub const RULE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// One line template of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    /// Account to book on.
    #[serde(rename = "konto")]
    pub account: AccountCode,
    /// Debit expression; missing means zero.
    #[serde(
        rename = "debet",
        default,
        deserialize_with = "expression_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub debit: Option<String>,
    /// Credit expression; missing means zero.
    #[serde(
        rename = "kredit",
        default,
        deserialize_with = "expression_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub credit: Option<String>,
}

impl RuleEntry {
    /// Creates a template with both expressions.
    #[must_use]
    pub fn new(account: AccountCode, debit: Option<&str>, credit: Option<&str>) -> Self {
        Self {
            account,
            debit: debit.map(str::to_string),
            credit: credit.map(str::to_string),
        }
    }
}

/// A named list of line templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Optional label shown to the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Line templates, in output order.
    #[serde(default)]
    pub entries: Vec<RuleEntry>,
}

/// Evaluates a rule for a signed transaction amount.
///
/// Each expression result is rounded to two decimals. The rule must not
/// be empty and the produced lines must balance within [`RULE_TOLERANCE`].
pub fn apply_rule(rule: &Rule, amount: Decimal) -> Result<Vec<LedgerLine>, LedgerError> {
    if rule.entries.is_empty() {
        return Err(LedgerError::EmptyRule);
    }

    let vars = Placeholders::for_amount(amount);
    let mut lines = Vec::with_capacity(rule.entries.len());
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for entry in &rule.entries {
        let debit = evaluate(entry.debit.as_deref(), &vars)?;
        let credit = evaluate(entry.credit.as_deref(), &vars)?;
        total_debit = accumulate(total_debit, debit, entry.debit.as_deref())?;
        total_credit = accumulate(total_credit, credit, entry.credit.as_deref())?;
        lines.push(LedgerLine {
            account: entry.account.clone(),
            debit,
            credit,
        });
    }

    let within_tolerance = total_debit
        .checked_sub(total_credit)
        .is_some_and(|diff| diff.abs() <= RULE_TOLERANCE);
    if !within_tolerance {
        return Err(LedgerError::RuleUnbalanced {
            debit: total_debit,
            credit: total_credit,
        });
    }

    Ok(lines)
}

fn evaluate(text: Option<&str>, vars: &Placeholders) -> Result<Decimal, LedgerError> {
    let text = text.unwrap_or_default();
    let mut value = evaluate_expression(text, vars)
        .map(round_amount)
        .map_err(|err: ExpressionError| LedgerError::InvalidRuleExpression {
            expression: text.to_string(),
            reason: err.to_string(),
        })?;
    value.rescale(2);
    Ok(value)
}

/// Adds one result to a running total; a total out of decimal range is
/// reported against the expression that pushed it there.
fn accumulate(
    total: Decimal,
    value: Decimal,
    text: Option<&str>,
) -> Result<Decimal, LedgerError> {
    total
        .checked_add(value)
        .ok_or_else(|| LedgerError::InvalidRuleExpression {
            expression: text.unwrap_or_default().to_string(),
            reason: ExpressionError::Overflow.to_string(),
        })
}

/// Accepts an expression given either as text or as a plain JSON number.
fn expression_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(Decimal),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}
