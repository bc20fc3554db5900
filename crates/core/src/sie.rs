//! SIE type 4 export of posted vouchers.
//!
//! Produces the text file Swedish accounting programs import: a header
//! identifying the company and fiscal year, one `#KONTO` per account used,
//! and one `#VER` block per voucher. Lines end with CRLF.

use std::collections::BTreeSet;

use bokforing_shared::types::{AccountCode, round_amount};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chart::ChartOfAccounts;
use crate::ledger::{LedgerError, LedgerLine};

/// Name written to `#PROGRAM`.
pub const PROGRAM_NAME: &str = "Bokforing";

/// Voucher series used for exported verifications.
pub const VOUCHER_SERIES: &str = "B";

const LINE_END: &str = "\r\n";
const SIE_DATE: &str = "%Y%m%d";

/// Company details for the file header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    /// Company name.
    pub name: String,
    /// Organisation number, e.g. `556677-8899`.
    pub org_number: String,
    /// Street address.
    pub street: String,
    /// Postal code.
    pub postcode: String,
    /// City.
    pub city: String,
}

/// A posted voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    /// Booking date.
    pub date: NaiveDate,
    /// Voucher text, usually the bank reference.
    #[serde(default)]
    pub reference: String,
    /// Booked lines.
    pub lines: Vec<LedgerLine>,
}

/// Renders a SIE 4 file.
///
/// Verifications are numbered from 1 in date order; vouchers on the same
/// date keep their input order. The fiscal year is the calendar year of the
/// earliest verification.
pub fn generate_sie(
    company: &Company,
    verifications: &[Verification],
    chart: &ChartOfAccounts,
    generated_on: NaiveDate,
) -> Result<String, LedgerError> {
    let mut ordered: Vec<&Verification> = verifications.iter().collect();
    ordered.sort_by_key(|ver| ver.date);

    let Some(first) = ordered.first() else {
        return Err(LedgerError::NothingToExport);
    };
    let year = first.date.year();

    let mut out = SieWriter::default();
    out.line("#FLAGGA 0");
    out.line(&format!("#PROGRAM \"{PROGRAM_NAME}\" 1.0"));
    out.line("#FORMAT PC8");
    out.line(&format!("#GEN {} \"Admin\"", generated_on.format(SIE_DATE)));
    out.line("#SIETYP 4");
    out.line(&format!("#FNAMN \"{}\"", field_text(&company.name)));
    out.line(&format!("#ORGNR {}", field_text(company.org_number.trim())));
    out.line(&format!(
        "#ADRESS \"\" \"{}\" \"{} {}\" \"\"",
        field_text(&company.street),
        field_text(&company.postcode),
        field_text(&company.city),
    ));
    out.line(&format!("#RAR 0 {year}0101 {year}1231"));

    let accounts: BTreeSet<&AccountCode> = ordered
        .iter()
        .flat_map(|ver| ver.lines.iter().map(|line| &line.account))
        .collect();
    for account in accounts {
        out.line(&format!(
            "#KONTO {account} \"{}\"",
            field_text(&chart.display_name(account))
        ));
    }

    for (number, ver) in ordered.iter().enumerate() {
        out.line(&format!(
            "#VER \"{VOUCHER_SERIES}\" {} {} \"{}\"",
            number + 1,
            ver.date.format(SIE_DATE),
            field_text(&ver.reference),
        ));
        out.line("{");
        for line in &ver.lines {
            let amount = trans_amount(line);
            if !amount.is_zero() {
                out.line(&format!("#TRANS {} {{}} {amount}", line.account));
            }
        }
        out.line("}");
    }

    Ok(out.finish())
}

/// Debit as a positive amount, otherwise credit as a negative one.
fn trans_amount(line: &LedgerLine) -> Decimal {
    let mut amount = if line.debit > Decimal::ZERO {
        round_amount(line.debit)
    } else {
        -round_amount(line.credit)
    };
    amount.rescale(2);
    amount
}

/// Field content safe to embed in one SIE line: quotes are dropped and
/// control characters (line breaks included) become spaces.
fn field_text(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '"')
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[derive(Default)]
struct SieWriter {
    buf: String,
}

impl SieWriter {
    fn line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push_str(LINE_END);
    }

    fn finish(self) -> String {
        self.buf
    }
}
