//! Swedish VAT (moms): rates, account selection, and gross/base splitting.

pub mod rate;
pub mod split;

#[cfg(test)]
mod split_props;

pub use rate::VatRate;
pub use split::{VatSplit, split_vat};
