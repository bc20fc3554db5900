//! Common types used across the application.

pub mod account;
pub mod amount;

#[cfg(test)]
mod amount_props;

pub use account::{AccountCode, InvalidAccountCode};
pub use amount::{format_amount, format_optional_amount, parse_amount, round_amount};
