//! Core bookkeeping logic for Bokforing.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every function is synchronous and side-effect free; persistence and
//! rendering belong to the callers.
//!
//! # Modules
//!
//! - `ledger` - Ledger lines, default entry composition, and balance validation
//! - `vat` - VAT rates, account selection, and gross/base splitting
//! - `chart` - Chart of accounts and keyword-based account suggestions
//! - `rules` - Rule templates with amount expressions
//! - `sie` - SIE 4 export of posted vouchers

pub mod chart;
pub mod ledger;
pub mod rules;
pub mod sie;
pub mod vat;
