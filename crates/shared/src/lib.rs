//! Shared types, errors, and configuration for Bokforing.
//!
//! This crate provides common types used across all other crates:
//! - Account codes from the chart of accounts
//! - Locale-aware amount parsing and formatting (Swedish notation)
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AccountDefaults, AppConfig, LedgerConfig};
pub use error::{AppError, AppResult};
