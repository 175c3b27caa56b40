//! QuotaPay Shared Types and Utilities
//!
//! This crate contains types, errors, and database utilities shared across
//! the QuotaPay data-access layer.

pub mod db;
pub mod error;
pub mod types;

pub use db::*;
pub use error::*;
pub use types::*;
