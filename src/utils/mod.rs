//! Utility modules for the claimdesk application.
//!
//! - [`color`] - Status and priority color lookup tables
//! - [`datetime`] - Tolerant date/timestamp parsing and relative formatting
//! - [`format`] - Currency, status text and truncation helpers

pub mod color;
pub mod datetime;
pub mod format;
