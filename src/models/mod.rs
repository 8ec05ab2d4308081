//! Domain view-models.
//!
//! These are the shapes the UI works with. Backend JSON is decoded into them
//! by [`crate::backend::wire`]; nothing here knows about HTTP.

pub mod claim;
pub mod customer;
pub mod document;
pub mod employee;
pub mod policy_type;
pub mod user;

pub use claim::{Claim, ClaimStatus, Documentation, ParseEnumError, Priority};
pub use customer::Customer;
pub use document::{DocumentStatus, DocumentType, SAMPLE_DOCUMENTS};
pub use employee::Employee;
pub use policy_type::PolicyType;
pub use user::User;
