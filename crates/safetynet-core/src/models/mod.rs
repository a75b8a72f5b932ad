//! Domain models for the SafetyNet alerts system.

mod coverage;
mod medical;
mod patch;
mod person;
mod views;

pub use coverage::*;
pub use medical::*;
pub use patch::*;
pub use person::*;
pub use views::*;

/// Generate a fresh surrogate identifier.
pub(crate) fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
