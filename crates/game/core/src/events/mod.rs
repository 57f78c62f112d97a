//! Exploration event selection.
mod error;
mod selector;

pub use error::SelectError;
pub use selector::{Candidate, EventSelector, Selection};
