//! Read model definitions.

pub mod dashboard;
pub mod document;
pub mod lease;
