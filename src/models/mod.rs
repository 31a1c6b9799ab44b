//! Domain models for the dataset register.

mod dataset;
mod registration;

pub use dataset::DatasetGraph;
pub use registration::{canonical_timestamp, Registration};
