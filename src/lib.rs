//! Dataset register
//!
//! Harvests schema.org dataset descriptions from registered URLs, maps them
//! to DCAT and stores each dataset as a named graph in a triplestore.

pub mod cli;
pub mod config;
pub mod context;
pub mod di;
pub mod error;
pub mod graph;
pub mod harvest;
pub mod models;
pub mod repositories;
pub mod services;
pub mod vocab;

// Re-export FromRef at crate root for di-macros generated code
pub use di::FromRef;
