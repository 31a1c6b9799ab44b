//! Triplestore backends.
//!
//! Each backend implements the traits from [`crate::graph`]:
//!
//! - [`SparqlExecutor`](crate::graph::SparqlExecutor) - Required
//! - [`GraphStore`](crate::graph::GraphStore) - Required for stores that are written to
//!
//! # Available Backends
//!
//! | Backend | Module | Status |
//! |---------|--------|--------|
//! | GraphDB REST API | [`graphdb`] | Available |

pub mod graphdb;
