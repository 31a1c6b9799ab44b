//! Triplestore abstraction layer.
//!
//! Repositories talk to the store through traits, so the GraphDB backend can
//! be swapped for a fake in tests:
//!
//! - [`SparqlExecutor`] - Execute SELECT queries
//! - [`GraphStore`] - Replace named graphs, insert and delete statements
//!
//! # Usage
//!
//! ```ignore
//! use dataset_register::graph::{GraphStore, QueryExt};
//!
//! let rows = store
//!     .query("SELECT ?s WHERE { GRAPH $graph { ?s a $class } }")
//!     .param("graph", graph_iri)
//!     .param("class", schema::ENTRY_POINT_CLASS.into_owned())
//!     .fetch_all()
//!     .await?;
//!
//! store.replace_graph(&dataset_iri, trig).await?;
//! ```

mod query;
mod row;
mod session;
mod traits;
mod trig;

pub mod backends;

#[cfg(test)]
pub(crate) mod testing;

pub use query::{Query, QueryExt};
pub use row::{parse_results, Params, Row, RowStream};
pub use session::Session;
pub use traits::{GraphStore, SparqlExecutor};
pub use trig::{serialize_trig, TRIG_CONTENT_TYPE};
