//! Core traits for triplestore access.
//!
//! - [`SparqlExecutor`] - Read queries, required for all stores
//! - [`GraphStore`] - Named graph replacement and statement writes

use async_trait::async_trait;
use oxrdf::NamedNode;

use crate::error::AppError;
use crate::graph::row::RowStream;

/// Executes SPARQL SELECT queries against a triplestore.
#[async_trait]
pub trait SparqlExecutor: Send + Sync {
    /// Executes a query and returns a stream of result rows.
    async fn execute_sparql(&self, sparql: &str) -> Result<RowStream<'_>, AppError>;
}

/// Write operations of a triplestore.
///
/// Every method fails with [`AppError::Store`] when the store answers with a
/// non-success status, so a caller can stop before issuing dependent writes.
#[async_trait]
pub trait GraphStore: SparqlExecutor {
    /// Replaces the whole named graph with the statements in `trig`.
    async fn replace_graph(&self, graph: &NamedNode, trig: String) -> Result<(), AppError>;

    /// Adds the statements in `trig`.
    async fn insert_statements(&self, trig: String) -> Result<(), AppError>;

    /// Removes every statement with `subject` in graph `context`.
    async fn delete_statements(
        &self,
        subject: &NamedNode,
        context: &NamedNode,
    ) -> Result<(), AppError>;
}
