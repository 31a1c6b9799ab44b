//! Harvesting dataset descriptions from registered sources.

pub mod engine;
pub mod fetcher;
pub mod normalize;
pub mod query;
pub mod skolem;
pub mod transform;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{
    BindingStream, Dereferencer, DocumentQueryEngine, EngineError, HttpDereferencer,
    HttpSparqlEngine, QuadStream, QueryEngine,
};
pub use fetcher::{classify_engine_error, dataset_iris, DatasetFetcher};
pub use normalize::{schema_org_as_http, standardize_schema_org};
pub use query::{SELECT_QUERY, SPARQL_LIMIT};
pub use transform::{bindings_to_quads, BindingsTransformer, Harvest};
