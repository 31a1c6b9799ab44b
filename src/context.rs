//! Application context providing dependency injection root.

use std::sync::Arc;

use crate::config::{Config, SourceKind};
use crate::di::Context as ContextDerive;
use crate::error::AppError;
use crate::graph::backends::graphdb::GraphDbClient;
use crate::graph::GraphStore;
use crate::harvest::{
    DatasetFetcher, Dereferencer, DocumentQueryEngine, HttpDereferencer, HttpSparqlEngine,
    QueryEngine,
};

/// Shared triplestore handle.
pub type AppStore = Arc<dyn GraphStore>;

/// Shared dataset fetcher.
pub type AppFetcher = Arc<DatasetFetcher>;

/// Shared configuration.
pub type AppConfig = Arc<Config>;

/// Root application context for dependency injection.
///
/// The Context holds all shared dependencies and uses `#[derive(Context)]`
/// to generate `FromRef` implementations for each field, enabling
/// compile-time dependency resolution.
#[derive(ContextDerive, Clone)]
pub struct Context {
    /// Triplestore holding registrations, datasets and the allowlist.
    pub store: AppStore,
    /// Harvester for registration URLs.
    pub fetcher: AppFetcher,
    /// Application configuration.
    pub config: AppConfig,
}

impl Context {
    /// Creates a new context with the given dependencies.
    pub fn new(store: AppStore, fetcher: DatasetFetcher, config: Config) -> Self {
        Self {
            store,
            fetcher: Arc::new(fetcher),
            config: Arc::new(config),
        }
    }

    /// Builds the production context: GraphDB store and HTTP harvesters.
    ///
    /// Registration URLs are dereferenced as documents unless
    /// `harvest.source` selects SPARQL endpoints.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let http = config.http.client()?;
        let store = GraphDbClient::new(http.clone(), &config.store)?;

        let dereferencer: Arc<dyn Dereferencer> = Arc::new(HttpDereferencer::new(http.clone()));
        let engine: Arc<dyn QueryEngine> = match config.harvest.source {
            SourceKind::Document => Arc::new(DocumentQueryEngine::new(dereferencer.clone())),
            SourceKind::Endpoint => Arc::new(HttpSparqlEngine::new(http)),
        };
        let fetcher = DatasetFetcher::new(engine, dereferencer);

        Ok(Self::new(Arc::new(store), fetcher, config))
    }
}
