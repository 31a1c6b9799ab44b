//! Dataset fetcher: runs a harvest against one registration URL.

use std::sync::Arc;

use futures::TryStreamExt;
use once_cell::sync::Lazy;
use oxrdf::{Dataset, NamedNode, SubjectRef, TermRef};
use regex::Regex;
use reqwest::Url;

use crate::error::AppError;
use crate::harvest::engine::{Dereferencer, EngineError, QueryEngine};
use crate::harvest::normalize::standardize_schema_org;
use crate::harvest::query::{SELECT_QUERY, SPARQL_LIMIT};
use crate::harvest::transform::BindingsTransformer;
use crate::models::DatasetGraph;
use crate::vocab::{rdf, schema};

static HTTP_STATUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"HTTP status (\d+)").expect("valid status pattern"));

/// Translates an engine failure into the registry's error taxonomy.
pub fn classify_engine_error(error: EngineError) -> AppError {
    let message = error.message();

    if message.contains("404: unknown error") {
        return AppError::Http {
            status_code: 404,
            message: message.to_string(),
        };
    }

    if let Some(code) = HTTP_STATUS
        .captures(message)
        .and_then(|captures| captures.get(1))
        .and_then(|code| code.as_str().parse::<u16>().ok())
    {
        return AppError::Http {
            status_code: code,
            message: message.to_string(),
        };
    }

    AppError::NoDatasetFound(message.to_string())
}

/// Harvests dataset descriptions from registration URLs.
///
/// Never writes to the store; callers decide what to persist.
#[derive(Clone)]
pub struct DatasetFetcher {
    engine: Arc<dyn QueryEngine>,
    dereferencer: Arc<dyn Dereferencer>,
}

impl DatasetFetcher {
    pub fn new(engine: Arc<dyn QueryEngine>, dereferencer: Arc<dyn Dereferencer>) -> Self {
        Self {
            engine,
            dereferencer,
        }
    }

    /// Queries the URL and returns one graph per dataset found.
    pub async fn fetch(&self, url: &Url) -> Result<Vec<DatasetGraph>, AppError> {
        tracing::info!(%url, "Fetching datasets");

        let mut bindings = self
            .engine
            .query_bindings(SELECT_QUERY, std::slice::from_ref(url))
            .await
            .map_err(classify_engine_error)?;

        let mut transformer = BindingsTransformer::new();
        while let Some(binding) = bindings.try_next().await.map_err(classify_engine_error)? {
            transformer.push(&binding)?;
        }

        let harvest = transformer.finish();
        if harvest.truncated {
            tracing::warn!(
                %url,
                rows = harvest.rows,
                limit = SPARQL_LIMIT,
                "Query reached the row limit; dataset descriptions may be incomplete"
            );
        }

        if harvest.graphs.is_empty() {
            return Err(AppError::NoDatasetFound(url.to_string()));
        }

        tracing::info!(%url, datasets = harvest.graphs.len(), rows = harvest.rows, "Fetched datasets");
        Ok(harvest.graphs)
    }

    /// Retrieves the URL as an RDF document with standardized schema.org IRIs.
    pub async fn dereference(&self, url: &Url) -> Result<Dataset, AppError> {
        tracing::info!(%url, "Dereferencing document");

        let mut quads = self
            .dereferencer
            .dereference(url)
            .await
            .map_err(classify_engine_error)?;

        let mut dataset = Dataset::new();
        while let Some(quad) = quads.try_next().await.map_err(classify_engine_error)? {
            dataset.insert(&standardize_schema_org(quad));
        }

        tracing::debug!(%url, statements = dataset.len(), "Dereferenced document");
        Ok(dataset)
    }
}

/// Returns the IRIs of the `schema:Dataset` subjects of a dereferenced document.
pub fn dataset_iris(dataset: &Dataset) -> Result<Vec<NamedNode>, AppError> {
    let mut iris: Vec<NamedNode> = Vec::new();

    for quad in dataset.quads_for_object(TermRef::from(schema::HTTPS_DATASET_CLASS)) {
        if quad.predicate != rdf::TYPE {
            continue;
        }
        match quad.subject {
            SubjectRef::NamedNode(node) => {
                let node = node.into_owned();
                if !iris.contains(&node) {
                    iris.push(node);
                }
            }
            _ => {
                return Err(AppError::NoDatasetFound(
                    "Dataset description without an IRI".to_string(),
                ))
            }
        }
    }

    if iris.is_empty() {
        return Err(AppError::NoDatasetFound(
            "No schema:Dataset in document".to_string(),
        ));
    }

    Ok(iris)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harvest::engine::{BindingStream, QuadStream};
    use crate::harvest::testing::{copy_solution, dataset_row as row};
    use async_trait::async_trait;
    use oxrdf::{BlankNode, GraphName, Literal, Quad};
    use sparesults::QuerySolution;

    struct FakeEngine {
        rows: Vec<Result<QuerySolution, EngineError>>,
    }

    #[async_trait]
    impl QueryEngine for FakeEngine {
        async fn query_bindings(
            &self,
            _query: &str,
            _sources: &[Url],
        ) -> Result<BindingStream, EngineError> {
            let rows: Vec<_> = self
                .rows
                .iter()
                .map(|row| row.as_ref().map(copy_solution).map_err(Clone::clone))
                .collect();
            Ok(Box::pin(futures::stream::iter(rows)))
        }
    }

    struct FailingEngine(&'static str);

    #[async_trait]
    impl QueryEngine for FailingEngine {
        async fn query_bindings(
            &self,
            _query: &str,
            _sources: &[Url],
        ) -> Result<BindingStream, EngineError> {
            Err(EngineError::new(self.0))
        }
    }

    struct FakeDereferencer {
        quads: Vec<Quad>,
    }

    #[async_trait]
    impl Dereferencer for FakeDereferencer {
        async fn dereference(&self, _url: &Url) -> Result<QuadStream, EngineError> {
            Ok(Box::pin(futures::stream::iter(
                self.quads.clone().into_iter().map(Ok),
            )))
        }
    }

    fn fetcher(engine: impl QueryEngine + 'static) -> DatasetFetcher {
        DatasetFetcher::new(
            Arc::new(engine),
            Arc::new(FakeDereferencer { quads: Vec::new() }),
        )
    }

    fn url() -> Url {
        Url::parse("https://example.org/catalog").unwrap()
    }

    #[test]
    fn test_classify_unknown_404() {
        let error = classify_engine_error(EngineError::new("Could not retrieve x (404: unknown error)"));
        assert_eq!(error.status_code(), Some(404));
    }

    #[test]
    fn test_classify_http_status() {
        let error = classify_engine_error(EngineError::new("Could not query x (HTTP status 503)"));
        assert!(matches!(error, AppError::Http { status_code: 503, .. }));
    }

    #[test]
    fn test_classify_other_errors_as_no_dataset() {
        let error = classify_engine_error(EngineError::new("Unexpected token < in JSON"));
        match error {
            AppError::NoDatasetFound(message) => assert!(message.contains("Unexpected token")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_returns_graph_per_dataset() {
        let fetcher = fetcher(FakeEngine {
            rows: vec![
                Ok(row("https://example.org/dataset/1")),
                Ok(row("https://example.org/dataset/2")),
            ],
        });

        let graphs = fetcher.fetch(&url()).await.unwrap();
        assert_eq!(graphs.len(), 2);
        assert_eq!(graphs[0].iri().as_str(), "https://example.org/dataset/1");
        assert_eq!(graphs[1].iri().as_str(), "https://example.org/dataset/2");
    }

    #[tokio::test]
    async fn test_fetch_without_rows_is_no_dataset() {
        let fetcher = fetcher(FakeEngine { rows: Vec::new() });
        let result = fetcher.fetch(&url()).await;
        assert!(matches!(result, Err(AppError::NoDatasetFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_classifies_engine_failure() {
        let fetcher = fetcher(FailingEngine("Could not query x (HTTP status 410)"));
        let result = fetcher.fetch(&url()).await;
        assert!(matches!(result, Err(AppError::Http { status_code: 410, .. })));
    }

    #[tokio::test]
    async fn test_fetch_classifies_mid_stream_failure() {
        let fetcher = fetcher(FakeEngine {
            rows: vec![
                Ok(row("https://example.org/dataset/1")),
                Err(EngineError::new("connection reset")),
            ],
        });
        let result = fetcher.fetch(&url()).await;
        assert!(matches!(result, Err(AppError::NoDatasetFound(_))));
    }

    #[tokio::test]
    async fn test_dereference_standardizes_schema_org() {
        let subject = NamedNode::new_unchecked("https://example.org/dataset/1");
        let fetcher = DatasetFetcher::new(
            Arc::new(FakeEngine { rows: Vec::new() }),
            Arc::new(FakeDereferencer {
                quads: vec![
                    Quad::new(
                        subject.clone(),
                        rdf::TYPE.into_owned(),
                        NamedNode::new_unchecked("http://schema.org/Dataset"),
                        GraphName::DefaultGraph,
                    ),
                    Quad::new(
                        subject.clone(),
                        NamedNode::new_unchecked("http://schema.org/name"),
                        Literal::new_simple_literal("One"),
                        GraphName::DefaultGraph,
                    ),
                ],
            }),
        );

        let dataset = fetcher.dereference(&url()).await.unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset_iris(&dataset).unwrap(), vec![subject]);
        assert!(dataset
            .iter()
            .all(|quad| !quad.predicate.as_str().starts_with("http://schema.org/")));
    }

    #[test]
    fn test_dataset_iris_rejects_blank_dataset() {
        let mut dataset = Dataset::new();
        dataset.insert(&Quad::new(
            BlankNode::new_unchecked("x"),
            rdf::TYPE.into_owned(),
            schema::HTTPS_DATASET_CLASS.into_owned(),
            GraphName::DefaultGraph,
        ));
        assert!(matches!(
            dataset_iris(&dataset),
            Err(AppError::NoDatasetFound(_))
        ));
    }

    #[test]
    fn test_dataset_iris_requires_a_dataset() {
        assert!(matches!(
            dataset_iris(&Dataset::new()),
            Err(AppError::NoDatasetFound(_))
        ));
    }
}
