//! Collaborators that talk to harvested sources.
//!
//! The fetcher only sees the [`QueryEngine`] and [`Dereferencer`] traits, so
//! any engine can be plugged in. [`DocumentQueryEngine`] treats the
//! registration URL as an RDF document and evaluates the query over its
//! statements; [`HttpSparqlEngine`] sends the query to the URL as a SPARQL
//! endpoint.

use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures::{Stream, TryStreamExt};
use oxigraph::sparql::{Query, QueryResults};
use oxigraph::store::Store;
use oxrdf::Quad;
use oxrdfio::{RdfFormat, RdfParser};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use sparesults::{
    QueryResultsFormat, QueryResultsParser, QuerySolution, ReaderQueryResultsParserOutput,
};
use thiserror::Error;

use crate::harvest::normalize::schema_org_as_http;

/// Failure reported by a query engine or dereferencer.
///
/// Only the message is available; the fetcher classifies it.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(e: reqwest::Error) -> Self {
        EngineError::new(e.to_string())
    }
}

/// Rows produced by a query, in arrival order.
pub type BindingStream = Pin<Box<dyn Stream<Item = Result<QuerySolution, EngineError>> + Send>>;

/// Statements of a dereferenced document.
pub type QuadStream = Pin<Box<dyn Stream<Item = Result<Quad, EngineError>> + Send>>;

/// Runs a SELECT query over a set of sources.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    async fn query_bindings(
        &self,
        query: &str,
        sources: &[Url],
    ) -> Result<BindingStream, EngineError>;
}

/// Retrieves a document as RDF statements.
#[async_trait]
pub trait Dereferencer: Send + Sync {
    async fn dereference(&self, url: &Url) -> Result<QuadStream, EngineError>;
}

/// Query engine that dereferences each source and evaluates the query over
/// the union of their statements in an in-memory store.
///
/// `https://schema.org/` IRIs are loaded as `http://schema.org/`, so documents
/// using either namespace match the harvest query.
#[derive(Clone)]
pub struct DocumentQueryEngine {
    dereferencer: Arc<dyn Dereferencer>,
}

impl DocumentQueryEngine {
    pub fn new(dereferencer: Arc<dyn Dereferencer>) -> Self {
        Self { dereferencer }
    }
}

#[async_trait]
impl QueryEngine for DocumentQueryEngine {
    async fn query_bindings(
        &self,
        query: &str,
        sources: &[Url],
    ) -> Result<BindingStream, EngineError> {
        let mut quads = Vec::new();
        for source in sources {
            let mut stream = self.dereferencer.dereference(source).await?;
            while let Some(quad) = stream.try_next().await? {
                quads.push(schema_org_as_http(quad));
            }
        }
        tracing::debug!(statements = quads.len(), "Evaluating query over documents");

        let solutions = evaluate(query, &quads)?;
        Ok(Box::pin(futures::stream::iter(solutions.into_iter().map(Ok))))
    }
}

fn evaluate(query: &str, quads: &[Quad]) -> Result<Vec<QuerySolution>, EngineError> {
    let store = Store::new().map_err(|e| EngineError::new(e.to_string()))?;
    for quad in quads {
        store
            .insert(quad)
            .map_err(|e| EngineError::new(e.to_string()))?;
    }

    let mut query = Query::parse(query, None)
        .map_err(|e| EngineError::new(format!("Invalid query: {}", e)))?;
    query.dataset_mut().set_default_graph_as_union();

    match store
        .query(query)
        .map_err(|e| EngineError::new(e.to_string()))?
    {
        QueryResults::Solutions(solutions) => solutions
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| EngineError::new(e.to_string())),
        _ => Err(EngineError::new(
            "Expected SELECT solutions but got a different result",
        )),
    }
}

/// Query engine that sends the query to each source as a SPARQL endpoint.
#[derive(Debug, Clone, Default)]
pub struct HttpSparqlEngine {
    http: reqwest::Client,
}

impl HttpSparqlEngine {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl QueryEngine for HttpSparqlEngine {
    async fn query_bindings(
        &self,
        query: &str,
        sources: &[Url],
    ) -> Result<BindingStream, EngineError> {
        use async_stream::try_stream;

        let http = self.http.clone();
        let query = query.to_string();
        let sources = sources.to_vec();

        Ok(Box::pin(try_stream! {
            for source in sources {
                tracing::debug!(%source, "Querying source");
                let response = http
                    .post(source.clone())
                    .header(CONTENT_TYPE, "application/sparql-query")
                    .header(ACCEPT, "application/sparql-results+json")
                    .body(query.clone())
                    .send()
                    .await
                    .map_err(EngineError::from)?;

                let status = response.status();
                if !status.is_success() {
                    Err(EngineError::new(format!(
                        "Could not query {} (HTTP status {})",
                        source,
                        status.as_u16()
                    )))?;
                }

                let body = response.bytes().await.map_err(EngineError::from)?;
                for solution in parse_solutions(&body)? {
                    yield solution;
                }
            }
        }))
    }
}

fn parse_solutions(body: &[u8]) -> Result<Vec<QuerySolution>, EngineError> {
    let output = QueryResultsParser::from_format(QueryResultsFormat::Json)
        .for_reader(body)
        .map_err(|e| EngineError::new(format!("Invalid SPARQL results: {}", e)))?;

    match output {
        ReaderQueryResultsParserOutput::Solutions(solutions) => solutions
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| EngineError::new(format!("Invalid SPARQL results: {}", e))),
        ReaderQueryResultsParserOutput::Boolean(_) => Err(EngineError::new(
            "Expected SELECT solutions but got a boolean result",
        )),
    }
}

/// Accept header listing the RDF syntaxes the dereferencer can parse.
const RDF_ACCEPT: &str = "text/turtle, application/trig, application/n-quads, \
    application/n-triples, text/n3, application/rdf+xml;q=0.9";

/// Dereferencer that fetches the URL and parses it by content type.
#[derive(Debug, Clone, Default)]
pub struct HttpDereferencer {
    http: reqwest::Client,
}

impl HttpDereferencer {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Dereferencer for HttpDereferencer {
    async fn dereference(&self, url: &Url) -> Result<QuadStream, EngineError> {
        tracing::debug!(%url, "Dereferencing");
        let response = self
            .http
            .get(url.clone())
            .header(ACCEPT, RDF_ACCEPT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::new(format!(
                "Could not retrieve {} (HTTP status {})",
                url,
                status.as_u16()
            )));
        }

        let media_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_string())
            .unwrap_or_else(|| "text/turtle".to_string());
        let format = RdfFormat::from_media_type(&media_type).ok_or_else(|| {
            EngineError::new(format!("Unsupported content type {} at {}", media_type, url))
        })?;

        let body = response.bytes().await?;
        let parser = RdfParser::from_format(format)
            .with_base_iri(url.as_str())
            .map_err(|e| EngineError::new(e.to_string()))?;
        let quads = parser
            .for_reader(body.as_ref())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| EngineError::new(format!("Could not parse {}: {}", url, e)))?;

        Ok(Box::pin(futures::stream::iter(quads.into_iter().map(Ok))))
    }
}
