//! GraphDB REST backend.
//!
//! Talks to a GraphDB repository over HTTP:
//!
//! - `GET /repositories/<repo>?query=…` for SELECT queries
//! - `PUT /repositories/<repo>/rdf-graphs/service?graph=<iri>` to replace a graph
//! - `POST /repositories/<repo>/statements` to add statements
//! - `DELETE /repositories/<repo>/statements?subj=<iri>&context=<iri>` to remove them
//!
//! When credentials are configured, the client logs in through
//! `POST /rest/login/<username>` and sends the returned token with every
//! request. A 401 or 409 (token hash mismatch after a restart) drops the
//! token, logs in again and retries the request once.
//!
//! # Example
//!
//! ```ignore
//! use dataset_register::graph::backends::graphdb::GraphDbClient;
//! use dataset_register::graph::QueryExt;
//!
//! let client = GraphDbClient::new(reqwest::Client::new(), &config.store)?;
//! let rows = client.query("SELECT * WHERE { ?s ?p ?o } LIMIT 1")
//!     .fetch_all()
//!     .await?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use oxrdf::NamedNode;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode, Url};

use crate::config::StoreConfig;
use crate::error::AppError;
use crate::graph::row::{parse_results, Row, RowStream};
use crate::graph::session::Session;
use crate::graph::traits::{GraphStore, SparqlExecutor};
use crate::graph::trig::TRIG_CONTENT_TYPE;

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";
const PASSWORD_HEADER: &str = "X-GraphDB-Password";

#[derive(Clone)]
struct Credentials {
    username: String,
    password: String,
}

/// A repository request that can be sent again after re-authentication.
#[derive(Debug, Clone)]
pub struct StoreRequest {
    method: Method,
    url: Url,
    body: Option<String>,
    accept: Option<&'static str>,
}

impl StoreRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
            accept: None,
        }
    }

    /// Attaches a TriG body.
    pub fn body(mut self, trig: String) -> Self {
        self.body = Some(trig);
        self
    }

    pub fn accept(mut self, media_type: &'static str) -> Self {
        self.accept = Some(media_type);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// GraphDB repository client.
///
/// Cheap to clone; clones share the authentication session.
#[derive(Clone)]
pub struct GraphDbClient {
    http: reqwest::Client,
    url: Url,
    repository: Arc<str>,
    credentials: Option<Credentials>,
    session: Arc<Session>,
}

impl GraphDbClient {
    /// Creates a client for the repository described by `config`.
    ///
    /// Credentials are only used when both username and password are set.
    pub fn new(http: reqwest::Client, config: &StoreConfig) -> Result<Self, AppError> {
        let url = Url::parse(config.url.trim_end_matches('/'))
            .map_err(|e| AppError::InvalidUrl(format!("{}: {}", config.url, e)))?;

        let credentials = config.credentials().map(|(username, password)| Credentials {
            username: username.to_string(),
            password: password.to_string(),
        });

        Ok(Self {
            http,
            url,
            repository: Arc::from(config.repository.as_str()),
            credentials,
            session: Arc::new(Session::new()),
        })
    }

    /// Returns the session holding the current token.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Builds a repository URL: `<url>/repositories/<repo><path>` plus query pairs.
    pub fn repository_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, AppError> {
        let base = format!(
            "{}/repositories/{}{}",
            self.url.as_str().trim_end_matches('/'),
            self.repository,
            path
        );
        let mut url = Url::parse(&base).map_err(|e| AppError::InvalidUrl(format!("{}: {}", base, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Logs in and returns the token from the `Authorization` response header.
    ///
    /// Fails with [`AppError::Authentication`] on any non-success response;
    /// a failed login is never retried.
    pub async fn authenticate(&self) -> Result<String, AppError> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            AppError::Internal("authentication requested without credentials".to_string())
        })?;

        let login_url = format!(
            "{}/rest/login/{}",
            self.url.as_str().trim_end_matches('/'),
            credentials.username
        );
        tracing::debug!(username = %credentials.username, "Logging in to GraphDB");

        let response = self
            .http
            .post(&login_url)
            .header(PASSWORD_HEADER, &credentials.password)
            .send()
            .await?;

        let status = response.status();
        let token = response
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        match token {
            Some(token) if status.is_success() => Ok(token),
            _ => Err(AppError::Authentication {
                username: credentials.username.clone(),
                status: status.as_u16(),
            }),
        }
    }

    async fn token(&self) -> Result<Option<String>, AppError> {
        if self.credentials.is_none() {
            return Ok(None);
        }
        self.session
            .token_or_login(|| self.authenticate())
            .await
            .map(Some)
    }

    async fn dispatch(&self, request: &StoreRequest) -> Result<Response, AppError> {
        let token = self.token().await?;

        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone())
            .header(CONTENT_TYPE, TRIG_CONTENT_TYPE);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, token);
        }
        if let Some(accept) = request.accept {
            builder = builder.header(ACCEPT, accept);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        tracing::debug!(method = %request.method, url = %request.url, "GraphDB request");
        Ok(builder.send().await?)
    }

    /// Sends a repository request.
    ///
    /// Non-success responses are logged and returned as they are; only
    /// transport and login failures are errors.
    pub async fn send(&self, request: &StoreRequest) -> Result<Response, AppError> {
        let mut response = self.dispatch(request).await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::CONFLICT
        ) && self.credentials.is_some()
        {
            tracing::debug!(status = %response.status(), "Token rejected, logging in again");
            self.session.invalidate().await;
            response = self.dispatch(request).await?;
        }

        if !response.status().is_success() {
            tracing::error!(
                method = %request.method,
                url = %request.url,
                status = response.status().as_u16(),
                "GraphDB request failed"
            );
        }

        Ok(response)
    }

    /// Sends a request and turns a non-success status into [`AppError::Store`].
    async fn send_checked(&self, request: StoreRequest) -> Result<Response, AppError> {
        let response = self.send(&request).await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(AppError::Store {
                method: request.method.to_string(),
                url: request.url.to_string(),
                status: response.status().as_u16(),
            })
        }
    }

    /// Runs a SELECT query and decodes the JSON results.
    pub async fn select(&self, sparql: &str) -> Result<Vec<Row>, AppError> {
        let url = self.repository_url("", &[("query", sparql)])?;
        let request = StoreRequest::new(Method::GET, url).accept(SPARQL_RESULTS_JSON);
        let body = self.send_checked(request).await?.bytes().await?;
        parse_results(&body)
    }
}

#[async_trait]
impl SparqlExecutor for GraphDbClient {
    async fn execute_sparql(&self, sparql: &str) -> Result<RowStream<'_>, AppError> {
        let rows = self.select(sparql).await?;
        Ok(Box::pin(futures::stream::iter(rows.into_iter().map(Ok))))
    }
}

#[async_trait]
impl GraphStore for GraphDbClient {
    async fn replace_graph(&self, graph: &NamedNode, trig: String) -> Result<(), AppError> {
        let url = self.repository_url("/rdf-graphs/service", &[("graph", graph.as_str())])?;
        self.send_checked(StoreRequest::new(Method::PUT, url).body(trig))
            .await?;
        Ok(())
    }

    async fn insert_statements(&self, trig: String) -> Result<(), AppError> {
        let url = self.repository_url("/statements", &[])?;
        self.send_checked(StoreRequest::new(Method::POST, url).body(trig))
            .await?;
        Ok(())
    }

    async fn delete_statements(
        &self,
        subject: &NamedNode,
        context: &NamedNode,
    ) -> Result<(), AppError> {
        let subject = subject.to_string();
        let context = context.to_string();
        let url = self.repository_url(
            "/statements",
            &[("subj", subject.as_str()), ("context", context.as_str())],
        )?;
        self.send_checked(StoreRequest::new(Method::DELETE, url))
            .await?;
        Ok(())
    }
}
