//! In-memory store double for repository and service tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use oxrdf::{Literal, NamedNode, Term};

use crate::error::AppError;
use crate::graph::row::{Row, RowStream};
use crate::graph::traits::{GraphStore, SparqlExecutor};

/// A store call as the fake observed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Select(String),
    Replace { graph: String, trig: String },
    Insert(String),
    Delete { subject: String, context: String },
}

/// Records every call and answers selects from a queue of canned results.
#[derive(Default)]
pub struct RecordingStore {
    calls: Mutex<Vec<StoreCall>>,
    results: Mutex<VecDeque<Vec<Row>>>,
    failures: HashMap<&'static str, u16>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the rows returned by the next select.
    pub fn with_rows(self, rows: Vec<Row>) -> Self {
        self.results.lock().unwrap().push_back(rows);
        self
    }

    /// Makes every request with `method` fail with `status`.
    pub fn failing(mut self, method: &'static str, status: u16) -> Self {
        self.failures.insert(method, status);
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn record(&self, method: &'static str, call: StoreCall) -> Result<(), AppError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(call);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.failures.get(method) {
            Some(status) => Err(AppError::Store {
                method: method.to_string(),
                url: "memory://".to_string(),
                status: *status,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SparqlExecutor for RecordingStore {
    async fn execute_sparql(&self, sparql: &str) -> Result<RowStream<'_>, AppError> {
        self.record("GET", StoreCall::Select(sparql.to_string()))
            .await?;
        let rows = self.results.lock().unwrap().pop_front().unwrap_or_default();
        Ok(Box::pin(futures::stream::iter(rows.into_iter().map(Ok))))
    }
}

#[async_trait]
impl GraphStore for RecordingStore {
    async fn replace_graph(&self, graph: &NamedNode, trig: String) -> Result<(), AppError> {
        self.record(
            "PUT",
            StoreCall::Replace {
                graph: graph.as_str().to_string(),
                trig,
            },
        )
        .await
    }

    async fn insert_statements(&self, trig: String) -> Result<(), AppError> {
        self.record("POST", StoreCall::Insert(trig)).await
    }

    async fn delete_statements(
        &self,
        subject: &NamedNode,
        context: &NamedNode,
    ) -> Result<(), AppError> {
        self.record(
            "DELETE",
            StoreCall::Delete {
                subject: subject.as_str().to_string(),
                context: context.as_str().to_string(),
            },
        )
        .await
    }
}

/// Builds a result row; values starting with `http` are bound as IRIs.
pub fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(name, value)| {
            let term = if value.starts_with("http") {
                Term::from(NamedNode::new_unchecked(*value))
            } else {
                Term::from(Literal::new_simple_literal(*value))
            };
            (name.to_string(), term)
        })
        .collect::<HashMap<_, _>>()
        .into()
}
