//! Query engine doubles for fetcher and service tests.

use std::collections::HashMap;

use async_trait::async_trait;
use oxrdf::{BlankNode, Literal, NamedNode, Term, Variable};
use reqwest::Url;
use sparesults::QuerySolution;

use crate::harvest::engine::{BindingStream, Dereferencer, EngineError, QuadStream, QueryEngine};

/// A row describing a minimal dataset with one creator and one distribution.
pub fn dataset_row(dataset: &str) -> QuerySolution {
    let variables = [
        "dataset",
        "name",
        "description",
        "license",
        "creator",
        "creator_name",
        "distribution",
        "distribution_url",
        "distribution_format",
    ]
    .map(Variable::new_unchecked)
    .to_vec();

    let values = vec![
        Some(Term::from(NamedNode::new_unchecked(dataset))),
        Some(Term::from(Literal::new_simple_literal("Name"))),
        Some(Term::from(Literal::new_simple_literal("Description"))),
        Some(Term::from(NamedNode::new_unchecked(
            "http://creativecommons.org/publicdomain/zero/1.0/",
        ))),
        Some(Term::from(BlankNode::new_unchecked("c"))),
        Some(Term::from(Literal::new_simple_literal("Creator"))),
        Some(Term::from(BlankNode::new_unchecked("d"))),
        Some(Term::from(NamedNode::new_unchecked(
            "https://example.org/download.csv",
        ))),
        Some(Term::from(Literal::new_simple_literal("text/csv"))),
    ];

    QuerySolution::from((variables, values))
}

/// Rebuilds a solution; `QuerySolution` is not `Clone`.
pub fn copy_solution(solution: &QuerySolution) -> QuerySolution {
    QuerySolution::from((solution.variables().to_vec(), solution.values().to_vec()))
}

/// Answers queries per source URL; unknown sources fail with `HTTP status 404`.
#[derive(Default)]
pub struct StaticEngine {
    responses: HashMap<String, Result<Vec<QuerySolution>, EngineError>>,
}

impl StaticEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `url` describe the given datasets.
    pub fn with_datasets(mut self, url: &str, datasets: &[&str]) -> Self {
        let rows = datasets.iter().map(|iri| dataset_row(iri)).collect();
        self.responses.insert(url.to_string(), Ok(rows));
        self
    }

    /// Makes queries against `url` fail with `message`.
    pub fn with_error(mut self, url: &str, message: &str) -> Self {
        self.responses
            .insert(url.to_string(), Err(EngineError::new(message)));
        self
    }
}

#[async_trait]
impl QueryEngine for StaticEngine {
    async fn query_bindings(
        &self,
        _query: &str,
        sources: &[Url],
    ) -> Result<BindingStream, EngineError> {
        let source = sources
            .first()
            .map(|url| url.as_str().to_string())
            .unwrap_or_default();

        match self.responses.get(&source) {
            Some(Ok(rows)) => {
                let rows: Vec<_> = rows.iter().map(|row| Ok(copy_solution(row))).collect();
                Ok(Box::pin(futures::stream::iter(rows)))
            }
            Some(Err(e)) => Err(e.clone()),
            None => Err(EngineError::new(format!(
                "Could not query {} (HTTP status 404)",
                source
            ))),
        }
    }
}

/// Dereferencer that finds nothing anywhere.
pub struct EmptyDereferencer;

#[async_trait]
impl Dereferencer for EmptyDereferencer {
    async fn dereference(&self, _url: &Url) -> Result<QuadStream, EngineError> {
        Ok(Box::pin(futures::stream::empty()))
    }
}
