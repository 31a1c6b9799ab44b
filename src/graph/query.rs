//! Query builder for fluent SPARQL query construction.

use futures::{StreamExt, TryStreamExt};
use oxrdf::Term;

use crate::error::AppError;
use crate::graph::row::{Params, Row, RowStream};
use crate::graph::traits::SparqlExecutor;

/// A builder for constructing and executing SPARQL queries.
///
/// Parameters are referenced in the query text as `$name` and substituted
/// with the N-Triples form of the bound term, so IRIs and literals are
/// always escaped.
///
/// # Example
///
/// ```ignore
/// let rows = Query::new(&store, "SELECT * WHERE { ?s ?p $object }")
///     .param("object", NamedNode::new_unchecked("https://example.org/"))
///     .fetch_all()
///     .await?;
/// ```
pub struct Query<'a, E: SparqlExecutor + ?Sized> {
    executor: &'a E,
    sparql: String,
    params: Params,
}

impl<'a, E: SparqlExecutor + ?Sized> Query<'a, E> {
    pub fn new(executor: &'a E, sparql: &str) -> Self {
        Self {
            executor,
            sparql: sparql.to_string(),
            params: Params::new(),
        }
    }

    /// Binds `$name` to a single term.
    pub fn param(mut self, name: &str, value: impl Into<Term>) -> Self {
        self.params
            .insert(name.to_string(), value.into().to_string());
        self
    }

    /// Binds `$name` to a whitespace separated list of terms, for `VALUES` blocks.
    pub fn param_list<T, I>(mut self, name: &str, values: I) -> Self
    where
        T: Into<Term>,
        I: IntoIterator<Item = T>,
    {
        let rendered = values
            .into_iter()
            .map(|value| value.into().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.params.insert(name.to_string(), rendered);
        self
    }

    /// Returns the query text with all parameters substituted.
    pub fn render(&self) -> Result<String, AppError> {
        let mut rendered = String::with_capacity(self.sparql.len());
        let mut rest = self.sparql.as_str();

        while let Some(start) = rest.find('$') {
            rendered.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            let name = &after[..end];
            let value = self
                .params
                .get(name)
                .ok_or_else(|| AppError::Internal(format!("unbound query parameter: ${}", name)))?;
            rendered.push_str(value);
            rest = &after[end..];
        }
        rendered.push_str(rest);

        Ok(rendered)
    }

    /// Executes the query and returns a stream of rows.
    pub async fn execute(self) -> Result<RowStream<'a>, AppError> {
        let sparql = self.render()?;
        self.executor.execute_sparql(&sparql).await
    }

    /// Executes the query and collects all rows into a vector.
    pub async fn fetch_all(self) -> Result<Vec<Row>, AppError> {
        self.execute().await?.try_collect().await
    }

    /// Executes the query and returns the first row, if any.
    pub async fn fetch_one(self) -> Result<Option<Row>, AppError> {
        let mut stream = self.execute().await?;
        stream.next().await.transpose()
    }

    /// Returns true if the query yields at least one row.
    pub async fn exists(self) -> Result<bool, AppError> {
        Ok(self.fetch_one().await?.is_some())
    }
}

/// Extension trait providing a convenient `query()` method.
pub trait QueryExt: SparqlExecutor {
    fn query(&self, sparql: &str) -> Query<'_, Self> {
        Query::new(self, sparql)
    }
}

impl<E: SparqlExecutor + ?Sized> QueryExt for E {}
