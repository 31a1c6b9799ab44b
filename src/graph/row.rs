//! Row and streaming types for SPARQL query results.

use crate::error::AppError;
use futures::Stream;
use oxrdf::Term;
use sparesults::{
    QueryResultsFormat, QueryResultsParser, QuerySolution, ReaderQueryResultsParserOutput,
};
use std::collections::HashMap;
use std::fmt::Display;
use std::pin::Pin;
use std::str::FromStr;

/// Template parameters for SPARQL queries, already rendered as SPARQL terms.
pub type Params = HashMap<String, String>;

/// A stream of rows from a query result.
pub type RowStream<'a> = Pin<Box<dyn Stream<Item = Result<Row, AppError>> + Send + 'a>>;

/// A single row from a query result.
///
/// Unbound variables are absent from the row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    data: HashMap<String, Term>,
}

impl Row {
    /// Creates a new row from a map of variable names to terms.
    pub fn new(data: HashMap<String, Term>) -> Self {
        Self { data }
    }

    /// Parses the lexical value bound to a variable.
    ///
    /// IRIs and blank nodes parse from their identifier, literals from their
    /// lexical form.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unbound or its value does not parse.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let url: Url = row.get("s")?;
    /// let posted: DateTime<Utc> = row.get("datePosted")?;
    /// ```
    pub fn get<T>(&self, key: &str) -> Result<T, AppError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.get_opt(key)?
            .ok_or_else(|| AppError::Results(format!("variable not bound: {}", key)))
    }

    /// Parses the value bound to a variable, returning `None` if it is unbound.
    ///
    /// Still returns an error if the variable is bound but does not parse.
    pub fn get_opt<T>(&self, key: &str) -> Result<Option<T>, AppError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let Some(term) = self.data.get(key) else {
            return Ok(None);
        };
        let value = lexical_value(term);
        value.parse().map(Some).map_err(|e: T::Err| {
            AppError::Results(format!("failed to parse '{}' ({}): {}", key, value, e))
        })
    }

    /// Returns the term bound to a variable, if any.
    pub fn term(&self, key: &str) -> Option<&Term> {
        self.data.get(key)
    }

    /// Returns all bound variable names in this row.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<HashMap<String, Term>> for Row {
    fn from(data: HashMap<String, Term>) -> Self {
        Self::new(data)
    }
}

impl From<QuerySolution> for Row {
    fn from(solution: QuerySolution) -> Self {
        solution
            .iter()
            .map(|(variable, term)| (variable.as_str().to_string(), term.clone()))
            .collect::<HashMap<_, _>>()
            .into()
    }
}

fn lexical_value(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_string(),
        Term::BlankNode(node) => node.as_str().to_string(),
        Term::Literal(literal) => literal.value().to_string(),
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}

/// Decodes a `application/sparql-results+json` document into rows.
pub fn parse_results(body: &[u8]) -> Result<Vec<Row>, AppError> {
    let output = QueryResultsParser::from_format(QueryResultsFormat::Json)
        .for_reader(body)
        .map_err(|e| AppError::Results(e.to_string()))?;

    match output {
        ReaderQueryResultsParserOutput::Solutions(solutions) => solutions
            .map(|solution| {
                solution
                    .map(Row::from)
                    .map_err(|e| AppError::Results(e.to_string()))
            })
            .collect(),
        ReaderQueryResultsParserOutput::Boolean(_) => Err(AppError::Results(
            "expected SELECT solutions but got a boolean result".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use oxrdf::{Literal, NamedNode};

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Term::from(Literal::new_simple_literal(*v))))
            .collect::<HashMap<_, _>>()
            .into()
    }

    #[test]
    fn test_row_get_string() {
        let name: String = row(&[("name", "test")]).get("name").unwrap();
        assert_eq!(name, "test");
    }

    #[test]
    fn test_row_get_number() {
        let count: u16 = row(&[("status", "200")]).get("status").unwrap();
        assert_eq!(count, 200);
    }

    #[test]
    fn test_row_get_datetime() {
        let posted: DateTime<Utc> = row(&[("datePosted", "2024-01-02T03:04:05.000Z")])
            .get("datePosted")
            .unwrap();
        assert_eq!(posted.to_rfc3339(), "2024-01-02T03:04:05+00:00");
    }

    #[test]
    fn test_row_get_iri_without_brackets() {
        let row = Row::from(HashMap::from([(
            "s".to_string(),
            Term::from(NamedNode::new_unchecked("https://example.org/")),
        )]));
        let s: String = row.get("s").unwrap();
        assert_eq!(s, "https://example.org/");
    }

    #[test]
    fn test_row_get_missing_key() {
        let result: Result<String, _> = Row::default().get("missing");
        assert!(result.is_err());
    }

    #[test]
    fn test_row_get_unparseable() {
        let result: Result<u16, _> = row(&[("status", "abc")]).get("status");
        assert!(matches!(result, Err(AppError::Results(_))));
    }

    #[test]
    fn test_row_get_opt_missing() {
        let name: Option<String> = Row::default().get_opt("missing").unwrap();
        assert_eq!(name, None);
    }

    #[test]
    fn test_row_columns() {
        let row = row(&[("a", "1"), ("b", "2")]);
        let mut columns: Vec<_> = row.columns().collect();
        columns.sort();
        assert_eq!(columns, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_results() {
        let body = br#"{
            "head": {"vars": ["s", "validUntil"]},
            "results": {"bindings": [
                {"s": {"type": "uri", "value": "https://example.org/"},
                 "validUntil": {"type": "literal", "value": "2024-01-01T00:00:00.000Z",
                                "datatype": "http://www.w3.org/2001/XMLSchema#dateTime"}},
                {"s": {"type": "uri", "value": "https://example.com/"}}
            ]}
        }"#;

        let rows = parse_results(body).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(matches!(rows[0].term("s"), Some(Term::NamedNode(_))));
        match rows[0].term("validUntil") {
            Some(Term::Literal(literal)) => assert_eq!(
                literal.datatype().as_str(),
                "http://www.w3.org/2001/XMLSchema#dateTime"
            ),
            other => panic!("unexpected term: {other:?}"),
        }
        assert!(rows[1].term("validUntil").is_none());
    }

    #[test]
    fn test_parse_results_rejects_garbage() {
        assert!(matches!(
            parse_results(b"<html>"),
            Err(AppError::Results(_))
        ));
    }

    #[test]
    fn test_parse_results_rejects_boolean() {
        assert!(matches!(
            parse_results(br#"{"head": {}, "boolean": true}"#),
            Err(AppError::Results(_))
        ));
    }
}
