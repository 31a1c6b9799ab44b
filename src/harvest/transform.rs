//! Folds query result rows into one graph per dataset.
//!
//! Each row of [`SELECT_QUERY`](super::SELECT_QUERY) describes one dataset
//! together with one creator and one distribution. A dataset with several
//! distributions arrives as several rows, so rows are converted to statements
//! one at a time and accumulated with set semantics; once the result stream
//! ends, [`BindingsTransformer::finish`] hands out the per-dataset graphs.

use std::collections::BTreeMap;

use oxrdf::{Graph, GraphName, NamedNode, Quad, Subject, Term};
use sparesults::QuerySolution;

use crate::error::AppError;
use crate::harvest::query::SPARQL_LIMIT;
use crate::harvest::skolem::NodeIds;
use crate::models::DatasetGraph;
use crate::vocab::{
    dcat, dct, foaf, rdf, FieldMapping, CREATOR_FIELDS, DATASET_FIELDS, DISTRIBUTION_FIELDS,
};

/// Result of draining one query.
#[derive(Debug)]
pub struct Harvest {
    /// One graph per distinct dataset IRI, ordered by IRI.
    pub graphs: Vec<DatasetGraph>,
    /// Number of rows consumed.
    pub rows: usize,
    /// The row cap was reached, so the source may hold more than was read.
    pub truncated: bool,
}

/// Accumulates statements from query rows, partitioned by dataset.
#[derive(Debug)]
pub struct BindingsTransformer {
    graphs: BTreeMap<String, (NamedNode, Graph)>,
    node_ids: NodeIds,
    rows: usize,
    limit: usize,
}

impl Default for BindingsTransformer {
    fn default() -> Self {
        Self::with_limit(SPARQL_LIMIT)
    }
}

impl BindingsTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transformer that flags truncation at `limit` rows.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            graphs: BTreeMap::new(),
            node_ids: NodeIds::new(),
            rows: 0,
            limit,
        }
    }

    /// Converts one row and files its statements under their dataset graph.
    pub fn push(&mut self, binding: &QuerySolution) -> Result<(), AppError> {
        self.rows += 1;
        for quad in bindings_to_quads(binding, &mut self.node_ids)? {
            self.insert(quad);
        }
        Ok(())
    }

    /// Rows consumed so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    fn insert(&mut self, quad: Quad) {
        let label = match quad.graph_name {
            GraphName::NamedNode(ref label) => label.clone(),
            ref other => {
                tracing::warn!(graph = %other, "Dropping statement outside a dataset graph");
                return;
            }
        };

        let (_, graph) = self
            .graphs
            .entry(label.as_str().to_string())
            .or_insert_with(|| (label, Graph::new()));
        graph.insert(&oxrdf::Triple::from(quad));
    }

    /// Ends the harvest and returns the dataset graphs.
    pub fn finish(self) -> Harvest {
        let truncated = self.rows == self.limit;
        let graphs = self
            .graphs
            .into_values()
            .map(|(iri, graph)| DatasetGraph::new(iri, graph))
            .collect();

        Harvest {
            graphs,
            rows: self.rows,
            truncated,
        }
    }
}

/// Converts a single row into DCAT statements labelled with the dataset IRI.
///
/// Rows whose `?dataset` is not an IRI yield no statements: such datasets
/// cannot be addressed in the store. A row without `?dataset` at all cannot
/// come from [`SELECT_QUERY`](super::SELECT_QUERY) and is rejected.
pub fn bindings_to_quads(
    binding: &QuerySolution,
    node_ids: &mut NodeIds,
) -> Result<Vec<Quad>, AppError> {
    let dataset = match binding.get("dataset") {
        Some(Term::NamedNode(iri)) => iri.clone(),
        Some(other) => {
            tracing::warn!(dataset = %other, "Skipping dataset without IRI");
            return Ok(Vec::new());
        }
        None => {
            return Err(AppError::Internal(
                "query result row without ?dataset binding".to_string(),
            ))
        }
    };

    let subject = Subject::from(dataset.clone());
    let mut quads = vec![Quad::new(
        subject.clone(),
        rdf::TYPE.into_owned(),
        dcat::DATASET_CLASS.into_owned(),
        dataset.clone(),
    )];
    push_mapped(&mut quads, &subject, binding, DATASET_FIELDS, &dataset);

    if let Some(creator) = binding.get("creator") {
        let node = node_ids.node_for(creator)?;
        quads.push(Quad::new(
            subject.clone(),
            dct::CREATOR.into_owned(),
            node.clone(),
            dataset.clone(),
        ));
        quads.push(Quad::new(
            node.clone(),
            rdf::TYPE.into_owned(),
            foaf::ORGANIZATION_CLASS.into_owned(),
            dataset.clone(),
        ));
        push_mapped(&mut quads, &Subject::from(node), binding, CREATOR_FIELDS, &dataset);
    }

    if let Some(distribution) = binding.get("distribution") {
        let node = node_ids.node_for(distribution)?;
        quads.push(Quad::new(
            subject,
            dcat::DISTRIBUTION.into_owned(),
            node.clone(),
            dataset.clone(),
        ));
        quads.push(Quad::new(
            node.clone(),
            rdf::TYPE.into_owned(),
            dcat::DISTRIBUTION_CLASS.into_owned(),
            dataset.clone(),
        ));
        push_mapped(&mut quads, &Subject::from(node), binding, DISTRIBUTION_FIELDS, &dataset);
    }

    Ok(quads)
}

fn push_mapped(
    quads: &mut Vec<Quad>,
    subject: &Subject,
    binding: &QuerySolution,
    fields: &[FieldMapping],
    graph: &NamedNode,
) {
    for field in fields {
        if let Some(value) = binding.get(field.variable) {
            quads.push(Quad::new(
                subject.clone(),
                field.predicate.into_owned(),
                value.clone(),
                graph.clone(),
            ));
        }
    }
}
