//! Harvested dataset description, stored as its own named graph.

use oxrdf::{Graph, NamedNode, NamedNodeRef, Quad};

use crate::error::AppError;
use crate::graph::serialize_trig;

/// The description of one dataset.
///
/// The dataset IRI doubles as the named graph label: every statement of the
/// description lives in the graph named after the dataset it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetGraph {
    iri: NamedNode,
    graph: Graph,
}

impl DatasetGraph {
    pub fn new(iri: NamedNode, graph: Graph) -> Self {
        Self { iri, graph }
    }

    /// Dataset IRI, also the graph label.
    pub fn iri(&self) -> NamedNodeRef<'_> {
        self.iri.as_ref()
    }

    /// Statements without their graph label.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Statements labelled with the dataset IRI.
    pub fn quads(&self) -> impl Iterator<Item = Quad> + '_ {
        self.graph
            .iter()
            .map(move |triple| triple.in_graph(self.iri.as_ref()).into_owned())
    }

    /// Serializes the description as TriG for a graph replace request.
    pub fn to_trig(&self) -> Result<String, AppError> {
        let quads: Vec<Quad> = self.quads().collect();
        serialize_trig(&quads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{dcat, rdf};
    use oxrdf::{GraphName, TripleRef};

    fn dataset() -> DatasetGraph {
        let iri = NamedNode::new_unchecked("https://example.org/dataset/1");
        let mut graph = Graph::new();
        graph.insert(TripleRef::new(iri.as_ref(), rdf::TYPE, dcat::DATASET_CLASS));
        DatasetGraph::new(iri, graph)
    }

    #[test]
    fn test_quads_are_labelled_with_dataset_iri() {
        let dataset = dataset();
        for quad in dataset.quads() {
            assert_eq!(quad.graph_name, GraphName::NamedNode(dataset.iri().into_owned()));
        }
        assert_eq!(dataset.quads().count(), 1);
    }

    #[test]
    fn test_to_trig_names_the_graph() {
        let trig = dataset().to_trig().unwrap();
        assert!(trig.contains("<https://example.org/dataset/1>"));
        assert!(trig.contains("http://www.w3.org/ns/dcat#Dataset"));
    }
}
