//! Prefix standardization for dereferenced documents.

use oxrdf::{GraphName, NamedNode, Quad, Subject, Term};

use crate::vocab::schema::{HTTPS_NAMESPACE, NAMESPACE};

/// Rewrites every `http://schema.org/` IRI in a statement to `https://schema.org/`.
///
/// Literals, blank nodes and IRIs in other namespaces are left untouched.
pub fn standardize_schema_org(quad: Quad) -> Quad {
    rewrite_namespace(quad, NAMESPACE, HTTPS_NAMESPACE)
}

/// Rewrites `https://schema.org/` IRIs to `http://schema.org/`, the
/// namespace [`SELECT_QUERY`](super::SELECT_QUERY) matches.
pub fn schema_org_as_http(quad: Quad) -> Quad {
    rewrite_namespace(quad, HTTPS_NAMESPACE, NAMESPACE)
}

fn rewrite_namespace(quad: Quad, from: &str, to: &str) -> Quad {
    let subject = match quad.subject {
        Subject::NamedNode(node) => Subject::NamedNode(rewrite(node, from, to)),
        other => other,
    };
    let object = match quad.object {
        Term::NamedNode(node) => Term::NamedNode(rewrite(node, from, to)),
        other => other,
    };
    let graph_name = match quad.graph_name {
        GraphName::NamedNode(node) => GraphName::NamedNode(rewrite(node, from, to)),
        other => other,
    };

    Quad::new(subject, rewrite(quad.predicate, from, to), object, graph_name)
}

fn rewrite(node: NamedNode, from: &str, to: &str) -> NamedNode {
    match node.as_str().strip_prefix(from) {
        Some(local) => NamedNode::new_unchecked(format!("{}{}", to, local)),
        None => node,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::Literal;

    fn iri(value: &str) -> NamedNode {
        NamedNode::new_unchecked(value)
    }

    #[test]
    fn test_rewrites_every_position() {
        let quad = Quad::new(
            iri("http://schema.org/thing"),
            iri("http://schema.org/name"),
            iri("http://schema.org/Dataset"),
            iri("http://schema.org/graph"),
        );

        let quad = standardize_schema_org(quad);
        assert_eq!(quad.subject, Subject::from(iri("https://schema.org/thing")));
        assert_eq!(quad.predicate, iri("https://schema.org/name"));
        assert_eq!(quad.object, Term::from(iri("https://schema.org/Dataset")));
        assert_eq!(
            quad.graph_name,
            GraphName::NamedNode(iri("https://schema.org/graph"))
        );
    }

    #[test]
    fn test_leaves_other_terms_alone() {
        let quad = Quad::new(
            iri("https://example.org/dataset"),
            iri("https://schema.org/name"),
            Literal::new_simple_literal("http://schema.org/name"),
            GraphName::DefaultGraph,
        );

        assert_eq!(standardize_schema_org(quad.clone()), quad);
    }

    #[test]
    fn test_does_not_touch_lookalike_hosts() {
        let node = iri("http://schema.org.example.com/name");
        assert_eq!(rewrite(node.clone(), NAMESPACE, HTTPS_NAMESPACE), node);
    }

    #[test]
    fn test_schema_org_as_http() {
        let quad = Quad::new(
            iri("https://example.org/dataset"),
            iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
            iri("https://schema.org/Dataset"),
            GraphName::DefaultGraph,
        );

        let quad = schema_org_as_http(quad);
        assert_eq!(quad.subject, Subject::from(iri("https://example.org/dataset")));
        assert_eq!(quad.object, Term::from(iri("http://schema.org/Dataset")));
    }
}
