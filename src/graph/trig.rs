//! TriG serialization of request bodies.

use oxrdf::Quad;
use oxrdfio::{RdfFormat, RdfSerializer};

use crate::error::AppError;

/// Content type of every write request body.
pub const TRIG_CONTENT_TYPE: &str = "application/x-trig";

/// Serializes statements as a TriG document.
pub fn serialize_trig(quads: &[Quad]) -> Result<String, AppError> {
    let mut serializer = RdfSerializer::from_format(RdfFormat::TriG).for_writer(Vec::new());
    for quad in quads {
        serializer
            .serialize_quad(quad)
            .map_err(|e| AppError::Serialization(e.to_string()))?;
    }
    let bytes = serializer
        .finish()
        .map_err(|e| AppError::Serialization(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| AppError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::{Literal, NamedNode};

    #[test]
    fn test_serialize_trig_keeps_graph_and_escapes_literals() {
        let quad = Quad::new(
            NamedNode::new_unchecked("https://example.org/s"),
            NamedNode::new_unchecked("https://example.org/p"),
            Literal::new_simple_literal("line\n\"two\""),
            NamedNode::new_unchecked("https://example.org/g"),
        );

        let trig = serialize_trig(&[quad]).unwrap();
        assert!(trig.contains("<https://example.org/g>"));
        assert!(trig.contains("<https://example.org/s>"));
        assert!(trig.contains(r#"\"two\""#));
    }

    #[test]
    fn test_serialize_empty() {
        assert_eq!(serialize_trig(&[]).unwrap().trim(), "");
    }
}
