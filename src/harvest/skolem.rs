//! Deterministic node ids for creator and distribution nodes.
//!
//! The query engine hands out blank nodes that are scoped to their source
//! (or skolem IRIs standing in for them). Their labels are not usable as
//! stored node ids, so each scoped identifier is hashed into an opaque id:
//! `b` followed by the hex of the first 16 bytes of its SHA-256 digest.
//! The same identifier always yields the same id, in every run.

use std::collections::HashMap;

use oxrdf::{BlankNode, Term};
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Returns the source-scoped identifier of a bound term.
pub fn scoped_identifier(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_string(),
        Term::BlankNode(node) => format!("_:{}", node.as_str()),
        other => other.to_string(),
    }
}

/// Derives the node id for a scoped identifier.
pub fn node_id(scoped_identifier: &str) -> BlankNode {
    let digest = Sha256::digest(scoped_identifier.as_bytes());
    BlankNode::new_unchecked(format!("b{}", hex::encode(&digest[..16])))
}

/// Node id allocator that rejects two identifiers hashing to the same id.
#[derive(Debug, Default)]
pub struct NodeIds {
    issued: HashMap<BlankNode, String>,
}

impl NodeIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node for a bound creator/distribution term.
    pub fn node_for(&mut self, term: &Term) -> Result<BlankNode, AppError> {
        let identifier = scoped_identifier(term);
        let node = node_id(&identifier);

        match self.issued.get(&node) {
            Some(existing) if *existing != identifier => Err(AppError::NodeIdCollision {
                first: existing.clone(),
                second: identifier,
            }),
            Some(_) => Ok(node),
            None => {
                self.issued.insert(node.clone(), identifier);
                Ok(node)
            }
        }
    }

    /// Number of distinct nodes issued so far.
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}
