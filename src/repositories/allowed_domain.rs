//! Allowed domain repository: the allowlist of registrable domain names.

use oxrdf::{Literal, NamedNode};

use crate::context::{AppConfig, AppStore, Context};
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::QueryExt;
use crate::vocab::ALLOWED_DOMAIN_NAME;

const CONTAINS_QUERY: &str = r#"
SELECT * WHERE {
  GRAPH $graph {
    ?s $property ?domainNames .
    VALUES ?domainNames { $domains }
  }
}"#;

/// Repository answering allowlist lookups. Every lookup queries the store.
#[derive(FromContext, Clone)]
pub struct AllowedDomainRepository {
    store: AppStore,
    config: AppConfig,
}

impl AllowedDomainRepository {
    /// Returns true if any of `domain_names` is on the allowlist.
    pub async fn contains(&self, domain_names: &[String]) -> Result<bool, AppError> {
        if domain_names.is_empty() {
            return Ok(false);
        }

        let graph = &self.config.graphs.allowed_domain_names;
        let graph = NamedNode::new(graph.as_str())
            .map_err(|e| AppError::InvalidUrl(format!("{}: {}", graph, e)))?;

        self.store
            .query(CONTAINS_QUERY)
            .param("graph", graph)
            .param("property", ALLOWED_DOMAIN_NAME.into_owned())
            .param_list(
                "domains",
                domain_names
                    .iter()
                    .map(|name| Literal::new_simple_literal(name.as_str())),
            )
            .exists()
            .await
    }
}
