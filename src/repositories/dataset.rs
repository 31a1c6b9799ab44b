//! Dataset repository: one named graph per dataset description.

use crate::context::{AppStore, Context};
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::DatasetGraph;

/// Repository writing harvested dataset descriptions.
#[derive(FromContext, Clone)]
pub struct DatasetRepository {
    store: AppStore,
}

impl DatasetRepository {
    /// Replaces the named graph of every dataset, one request at a time.
    ///
    /// Stops at the first failed write; graphs written before it stay replaced.
    pub async fn store(&self, datasets: &[DatasetGraph]) -> Result<(), AppError> {
        for dataset in datasets {
            let trig = dataset.to_trig()?;
            self.store
                .replace_graph(&dataset.iri().into_owned(), trig)
                .await?;
            tracing::debug!(dataset = %dataset.iri(), statements = dataset.len(), "Replaced dataset graph");
        }
        Ok(())
    }
}
