//! Crawler service: re-harvests registrations that have gone stale.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::context::{AppFetcher, Context};
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::Registration;
use crate::repositories::{DatasetRepository, RegistrationRepository};

/// Outcome of one crawl run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Registrations picked up by the run.
    pub read: usize,
    /// Registrations that produced datasets and were recorded as valid.
    pub succeeded: usize,
    /// Registrations that were invalid or could not be recorded.
    pub failed: usize,
}

/// Service that re-reads registrations and records the outcome.
#[derive(FromContext, Clone)]
pub struct CrawlerService {
    registrations: RegistrationRepository,
    datasets: DatasetRepository,
    fetcher: AppFetcher,
}

impl CrawlerService {
    /// Harvests every registration last read before `cutoff`.
    ///
    /// A failure to record one registration is logged and the run moves on.
    pub async fn crawl(&self, cutoff: DateTime<Utc>) -> Result<CrawlSummary, AppError> {
        let registrations = self
            .registrations
            .find_registrations_read_before(cutoff)
            .await?;
        tracing::info!(count = registrations.len(), %cutoff, "Crawling registrations");

        let mut summary = CrawlSummary::default();
        for registration in &registrations {
            summary.read += 1;
            match self.crawl_registration(registration).await {
                Ok(true) => summary.succeeded += 1,
                Ok(false) => summary.failed += 1,
                Err(e) => {
                    tracing::error!(url = %registration.url, error = %e, "Could not record registration");
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            read = summary.read,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Crawl finished"
        );
        Ok(summary)
    }

    /// Harvests one registration and stores its successor record.
    ///
    /// Returns whether the registration is valid after this read.
    async fn crawl_registration(&self, registration: &Registration) -> Result<bool, AppError> {
        let now = Utc::now();

        let (successor, valid) = match self.fetcher.fetch(&registration.url).await {
            Ok(datasets) => {
                self.datasets.store(&datasets).await?;
                let iris = datasets.iter().map(|d| d.iri().into_owned()).collect();
                (registration.read(iris, 200, true, now), true)
            }
            Err(AppError::Http {
                status_code,
                message,
            }) => {
                tracing::warn!(url = %registration.url, status_code, %message, "Source responded with an error");
                (registration.read(Vec::new(), status_code, false, now), false)
            }
            Err(AppError::NoDatasetFound(message)) => {
                tracing::warn!(url = %registration.url, %message, "No datasets found");
                (registration.read(Vec::new(), 200, false, now), false)
            }
            Err(e) => return Err(e),
        };

        self.registrations.store(&successor).await?;
        Ok(valid)
    }

    /// Crawls forever, pausing `interval` between runs.
    ///
    /// Each run picks up registrations not read within `stale_after`. A failed
    /// run is logged and retried after the next pause.
    pub async fn run(&self, interval: Duration, stale_after: Duration) -> Result<(), AppError> {
        let stale_after = chrono::Duration::from_std(stale_after)
            .map_err(|e| AppError::Internal(format!("stale_after out of range: {}", e)))?;

        loop {
            let cutoff = Utc::now() - stale_after;
            if let Err(e) = self.crawl(cutoff).await {
                tracing::error!(error = %e, "Crawl failed");
            }
            tokio::time::sleep(interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::di::FromRef;
    use crate::graph::testing::{row, RecordingStore, StoreCall};
    use crate::harvest::testing::{EmptyDereferencer, StaticEngine};
    use crate::harvest::DatasetFetcher;
    use std::sync::Arc;

    fn service(store: RecordingStore, engine: StaticEngine) -> (CrawlerService, Arc<RecordingStore>) {
        let store = Arc::new(store);
        let fetcher = DatasetFetcher::new(Arc::new(engine), Arc::new(EmptyDereferencer));
        let ctx = Context::new(store.clone(), fetcher, Config::default());
        (CrawlerService::from_ref(&ctx), store)
    }

    fn stale(url: &str) -> crate::graph::Row {
        row(&[("s", url), ("datePosted", "2024-01-01T00:00:00.000Z")])
    }

    fn inserts(store: &RecordingStore) -> Vec<String> {
        store
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::Insert(trig) => Some(trig),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_crawl_records_success_and_failures() {
        let store = RecordingStore::new().with_rows(vec![
            stale("https://example.org/catalog"),
            stale("https://example.com/gone"),
            stale("https://example.net/empty"),
        ]);
        let engine = StaticEngine::new()
            .with_datasets("https://example.org/catalog", &["https://example.org/dataset/1"])
            .with_error("https://example.com/gone", "Could not query (HTTP status 410)")
            .with_datasets("https://example.net/empty", &[]);
        let (service, store) = service(store, engine);

        let summary = service.crawl(Utc::now()).await.unwrap();
        assert_eq!(
            summary,
            CrawlSummary {
                read: 3,
                succeeded: 1,
                failed: 2
            }
        );

        let calls = store.calls();
        assert!(matches!(calls[0], StoreCall::Select(_)));
        assert!(matches!(
            &calls[1],
            StoreCall::Replace { graph, .. } if graph == "https://example.org/dataset/1"
        ));

        let inserts = inserts(&store);
        assert_eq!(inserts.len(), 3);
        assert!(inserts[0].contains("https://example.org/dataset/1"));
        assert!(!inserts[0].contains("validUntil"));
        assert!(inserts[1].contains("410"));
        assert!(inserts[1].contains("validUntil"));
        assert!(inserts[2].contains("validUntil"));
    }

    #[tokio::test]
    async fn test_store_failure_does_not_stop_the_crawl() {
        let store = RecordingStore::new()
            .with_rows(vec![
                stale("https://example.org/catalog"),
                stale("https://example.com/gone"),
            ])
            .failing("PUT", 500);
        let engine = StaticEngine::new()
            .with_datasets("https://example.org/catalog", &["https://example.org/dataset/1"]);
        let (service, store) = service(store, engine);

        let summary = service.crawl(Utc::now()).await.unwrap();
        assert_eq!(summary.read, 2);
        assert_eq!(summary.failed, 2);

        // Only the unreachable source got a new registration record
        let inserts = inserts(&store);
        assert_eq!(inserts.len(), 1);
        assert!(inserts[0].contains("https://example.com/gone"));
    }

    #[tokio::test]
    async fn test_crawl_without_stale_registrations() {
        let (service, store) = service(RecordingStore::new(), StaticEngine::new());
        let summary = service.crawl(Utc::now()).await.unwrap();
        assert_eq!(summary, CrawlSummary::default());
        assert_eq!(store.calls().len(), 1);
    }
}
