//! Crawl command handler.

use color_eyre::Result;

use crate::config::Config;
use crate::context::Context;
use crate::di::FromRef;
use crate::services::CrawlerService;

use super::App;

impl App {
    /// Crawl stale registrations once, or forever with `--watch`.
    pub async fn run_crawl(&self, watch: bool) -> Result<()> {
        let config = Config::load()?;
        let interval = config.crawler.interval();
        let stale_after = config.crawler.stale_after();

        let ctx = Context::from_config(config)?;
        let crawler = CrawlerService::from_ref(&ctx);

        if watch {
            tracing::info!(
                interval_secs = interval.as_secs(),
                stale_after_secs = stale_after.as_secs(),
                "Starting crawler"
            );
            tokio::select! {
                result = crawler.run(interval, stale_after) => result?,
                _ = tokio::signal::ctrl_c() => tracing::info!("Crawler shutting down"),
            }
            return Ok(());
        }

        let cutoff = chrono::Utc::now() - chrono::Duration::from_std(stale_after)?;
        let summary = crawler.crawl(cutoff).await?;
        println!(
            "Read {} registrations: {} valid, {} failed",
            summary.read, summary.succeeded, summary.failed
        );
        Ok(())
    }
}
