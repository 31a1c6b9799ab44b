//! Fetch command handler.

use color_eyre::Result;
use reqwest::Url;

use crate::config::Config;
use crate::context::Context;
use crate::harvest::dataset_iris;

use super::App;

impl App {
    /// Harvest a URL and print what was found. Nothing is stored.
    pub async fn run_fetch(&self, url: &str, dereference: bool) -> Result<()> {
        let url = Url::parse(url)?;
        let ctx = Context::from_config(Config::load()?)?;

        if dereference {
            let dataset = ctx.fetcher.dereference(&url).await?;
            let iris = dataset_iris(&dataset)?;
            println!("{} statements, {} datasets:", dataset.len(), iris.len());
            for iri in iris {
                println!("  {}", iri.as_str());
            }
            return Ok(());
        }

        let datasets = ctx.fetcher.fetch(&url).await?;
        for dataset in &datasets {
            print!("{}", dataset.to_trig()?);
        }
        tracing::info!(datasets = datasets.len(), "Printed harvested datasets");
        Ok(())
    }
}
