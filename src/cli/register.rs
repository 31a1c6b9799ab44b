//! Register command handler.

use color_eyre::Result;

use crate::config::Config;
use crate::context::Context;
use crate::di::FromRef;
use crate::services::RegistrationService;

use super::App;

impl App {
    /// Register a URL and report the datasets found there.
    pub async fn run_register(&self, url: &str) -> Result<()> {
        let ctx = Context::from_config(Config::load()?)?;
        let service = RegistrationService::from_ref(&ctx);

        let registration = service.register(url).await?;
        println!(
            "Registered {} with {} datasets:",
            registration.url,
            registration.datasets.len()
        );
        for dataset in &registration.datasets {
            println!("  {}", dataset.as_str());
        }
        Ok(())
    }
}
