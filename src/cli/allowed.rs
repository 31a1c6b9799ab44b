//! Allowed command handler.

use color_eyre::Result;

use crate::config::Config;
use crate::context::Context;
use crate::di::FromRef;
use crate::repositories::AllowedDomainRepository;

use super::App;

impl App {
    /// Print whether any of the domain names is allowlisted.
    pub async fn run_allowed(&self, domains: &[String]) -> Result<()> {
        let ctx = Context::from_config(Config::load()?)?;
        let allowed = AllowedDomainRepository::from_ref(&ctx)
            .contains(domains)
            .await?;

        println!("{}", if allowed { "allowed" } else { "not allowed" });
        Ok(())
    }
}
