//! CLI module for the dataset register.
//!
//! Subcommands:
//! - `crawl`: Re-harvest stale registrations, once or on a schedule
//! - `register`: Register a new source URL
//! - `fetch`: Harvest a URL and print the result without storing it
//! - `allowed`: Check domain names against the allowlist

mod allowed;
mod crawl;
mod fetch;
mod register;

use clap::{Parser, Subcommand};

/// Dataset register - harvests dataset descriptions into a triplestore
#[derive(Parser)]
#[command(name = "dataset-register")]
#[command(about = "Harvests dataset descriptions from registered URLs into a triplestore")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Re-harvest registrations that were not read recently
    Crawl {
        /// Keep crawling at the configured interval
        #[arg(long)]
        watch: bool,
    },

    /// Register a URL whose domain is on the allowlist
    Register {
        /// URL of the dataset description or catalog
        url: String,
    },

    /// Harvest a URL and print the datasets as TriG, without storing anything
    Fetch {
        /// URL to harvest
        url: String,

        /// Retrieve the URL as an RDF document instead of querying it
        #[arg(long)]
        dereference: bool,
    },

    /// Check whether any of the domain names is allowlisted
    Allowed {
        /// Domain names to look up
        #[arg(required = true)]
        domains: Vec<String>,
    },
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Crawl { watch } => self.run_crawl(watch).await,
            Command::Register { ref url } => self.run_register(url).await,
            Command::Fetch {
                ref url,
                dereference,
            } => self.run_fetch(url, dereference).await,
            Command::Allowed { ref domains } => self.run_allowed(domains).await,
        }
    }
}
