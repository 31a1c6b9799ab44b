//! Business logic services for the register.
//!
//! Services orchestrate the fetcher and repositories, using the
//! `FromContext` derive macro for dependency injection.

mod crawler;
mod registration;

pub use crawler::{CrawlSummary, CrawlerService};
pub use registration::RegistrationService;
