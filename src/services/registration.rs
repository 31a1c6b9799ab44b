//! Registration service: accepts new source URLs into the register.

use chrono::Utc;
use reqwest::Url;

use crate::context::{AppFetcher, Context};
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::Registration;
use crate::repositories::{AllowedDomainRepository, DatasetRepository, RegistrationRepository};

/// Service that validates, harvests and records a new registration.
#[derive(FromContext, Clone)]
pub struct RegistrationService {
    allowed_domains: AllowedDomainRepository,
    registrations: RegistrationRepository,
    datasets: DatasetRepository,
    fetcher: AppFetcher,
}

impl RegistrationService {
    /// Registers `url` after checking it against the allowlist.
    ///
    /// The URL must be http(s) and its host, or the host without a leading
    /// `www.`, must be allowlisted. Nothing is written unless the source
    /// yields at least one dataset.
    pub async fn register(&self, url: &str) -> Result<Registration, AppError> {
        let url = Url::parse(url).map_err(|e| AppError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::InvalidUrl(format!(
                "{}: only http and https URLs can be registered",
                url
            )));
        }
        let host = url
            .host_str()
            .ok_or_else(|| AppError::InvalidUrl(format!("{}: missing host", url)))?
            .to_string();

        if !self.allowed_domains.contains(&domain_candidates(&host)).await? {
            return Err(AppError::DomainNotAllowed(host));
        }

        let datasets = self.fetcher.fetch(&url).await?;
        self.datasets.store(&datasets).await?;

        let now = Utc::now();
        let iris = datasets.iter().map(|d| d.iri().into_owned()).collect();
        let registration = Registration::new(url, now).read(iris, 200, true, now);
        self.registrations.store(&registration).await?;

        tracing::info!(url = %registration.url, datasets = registration.datasets.len(), "Registered URL");
        Ok(registration)
    }
}

/// Domain names to look up for a host: the host itself and, for `www.`
/// hosts, the bare domain.
fn domain_candidates(host: &str) -> Vec<String> {
    let mut candidates = vec![host.to_string()];
    if let Some(bare) = host.strip_prefix("www.") {
        if !bare.is_empty() {
            candidates.push(bare.to_string());
        }
    }
    candidates
}
