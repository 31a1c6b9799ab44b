//! Registration model: a source URL and the outcome of its last harvest.

use chrono::{DateTime, SecondsFormat, Utc};
use oxrdf::NamedNode;
use reqwest::Url;

/// A registered source URL.
///
/// Registrations are replaced wholesale after every harvest; see
/// [`Registration::read`] for how the successor record is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Source URL, the identity of the registration.
    pub url: Url,
    /// When the URL was first registered.
    pub date_posted: DateTime<Utc>,
    /// When the URL was last harvested.
    pub date_read: Option<DateTime<Utc>>,
    /// Deadline for the source to become valid again.
    pub valid_until: Option<DateTime<Utc>>,
    /// HTTP status of the last harvest.
    pub status_code: Option<u16>,
    /// Datasets produced by the last harvest.
    pub datasets: Vec<NamedNode>,
}

impl Registration {
    /// Creates a registration that has never been read.
    pub fn new(url: Url, date_posted: DateTime<Utc>) -> Self {
        Self {
            url,
            date_posted,
            date_read: None,
            valid_until: None,
            status_code: None,
            datasets: Vec::new(),
        }
    }

    /// Returns the registration as it stands after a harvest at `now`.
    ///
    /// A valid harvest clears `valid_until`. An invalid one keeps an existing
    /// deadline, or starts one at `now`.
    pub fn read(
        &self,
        datasets: Vec<NamedNode>,
        status_code: u16,
        valid: bool,
        now: DateTime<Utc>,
    ) -> Self {
        let valid_until = if valid {
            None
        } else {
            Some(self.valid_until.unwrap_or(now))
        };

        Self {
            url: self.url.clone(),
            date_posted: self.date_posted,
            date_read: Some(now),
            valid_until,
            status_code: Some(status_code),
            datasets,
        }
    }
}

/// Formats a timestamp the way every registry timestamp is stored.
///
/// RFC 3339 in UTC with millisecond precision (`2024-01-01T00:00:00.000Z`).
/// Read-before filtering compares these strings lexicographically, which only
/// matches chronological order while every stored value uses this exact form.
pub fn canonical_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
