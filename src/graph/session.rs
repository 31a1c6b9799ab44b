//! Authentication session shared by all store requests.

use std::future::Future;

use tokio::sync::Mutex;

use crate::error::AppError;

/// Cached store token.
///
/// The lock is held while logging in, so concurrent callers wait for one
/// login instead of each starting their own.
#[derive(Debug, Default)]
pub struct Session {
    token: Mutex<Option<String>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token, if any.
    pub async fn current_token(&self) -> Option<String> {
        self.token.lock().await.clone()
    }

    pub async fn set(&self, token: String) {
        *self.token.lock().await = Some(token);
    }

    /// Drops the cached token so the next request logs in again.
    pub async fn invalidate(&self) {
        *self.token.lock().await = None;
    }

    /// Returns the cached token, logging in with `login` when there is none.
    pub async fn token_or_login<F, Fut>(&self, login: F) -> Result<String, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, AppError>>,
    {
        let mut token = self.token.lock().await;
        if let Some(token) = token.as_ref() {
            return Ok(token.clone());
        }

        let fresh = login().await?;
        *token = Some(fresh.clone());
        Ok(fresh)
    }
}
