//! Single-flight access-token refresh
//!
//! One worker task owns the entire refresh path. Requests that find an
//! expired access token send a message and suspend; the worker runs at most
//! one refresh call at a time and answers every request that queued while it
//! was in flight with the same outcome, in arrival order. There is no
//! flag-and-queue ordering to get wrong: the worker's mailbox is the queue.

use super::error::RefreshError;
use crate::types::{RefreshTokenRequest, RefreshTokenResponse};
use chrono::Utc;
use fittrack_core::storage::TokenStore;
use fittrack_core::token::decode_expiry;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Callback invoked when a failed refresh forces a logout.
///
/// The SDK's equivalent of the browser redirect to `/login`: the host
/// application decides what "go to the login view" means.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

struct RefreshRequest {
    reply: oneshot::Sender<Result<String, RefreshError>>,
}

/// Cheaply cloneable handle to the refresh worker
#[derive(Clone)]
pub struct RefreshHandle {
    tx: mpsc::Sender<RefreshRequest>,
}

impl RefreshHandle {
    /// Obtain an access token that is valid right now.
    ///
    /// Suspends until the in-flight refresh (if any) settles; every caller
    /// waiting on the same refresh receives the same token or the same error.
    pub async fn fresh_token(&self) -> Result<String, RefreshError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(RefreshRequest { reply })
            .await
            .map_err(|_| RefreshError::Canceled)?;
        rx.await.map_err(|_| RefreshError::Canceled)?
    }
}

/// Spawn the worker task and return a handle to it.
///
/// Must be called from within a Tokio runtime. The task exits when the last
/// handle is dropped.
pub(crate) fn spawn_refresh_worker(
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    on_session_expired: Option<SessionExpiredHook>,
) -> RefreshHandle {
    let (tx, rx) = mpsc::channel(64);
    let worker = RefreshWorker {
        http,
        base_url,
        store,
        on_session_expired,
        rx,
    };
    tokio::spawn(worker.run());
    RefreshHandle { tx }
}

struct RefreshWorker {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    on_session_expired: Option<SessionExpiredHook>,
    rx: mpsc::Receiver<RefreshRequest>,
}

impl RefreshWorker {
    async fn run(mut self) {
        while let Some(first) = self.rx.recv().await {
            let outcome = self.settle().await;

            // Everyone who queued while the refresh was in flight settles
            // with the same outcome, in arrival order.
            let mut waiters = vec![first];
            while let Ok(request) = self.rx.try_recv() {
                waiters.push(request);
            }
            for waiter in waiters {
                let _ = waiter.reply.send(outcome.clone());
            }
        }
    }

    /// Resolve one trigger: reuse a token a previous batch already stored, or
    /// run a single refresh attempt.
    async fn settle(&self) -> Result<String, RefreshError> {
        // The caller judged the token expired before its message reached us;
        // a previous batch may have stored a fresh one since. Re-checking
        // here keeps it at exactly one refresh call per expiry.
        match self.store.access_token().await {
            Ok(Some(token)) if !decode_expiry(&token).is_expired(Utc::now()) => {
                debug!("stored access token is already fresh, skipping refresh");
                return Ok(token);
            }
            Ok(None) => {
                // No access token at all means a failed refresh just tore the
                // session down; answer the racing request without running a
                // second logout.
                match self.store.refresh_token().await {
                    Ok(None) => return Err(RefreshError::NoRefreshToken),
                    Ok(Some(_)) => {}
                    Err(err) => return Err(RefreshError::Storage(err.to_string())),
                }
            }
            Ok(Some(_)) => {}
            Err(err) => return Err(RefreshError::Storage(err.to_string())),
        }

        match self.refresh().await {
            Ok(token) => {
                debug!("access token refreshed");
                Ok(token)
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed, forcing logout");
                self.force_logout().await;
                Err(err)
            }
        }
    }

    /// One call to the backend's refresh endpoint. Single attempt: no retry,
    /// and no timeout beyond the HTTP client's own.
    async fn refresh(&self) -> Result<String, RefreshError> {
        let refresh_token = self
            .store
            .refresh_token()
            .await
            .map_err(|err| RefreshError::Storage(err.to_string()))?
            .ok_or(RefreshError::NoRefreshToken)?;

        let url = format!("{}/auth/refresh", self.base_url);
        let response = self
            .http
            .post(url)
            .json(&RefreshTokenRequest { refresh_token })
            .send()
            .await
            .map_err(|err| RefreshError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(RefreshError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body: RefreshTokenResponse = response
            .json()
            .await
            .map_err(|err| RefreshError::Transport(err.to_string()))?;

        self.store
            .set_access_token(&body.access_token)
            .await
            .map_err(|err| RefreshError::Storage(err.to_string()))?;

        Ok(body.access_token)
    }

    /// Clear both credentials and notify the host application, once per
    /// failed refresh regardless of how many requests were waiting on it.
    async fn force_logout(&self) {
        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "failed to clear stored tokens");
        }
        match &self.on_session_expired {
            Some(hook) => hook(),
            None => warn!("session expired; application should navigate to /login"),
        }
    }
}
