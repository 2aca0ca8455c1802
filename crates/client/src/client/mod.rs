//! FitTrack API client

pub mod auth;
pub mod error;
pub mod exercises;
pub mod profile;
pub mod refresh;
pub mod trainings;

use error::ClientError;
use fittrack_core::storage::{MemoryTokenStore, TokenStore};
use fittrack_core::token::decode_expiry;
use refresh::{RefreshHandle, SessionExpiredHook, spawn_refresh_worker};
use reqwest::{Client, ClientBuilder, header};
use std::sync::Arc;
use std::time::Duration;

/// Environment variable holding the backend base URL
pub const ENV_BASE_URL: &str = "FITTRACK_API_URL";

/// FitTrack API client.
///
/// Cloning is cheap; clones share the token store and the refresh worker.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    refresh: RefreshHandle,
}

impl ApiClient {
    /// Create a new client with default configuration.
    ///
    /// Must be called from within a Tokio runtime (the refresh worker is
    /// spawned on it).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    #[must_use]
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Create a client configured from the `FITTRACK_API_URL` environment
    /// variable
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = std::env::var(ENV_BASE_URL)
            .map_err(|_| ClientError::Configuration(format!("{ENV_BASE_URL} is not set")))?;
        Self::new(base_url)
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store backing this client
    #[must_use]
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Create a request builder, attaching a bearer token when one is
    /// available.
    ///
    /// This is the interception point every endpoint goes through:
    /// - no stored access token: the request goes out unauthenticated;
    /// - stored token still valid: it is attached as `Authorization: Bearer`;
    /// - stored token expired or undecodable: a refresh is performed first
    ///   (shared with any other request that hits this at the same time) and
    ///   the new token is attached. If the refresh fails, the request fails
    ///   with that error and the client has already been logged out.
    pub async fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.client.request(method, url);

        match self.bearer_token().await? {
            Some(token) => {
                Ok(request.header(header::AUTHORIZATION, format!("Bearer {token}")))
            }
            None => Ok(request),
        }
    }

    /// Resolve the token to attach, refreshing it if needed
    async fn bearer_token(&self) -> Result<Option<String>, ClientError> {
        let Some(token) = self.store.access_token().await? else {
            return Ok(None);
        };

        // An undecodable token counts as expired: refresh instead of sending
        // a token the backend will reject anyway.
        if !decode_expiry(&token).is_expired(chrono::Utc::now()) {
            return Ok(Some(token));
        }

        let fresh = self.refresh.fresh_token().await?;
        Ok(Some(fresh))
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }

    /// Execute a request whose success response carries no useful body
    pub async fn execute_empty(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(), ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    store: Option<Arc<dyn TokenStore>>,
    on_session_expired: Option<SessionExpiredHook>,
}

impl ApiClientBuilder {
    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Use the given token store instead of the in-memory default
    #[must_use]
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Install a callback invoked when a failed refresh forces a logout
    /// (the host application's cue to navigate to the login view)
    #[must_use]
    pub fn on_session_expired<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_session_expired = Some(Arc::new(hook));
        self
    }

    /// Build the client.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new();

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder = client_builder.user_agent("fittrack-client/0.1.0");
        }

        let client = client_builder.build()?;
        let store: Arc<dyn TokenStore> =
            self.store.unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));

        // The worker gets its own copy of the HTTP client so the refresh
        // call itself never re-enters the interception path.
        let refresh = spawn_refresh_worker(
            client.clone(),
            base_url.clone(),
            Arc::clone(&store),
            self.on_session_expired,
        );

        Ok(ApiClient {
            client,
            base_url,
            store,
            refresh,
        })
    }
}
