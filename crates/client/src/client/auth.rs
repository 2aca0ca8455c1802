//! Authentication API client methods

use super::{ApiClient, error::ClientError};
use crate::types::{AuthTokens, RegisterRequest};
use reqwest::Method;

impl ApiClient {
    /// Register a new user account
    pub async fn register(&self, request: RegisterRequest) -> Result<(), ClientError> {
        let req = self.request(Method::POST, "/auth/").await?.json(&request);
        self.execute_empty(req).await
    }

    /// Log in with username and password (OAuth2 password form), storing the
    /// returned credential pair for later requests
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthTokens, ClientError> {
        let req = self
            .request(Method::POST, "/auth/token")
            .await?
            .form(&[("username", username), ("password", password)]);
        let tokens: AuthTokens = self.execute(req).await?;

        match &tokens.refresh_token {
            Some(refresh) => {
                self.store()
                    .set_tokens(&tokens.access_token, refresh)
                    .await?;
            }
            None => self.store().set_access_token(&tokens.access_token).await?,
        }

        Ok(tokens)
    }

    /// Forget the stored credentials. Client-side only; the backend keeps no
    /// session to invalidate.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.store().clear().await?;
        Ok(())
    }
}
