//! User profile API client methods

use super::{ApiClient, error::ClientError};
use crate::types::Profile;
use reqwest::Method;

impl ApiClient {
    /// Fetch a user's profile; the backend creates an empty one on first read
    pub async fn get_profile(&self, user_id: i64) -> Result<Profile, ClientError> {
        let req = self
            .request(Method::GET, &format!("/profile/{user_id}"))
            .await?;
        self.execute(req).await
    }

    /// Update a user's profile fields
    pub async fn update_profile(
        &self,
        user_id: i64,
        profile: &Profile,
    ) -> Result<(), ClientError> {
        let req = self
            .request(Method::PUT, &format!("/profile/update/{user_id}"))
            .await?
            .json(profile);
        self.execute_empty(req).await
    }
}
