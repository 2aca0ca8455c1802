//! Exercise catalog API client methods

use super::{ApiClient, error::ClientError};
use crate::types::Exercise;
use reqwest::Method;

impl ApiClient {
    /// Fetch the full exercise catalog.
    ///
    /// The create/update-training views pick `exercise_name` values from
    /// this list. An empty catalog is a 404 on the backend, surfaced here as
    /// [`ClientError::NotFound`].
    pub async fn list_exercises(&self) -> Result<Vec<Exercise>, ClientError> {
        let req = self.request(Method::GET, "/exercise/fetchall").await?;
        self.execute(req).await
    }
}
