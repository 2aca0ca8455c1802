//! Trainings API client methods

use super::{ApiClient, error::ClientError};
use crate::types::{ExerciseSet, SortBy, SortOrder, Training, TrainingDetails, TrainingRequest};
use reqwest::Method;
use serde_json::json;

impl ApiClient {
    /// Page through a user's trainings in the given order (the backend
    /// returns five per page)
    pub async fn list_trainings(
        &self,
        user_id: i64,
        sort_by: SortBy,
        order: SortOrder,
        offset: u32,
    ) -> Result<Vec<Training>, ClientError> {
        let req = self
            .request(Method::GET, &format!("/trainings/fetch/sorted/{user_id}"))
            .await?
            .query(&[("sort_by", sort_by.as_str()), ("order", order.as_str())])
            .query(&[("offset", offset)]);

        // The backend answers `null` rather than `[]` when nothing matches
        let trainings: Option<Vec<Training>> = self.execute(req).await?;
        Ok(trainings.unwrap_or_default())
    }

    /// Search a user's trainings by name fragment
    pub async fn search_trainings(
        &self,
        user_id: i64,
        characters: &str,
    ) -> Result<Vec<Training>, ClientError> {
        let req = self
            .request(Method::GET, "/trainings/fetch/search")
            .await?
            .query(&[("characters", characters)])
            .query(&[("user_id", user_id)]);

        let trainings: Option<Vec<Training>> = self.execute(req).await?;
        Ok(trainings.unwrap_or_default())
    }

    /// Fetch one training with its exercise sets
    pub async fn training_details(
        &self,
        training_id: i64,
    ) -> Result<TrainingDetails, ClientError> {
        let req = self
            .request(Method::GET, &format!("/trainings/details/{training_id}"))
            .await?;
        self.execute(req).await
    }

    /// Create a training together with its exercise sets
    pub async fn create_training(
        &self,
        user_id: i64,
        training: &TrainingRequest,
        sets: &[ExerciseSet],
    ) -> Result<(), ClientError> {
        let req = self
            .request(Method::POST, "/trainings/")
            .await?
            .query(&[("user_id", user_id)])
            .json(&json!({ "training": training, "sets": sets }));
        self.execute_empty(req).await
    }

    /// Replace a training's exercise sets. Sets without a `set_id` are
    /// created; stored sets missing from `sets` are deleted.
    pub async fn update_training(
        &self,
        training_id: i64,
        sets: &[ExerciseSet],
    ) -> Result<(), ClientError> {
        let req = self
            .request(Method::PUT, &format!("/trainings/update/{training_id}"))
            .await?
            .json(&sets);
        self.execute_empty(req).await
    }

    /// Delete one of a user's trainings
    pub async fn delete_training(
        &self,
        training_id: i64,
        user_id: i64,
    ) -> Result<(), ClientError> {
        let req = self
            .request(
                Method::DELETE,
                &format!("/trainings/delete/{training_id}"),
            )
            .await?
            .query(&[("user_id", user_id)]);
        self.execute_empty(req).await
    }
}
