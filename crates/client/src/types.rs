//! Request and response types for the FitTrack API

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body for `POST /auth/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Credential pair returned by `POST /auth/token`.
///
/// The refresh endpoint reuses this shape but omits the refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub token_type: String,
}

/// Body for `POST /auth/refresh`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Success body of `POST /auth/refresh`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
}

/// User profile; fields are optional until the user fills them in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub height: Option<i32>,
}

/// Training summary as returned by the listing endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Training {
    pub training_id: i64,
    pub training_name: String,
    pub date: NaiveDate,
}

/// Body for creating a new training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRequest {
    pub training_name: String,
    pub date: NaiveDate,
}

/// Catalog entry from `GET /exercise/fetchall`; `exercise_name` is what a
/// set's `exercise_name` refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub exercise_name: String,
    pub muscle_group: String,
}

/// One exercise set within a training.
///
/// `set_id` is present on sets read back from the backend; new sets are sent
/// without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_id: Option<i64>,
    pub exercise_name: String,
    pub repetitions: u32,
    pub weight: f64,
}

/// Full detail view of one training (`GET /trainings/details/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingDetails {
    pub name: String,
    pub date: NaiveDate,
    pub sets: Vec<ExerciseSet>,
}

/// Sort key accepted by the sorted trainings listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Name,
    Date,
}

impl SortBy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Date => "date",
        }
    }
}

/// Sort direction accepted by the sorted trainings listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}
