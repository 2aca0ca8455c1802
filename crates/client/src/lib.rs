//! FitTrack HTTP client
//!
//! A typed client for the FitTrack backend. Every request goes through a
//! single interception point that attaches the stored bearer token and, when
//! that token has expired, refreshes it first; concurrent requests share one
//! refresh call.

pub mod client;
pub mod types;

pub use client::error::{ClientError, RefreshError};
pub use client::{ApiClient, ApiClientBuilder};
