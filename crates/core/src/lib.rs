//! FitTrack core types and utilities

pub mod error;
pub mod routes;
pub mod storage;
pub mod token;

pub use error::{CoreError, CoreResult};
pub use routes::{Page, RouteEntry, route_table};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use token::{TokenStatus, decode_expiry};
