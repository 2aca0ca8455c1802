//! Credential storage
//!
//! The SDK persists exactly two strings: the access token and the refresh
//! token. Implementations only need read, write, and delete.

use crate::error::{CoreError, CoreResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Storage for the credential pair
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the stored access token, if any
    async fn access_token(&self) -> CoreResult<Option<String>>;

    /// Read the stored refresh token, if any
    async fn refresh_token(&self) -> CoreResult<Option<String>>;

    /// Replace the access token, leaving the refresh token untouched
    async fn set_access_token(&self, token: &str) -> CoreResult<()>;

    /// Replace both tokens (login / explicit re-authentication)
    async fn set_tokens(&self, access: &str, refresh: &str) -> CoreResult<()>;

    /// Delete both tokens (logout or irrecoverable refresh failure)
    async fn clear(&self) -> CoreResult<()>;
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct StoredTokens {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// In-process store, suitable for tests and short-lived tools
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: RwLock<StoredTokens>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn access_token(&self) -> CoreResult<Option<String>> {
        Ok(self.inner.read().await.access_token.clone())
    }

    async fn refresh_token(&self) -> CoreResult<Option<String>> {
        Ok(self.inner.read().await.refresh_token.clone())
    }

    async fn set_access_token(&self, token: &str) -> CoreResult<()> {
        self.inner.write().await.access_token = Some(token.to_string());
        Ok(())
    }

    async fn set_tokens(&self, access: &str, refresh: &str) -> CoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.access_token = Some(access.to_string());
        inner.refresh_token = Some(refresh.to_string());
        Ok(())
    }

    async fn clear(&self) -> CoreResult<()> {
        *self.inner.write().await = StoredTokens::default();
        Ok(())
    }
}

/// File-backed store that survives process restarts.
///
/// The whole credential pair lives in one small JSON file; every operation
/// reads or rewrites it under an internal lock, so a single store instance is
/// safe to share across tasks.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> CoreResult<StoredTokens> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(StoredTokens::default())
            }
            Err(err) => Err(CoreError::from(err)),
        }
    }

    async fn save(&self, tokens: &StoredTokens) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(tokens)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn access_token(&self) -> CoreResult<Option<String>> {
        let _guard = self.lock.read().await;
        Ok(self.load().await?.access_token)
    }

    async fn refresh_token(&self) -> CoreResult<Option<String>> {
        let _guard = self.lock.read().await;
        Ok(self.load().await?.refresh_token)
    }

    async fn set_access_token(&self, token: &str) -> CoreResult<()> {
        let _guard = self.lock.write().await;
        let mut tokens = self.load().await?;
        tokens.access_token = Some(token.to_string());
        self.save(&tokens).await
    }

    async fn set_tokens(&self, access: &str, refresh: &str) -> CoreResult<()> {
        let _guard = self.lock.write().await;
        let tokens = StoredTokens {
            access_token: Some(access.to_string()),
            refresh_token: Some(refresh.to_string()),
        };
        self.save(&tokens).await
    }

    async fn clear(&self) -> CoreResult<()> {
        let _guard = self.lock.write().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(CoreError::from(err)),
        }
    }
}

// Mock implementation for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub TokenStore {}

        #[async_trait]
        impl TokenStore for TokenStore {
            async fn access_token(&self) -> CoreResult<Option<String>>;
            async fn refresh_token(&self) -> CoreResult<Option<String>>;
            async fn set_access_token(&self, token: &str) -> CoreResult<()>;
            async fn set_tokens(&self, access: &str, refresh: &str) -> CoreResult<()>;
            async fn clear(&self) -> CoreResult<()>;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.access_token().await.unwrap(), None);
        assert_eq!(store.refresh_token().await.unwrap(), None);

        store.set_tokens("A1", "R1").await.unwrap();
        assert_eq!(store.access_token().await.unwrap(), Some("A1".to_string()));
        assert_eq!(store.refresh_token().await.unwrap(), Some("R1".to_string()));

        store.set_access_token("A2").await.unwrap();
        assert_eq!(store.access_token().await.unwrap(), Some("A2".to_string()));
        assert_eq!(store.refresh_token().await.unwrap(), Some("R1".to_string()));

        store.clear().await.unwrap();
        assert_eq!(store.access_token().await.unwrap(), None);
        assert_eq!(store.refresh_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");

        let store = FileTokenStore::new(&path);
        store.set_tokens("A1", "R1").await.unwrap();
        drop(store);

        let reopened = FileTokenStore::new(&path);
        assert_eq!(
            reopened.access_token().await.unwrap(),
            Some("A1".to_string())
        );
        assert_eq!(
            reopened.refresh_token().await.unwrap(),
            Some("R1".to_string())
        );
    }

    #[tokio::test]
    async fn file_store_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("missing.json"));
        assert_eq!(store.access_token().await.unwrap(), None);
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested/dir/tokens.json"));
        store.set_access_token("A1").await.unwrap();
        assert_eq!(store.access_token().await.unwrap(), Some("A1".to_string()));
    }

    #[tokio::test]
    async fn file_store_corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        let store = FileTokenStore::new(&path);
        assert!(matches!(
            store.access_token().await,
            Err(CoreError::Serialization { .. })
        ));
    }

    #[tokio::test]
    async fn mock_store_observes_clear() {
        let mut store = mock::MockTokenStore::new();
        store.expect_clear().times(1).returning(|| Ok(()));
        let store: &dyn TokenStore = &store;
        store.clear().await.unwrap();
    }
}
