//! Persistence for access tokens.
//!
//! [`ShopeeSdk`](crate::ShopeeSdk) reads and writes its token through a
//! [`TokenStorage`]. Two stores ship with the crate:
//!
//! - [`MemoryTokenStorage`]: process-local, the default
//! - [`FileTokenStorage`]: one JSON file per shop, survives restarts

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::auth::{AccessToken, BoxFuture};
use crate::clients::{SdkError, ShopeeError};

/// Async key-less store holding at most one token.
pub trait TokenStorage: Send + Sync {
    /// Persists `token`, replacing any previous one.
    fn store(&self, token: AccessToken) -> BoxFuture<'_, Result<(), ShopeeError>>;

    /// Returns the stored token, if any.
    fn get(&self) -> BoxFuture<'_, Result<Option<AccessToken>, ShopeeError>>;

    /// Removes the stored token.
    fn clear(&self) -> BoxFuture<'_, Result<(), ShopeeError>>;
}

/// In-memory token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: RwLock<Option<AccessToken>>,
}

impl MemoryTokenStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with `token`.
    #[must_use]
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn store(&self, token: AccessToken) -> BoxFuture<'_, Result<(), ShopeeError>> {
        Box::pin(async move {
            *self.token.write().await = Some(token);
            Ok(())
        })
    }

    fn get(&self) -> BoxFuture<'_, Result<Option<AccessToken>, ShopeeError>> {
        Box::pin(async move { Ok(self.token.read().await.clone()) })
    }

    fn clear(&self) -> BoxFuture<'_, Result<(), ShopeeError>> {
        Box::pin(async move {
            *self.token.write().await = None;
            Ok(())
        })
    }
}

/// Sequence for temporary file names, unique within the process.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Token store backed by a JSON file.
///
/// Writes go to a temporary sibling file that is then renamed over the
/// target, so readers see either the previous token or the new one.
///
/// # Example
///
/// ```rust
/// use shopee_api::auth::FileTokenStorage;
///
/// let storage = FileTokenStorage::for_shop(Some(67_890));
/// assert!(storage.path().ends_with(".token/67890.json"));
/// ```
#[derive(Clone, Debug)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    /// Directory, relative to the working directory, used by [`Self::for_shop`].
    pub const DEFAULT_DIR: &'static str = ".token";

    /// Stores the token at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Stores the token at `.token/<shop_id>.json`, or `.token/default.json`.
    #[must_use]
    pub fn for_shop(shop_id: Option<u64>) -> Self {
        let file_name = shop_id.map_or_else(|| "default".to_string(), |id| id.to_string());
        Self::new(Path::new(Self::DEFAULT_DIR).join(format!("{file_name}.json")))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A fresh sibling path such as `67890.json.4242.7.tmp`.
    fn temp_path(&self) -> PathBuf {
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("token"), |name| name.to_os_string());
        name.push(format!(".{}.{seq}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }

    fn storage_error(&self, action: &str, error: impl std::fmt::Display) -> ShopeeError {
        SdkError::TokenStorage {
            reason: format!("failed to {action} {}: {error}", self.path.display()),
        }
        .into()
    }
}

impl TokenStorage for FileTokenStorage {
    fn store(&self, token: AccessToken) -> BoxFuture<'_, Result<(), ShopeeError>> {
        Box::pin(async move {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.storage_error("create directory for", e))?;
            }
            let json = serde_json::to_vec_pretty(&token)
                .map_err(|e| self.storage_error("serialize token for", e))?;
            let temp = self.temp_path();
            tokio::fs::write(&temp, json)
                .await
                .map_err(|e| self.storage_error("write", e))?;
            if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
                let _ = tokio::fs::remove_file(&temp).await;
                return Err(self.storage_error("replace", e));
            }
            Ok(())
        })
    }

    fn get(&self) -> BoxFuture<'_, Result<Option<AccessToken>, ShopeeError>> {
        Box::pin(async move {
            let bytes = match tokio::fs::read(&self.path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(self.storage_error("read", e)),
            };
            serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| self.storage_error("parse", e))
        })
    }

    fn clear(&self) -> BoxFuture<'_, Result<(), ShopeeError>> {
        Box::pin(async move {
            match tokio::fs::remove_file(&self.path).await {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(self.storage_error("remove", e)),
                _ => Ok(()),
            }
        })
    }
}

// Verify the stores are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MemoryTokenStorage>();
    assert_send_sync::<FileTokenStorage>();
};
