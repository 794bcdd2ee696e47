//! Authentication types for the Shopee API SDK.
//!
//! # Overview
//!
//! - [`signature`]: HMAC-SHA256 request signing
//! - [`AccessToken`]: a shop or merchant token pair with its expiry
//! - [`TokenProvider`]: what the dispatcher asks for the current token
//! - [`TokenStorage`]: where tokens persist ([`MemoryTokenStorage`],
//!   [`FileTokenStorage`])
//! - [`oauth`]: shop authorization, code exchange and token refresh
//!
//! # Example
//!
//! ```rust
//! use shopee_api::auth::{MemoryTokenStorage, TokenStorage};
//! use shopee_api::AccessToken;
//!
//! # tokio_test::block_on(async {
//! let storage = MemoryTokenStorage::new();
//! storage
//!     .store(AccessToken {
//!         access_token: "access".to_string(),
//!         refresh_token: "refresh".to_string(),
//!         shop_id: Some(67_890),
//!         merchant_id: None,
//!         expire_at: 4_102_444_800,
//!         shop_id_list: Vec::new(),
//!         merchant_id_list: Vec::new(),
//!     })
//!     .await
//!     .unwrap();
//!
//! let token = storage.get().await.unwrap().unwrap();
//! assert_eq!(token.shop_id, Some(67_890));
//! # });
//! ```

mod access_token;
pub mod oauth;
mod provider;
pub mod signature;
mod storage;

pub use access_token::{AccessToken, AccessTokenResponse};
pub use provider::{BoxFuture, TokenProvider};
pub use storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};
