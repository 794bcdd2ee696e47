//! The token capability consumed by the request dispatcher.
//!
//! [`ShopeeFetch`](crate::clients::ShopeeFetch) never owns tokens. It asks a
//! [`TokenProvider`] for the current token on each authenticated call and asks
//! it to refresh when the platform rejects the token. Where the token lives
//! (memory, file, vault) is the provider's business.
//!
//! [`ShopeeSdk`](crate::ShopeeSdk) is the stock provider. Custom providers are
//! written with [`BoxFuture`]:
//!
//! ```rust
//! use shopee_api::auth::{BoxFuture, TokenProvider};
//! use shopee_api::{AccessToken, ShopeeError};
//!
//! struct FixedToken(AccessToken);
//!
//! impl TokenProvider for FixedToken {
//!     fn get_auth_token(&self) -> BoxFuture<'_, Result<Option<AccessToken>, ShopeeError>> {
//!         let token = self.0.clone();
//!         Box::pin(async move { Ok(Some(token)) })
//!     }
//!
//!     fn refresh_token(&self) -> BoxFuture<'_, Result<Option<AccessToken>, ShopeeError>> {
//!         Box::pin(async { Ok(None) })
//!     }
//! }
//! ```

use std::future::Future;
use std::pin::Pin;

use crate::auth::AccessToken;
use crate::clients::ShopeeError;

/// A boxed, sendable future, used where traits need async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Supplies and renews the access token for authenticated calls.
///
/// Implementations must be safe to call concurrently. Two calls that both hit
/// an expired token may both ask for a refresh; coalescing those is up to the
/// implementation.
pub trait TokenProvider: Send + Sync {
    /// Returns the currently stored token without side effects.
    fn get_auth_token(&self) -> BoxFuture<'_, Result<Option<AccessToken>, ShopeeError>>;

    /// Exchanges the stored refresh token for a new pair, persists it and
    /// returns it. Returns `Ok(None)` or an error when no renewal is possible.
    fn refresh_token(&self) -> BoxFuture<'_, Result<Option<AccessToken>, ShopeeError>>;
}
