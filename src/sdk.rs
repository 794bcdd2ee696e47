//! The top-level SDK facade.
//!
//! [`ShopeeSdk`] owns a [`ShopeeConfig`] and a [`TokenStorage`], runs the
//! authorization flows against that storage, and implements
//! [`TokenProvider`] so its dispatcher can fetch and refresh tokens without a
//! back-reference.

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::auth::oauth;
use crate::auth::{AccessToken, BoxFuture, MemoryTokenStorage, TokenProvider, TokenStorage};
use crate::clients::{SdkError, ShopeeError, ShopeeFetch};
use crate::config::{BaseUrl, ShopeeConfig, ShopeeRegion};
use crate::managers::{OrderManager, PushManager};

/// Entry point for the Shopee partner API.
///
/// # Thread Safety
///
/// `ShopeeSdk` is `Send + Sync`. Share it behind an `Arc` to call it from
/// several tasks. Token refreshes on one instance are serialized so each one
/// reads the refresh token stored by the previous one.
///
/// # Example
///
/// ```rust
/// use shopee_api::{PartnerId, PartnerKey, ShopeeConfig, ShopeeRegion, ShopeeSdk};
///
/// let config = ShopeeConfig::builder()
///     .partner_id(PartnerId::new(2_001_887).unwrap())
///     .partner_key(PartnerKey::new("partner-key").unwrap())
///     .region(ShopeeRegion::TestGlobal)
///     .build()
///     .unwrap();
///
/// let sdk = ShopeeSdk::new(config);
/// let url = sdk.authorization_url("https://myapp.example.com/callback").unwrap();
/// assert!(url.contains("/shop/auth_partner?partner_id=2001887"));
/// ```
pub struct ShopeeSdk {
    config: ShopeeConfig,
    token_storage: Arc<dyn TokenStorage>,
    refresh_lock: Mutex<()>,
}

// Verify ShopeeSdk is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopeeSdk>();
};

impl fmt::Debug for ShopeeSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopeeSdk")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ShopeeSdk {
    /// Creates an SDK that keeps tokens in memory.
    #[must_use]
    pub fn new(config: ShopeeConfig) -> Self {
        Self::with_token_storage(config, Arc::new(MemoryTokenStorage::new()))
    }

    /// Creates an SDK backed by `token_storage`.
    #[must_use]
    pub fn with_token_storage(config: ShopeeConfig, token_storage: Arc<dyn TokenStorage>) -> Self {
        Self {
            config,
            token_storage,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ShopeeConfig {
        &self.config
    }

    /// Switches to `region`, resetting the base URL to the region's.
    pub fn set_region(&mut self, region: ShopeeRegion) {
        self.config.set_region(region);
    }

    /// Switches to a custom base URL.
    pub fn set_base_url(&mut self, base_url: BaseUrl) {
        self.config.set_base_url(base_url);
    }

    /// Replaces the HTTP client, e.g. to route through a proxy.
    pub fn set_http_client(&mut self, client: reqwest::Client) {
        self.config.set_http_client(client);
    }

    /// Builds the shop authorization URL for `redirect`.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::InvalidUrl`] if the base URL cannot be parsed.
    pub fn authorization_url(&self, redirect: &str) -> Result<String, ShopeeError> {
        Ok(oauth::authorization_url(&self.config, redirect)?)
    }

    /// Exchanges an authorization code for a token and stores it.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] if the exchange fails or the token cannot be
    /// stored.
    pub async fn authenticate_with_code(
        &self,
        code: &str,
        shop_id: Option<u64>,
        main_account_id: Option<u64>,
    ) -> Result<AccessToken, ShopeeError> {
        let token = oauth::get_access_token(&self.config, code, shop_id, main_account_id).await?;
        self.token_storage.store(token.clone()).await?;
        tracing::debug!(
            "Stored access token for shop {:?}, expires at {}",
            token.shop_id,
            token.expire_at
        );
        Ok(token)
    }

    /// Returns the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::TokenStorage`] if the storage cannot be read.
    pub async fn get_auth_token(&self) -> Result<Option<AccessToken>, ShopeeError> {
        self.token_storage.get().await
    }

    /// Exchanges the stored refresh token for a new token and stores it.
    ///
    /// `shop_id` defaults to the stored token's shop. `merchant_id` defaults
    /// to the stored token's merchant when no shop is known.
    ///
    /// # Errors
    ///
    /// - [`SdkError::NoTokenToRefresh`] if nothing is stored
    /// - [`ShopeeError::Api`] if the platform rejects the refresh token
    /// - [`SdkError::TokenStorage`] if the storage fails
    pub async fn refresh_token(
        &self,
        shop_id: Option<u64>,
        merchant_id: Option<u64>,
    ) -> Result<AccessToken, ShopeeError> {
        let _guard = self.refresh_lock.lock().await;

        let stored = self
            .token_storage
            .get()
            .await?
            .ok_or(SdkError::NoTokenToRefresh)?;
        let shop_id = shop_id.or(stored.shop_id);
        let merchant_id = match (merchant_id, shop_id) {
            (Some(id), _) => Some(id),
            (None, None) => stored.merchant_id,
            (None, Some(_)) => None,
        };

        let token =
            oauth::refresh_access_token(&self.config, &stored.refresh_token, shop_id, merchant_id)
                .await?;
        self.token_storage.store(token.clone()).await?;
        tracing::debug!(
            "Refreshed access token for shop {:?}, expires at {}",
            token.shop_id,
            token.expire_at
        );
        Ok(token)
    }

    /// Returns a dispatcher that signs with this SDK's config and tokens.
    #[must_use]
    pub fn fetcher(&self) -> ShopeeFetch<'_> {
        ShopeeFetch::new(&self.config).with_token_provider(self)
    }

    /// Order endpoints.
    #[must_use]
    pub const fn order(&self) -> OrderManager<'_> {
        OrderManager::new(self)
    }

    /// Push configuration endpoints.
    #[must_use]
    pub const fn push(&self) -> PushManager<'_> {
        PushManager::new(self)
    }
}

impl TokenProvider for ShopeeSdk {
    fn get_auth_token(&self) -> BoxFuture<'_, Result<Option<AccessToken>, ShopeeError>> {
        Box::pin(async move { Self::get_auth_token(self).await })
    }

    fn refresh_token(&self) -> BoxFuture<'_, Result<Option<AccessToken>, ShopeeError>> {
        Box::pin(async move { Self::refresh_token(self, None, None).await.map(Some) })
    }
}
