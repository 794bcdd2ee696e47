//! Configuration types for the Shopee API SDK.
//!
//! # Overview
//!
//! - [`ShopeeConfig`]: partner credentials, target platform and HTTP client
//! - [`ShopeeConfigBuilder`]: fluent builder for [`ShopeeConfig`]
//! - [`PartnerId`], [`PartnerKey`], [`BaseUrl`]: validated newtypes
//! - [`ShopeeRegion`]: the region-to-base-URL table
//!
//! # Example
//!
//! ```rust
//! use shopee_api::{PartnerId, PartnerKey, ShopeeConfig, ShopeeRegion};
//!
//! let config = ShopeeConfig::builder()
//!     .partner_id(PartnerId::new(1_000_123).unwrap())
//!     .partner_key(PartnerKey::new("partner-key").unwrap())
//!     .region(ShopeeRegion::TestGlobal)
//!     .shop_id(67_890)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     config.base_url().as_ref(),
//!     "https://partner.test-stable.shopeemobile.com/api/v2"
//! );
//! ```

mod newtypes;
mod region;

pub use newtypes::{BaseUrl, PartnerId, PartnerKey};
pub use region::ShopeeRegion;

use crate::error::ConfigError;

/// Configuration for the Shopee API SDK.
///
/// A config is immutable once built, except for the region, base URL and HTTP
/// client, which the owning [`ShopeeSdk`](crate::ShopeeSdk) may reassign.
///
/// # Connection Reuse
///
/// The config carries a [`reqwest::Client`]. Clients share their connection
/// pool when cloned, so one client serves every request made with this config.
#[derive(Clone, Debug)]
pub struct ShopeeConfig {
    partner_id: PartnerId,
    partner_key: PartnerKey,
    region: Option<ShopeeRegion>,
    base_url: BaseUrl,
    shop_id: Option<u64>,
    http_client: reqwest::Client,
    user_agent_prefix: Option<String>,
}

impl ShopeeConfig {
    /// Creates a new builder for constructing a `ShopeeConfig`.
    #[must_use]
    pub fn builder() -> ShopeeConfigBuilder {
        ShopeeConfigBuilder::new()
    }

    /// Returns the partner id.
    #[must_use]
    pub const fn partner_id(&self) -> PartnerId {
        self.partner_id
    }

    /// Returns the partner key.
    #[must_use]
    pub const fn partner_key(&self) -> &PartnerKey {
        &self.partner_key
    }

    /// Returns the region, or `None` when a custom base URL is in use.
    #[must_use]
    pub const fn region(&self) -> Option<ShopeeRegion> {
        self.region
    }

    /// Returns the partner API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default shop id, if configured.
    #[must_use]
    pub const fn shop_id(&self) -> Option<u64> {
        self.shop_id
    }

    /// Returns the HTTP client used for every request.
    #[must_use]
    pub const fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Switches to `region` and its base URL.
    pub(crate) fn set_region(&mut self, region: ShopeeRegion) {
        self.region = Some(region);
        self.base_url = BaseUrl::from(region);
    }

    /// Switches to a custom base URL; the region becomes unknown.
    pub(crate) fn set_base_url(&mut self, base_url: BaseUrl) {
        self.region = None;
        self.base_url = base_url;
    }

    pub(crate) fn set_http_client(&mut self, client: reqwest::Client) {
        self.http_client = client;
    }
}

// Verify ShopeeConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopeeConfig>();
};

/// Builder for constructing [`ShopeeConfig`] instances.
///
/// Required fields are `partner_id` and `partner_key`.
///
/// # Defaults
///
/// - `region`: [`ShopeeRegion::Global`]
/// - `base_url`: the region's base URL
/// - `shop_id`: `None`
/// - `http_client`: a rustls-backed `reqwest::Client`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ShopeeConfigBuilder {
    partner_id: Option<PartnerId>,
    partner_key: Option<PartnerKey>,
    region: Option<ShopeeRegion>,
    base_url: Option<BaseUrl>,
    shop_id: Option<u64>,
    http_client: Option<reqwest::Client>,
    user_agent_prefix: Option<String>,
}

impl ShopeeConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the partner id (required).
    #[must_use]
    pub const fn partner_id(mut self, id: PartnerId) -> Self {
        self.partner_id = Some(id);
        self
    }

    /// Sets the partner key (required).
    #[must_use]
    pub fn partner_key(mut self, key: PartnerKey) -> Self {
        self.partner_key = Some(key);
        self
    }

    /// Sets the region. Ignored for URL selection when a base URL is also set.
    #[must_use]
    pub const fn region(mut self, region: ShopeeRegion) -> Self {
        self.region = Some(region);
        self
    }

    /// Sets a custom base URL, taking precedence over the region.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the default shop id used when a token carries none.
    #[must_use]
    pub const fn shop_id(mut self, shop_id: u64) -> Self {
        self.shop_id = Some(shop_id);
        self
    }

    /// Sets the HTTP client, e.g. one with a custom timeout or proxy.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ShopeeConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `partner_id` or
    /// `partner_key` is not set, and [`ConfigError::HttpClient`] if no client
    /// was supplied and the default one cannot be created.
    pub fn build(self) -> Result<ShopeeConfig, ConfigError> {
        let partner_id = self.partner_id.ok_or(ConfigError::MissingRequiredField {
            field: "partner_id",
        })?;
        let partner_key = self.partner_key.ok_or(ConfigError::MissingRequiredField {
            field: "partner_key",
        })?;

        let (region, base_url) = match self.base_url {
            Some(base_url) => (self.region, base_url),
            None => {
                let region = self.region.unwrap_or_default();
                (Some(region), BaseUrl::from(region))
            }
        };

        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .use_rustls_tls()
                .build()
                .map_err(|e| ConfigError::HttpClient {
                    reason: e.to_string(),
                })?,
        };

        Ok(ShopeeConfig {
            partner_id,
            partner_key,
            region,
            base_url,
            shop_id: self.shop_id,
            http_client,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
