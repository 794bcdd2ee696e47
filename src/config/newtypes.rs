//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction so that a built
//! [`ShopeeConfig`](super::ShopeeConfig) never holds an unusable credential.

use super::ShopeeRegion;
use crate::error::ConfigError;
use reqwest::Url;
use std::fmt;

/// A validated Shopee partner id.
///
/// # Example
///
/// ```rust
/// use shopee_api::PartnerId;
///
/// let id = PartnerId::new(1_000_123).unwrap();
/// assert_eq!(id.get(), 1_000_123);
/// assert_eq!(id.to_string(), "1000123");
/// assert!(PartnerId::new(0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PartnerId(u64);

impl PartnerId {
    /// Creates a new validated partner id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPartnerId`] if the id is zero.
    pub const fn new(id: u64) -> Result<Self, ConfigError> {
        if id == 0 {
            return Err(ConfigError::InvalidPartnerId);
        }
        Ok(Self(id))
    }

    /// Returns the raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PartnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated Shopee partner key.
///
/// The partner key is the HMAC secret for every request signature, so its
/// `Debug` output is masked.
///
/// # Example
///
/// ```rust
/// use shopee_api::PartnerKey;
///
/// let key = PartnerKey::new("my-partner-key").unwrap();
/// assert_eq!(format!("{:?}", key), "PartnerKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PartnerKey(String);

impl PartnerKey {
    /// Creates a new validated partner key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPartnerKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyPartnerKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for PartnerKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PartnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PartnerKey(*****)")
    }
}

/// A validated partner API base URL, e.g. `https://partner.shopeemobile.com/api/v2`.
///
/// Trailing slashes are trimmed so that request paths (which start with `/`)
/// can be appended directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not parse or
    /// its scheme is not `http`/`https`.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let parsed =
            Url::parse(trimmed).map_err(|_| ConfigError::InvalidBaseUrl { url: url.clone() })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl From<ShopeeRegion> for BaseUrl {
    fn from(region: ShopeeRegion) -> Self {
        Self(region.base_url().to_string())
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
