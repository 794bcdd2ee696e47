//! Access tokens for shop- and merchant-level API calls.
//!
//! An [`AccessToken`] is created from a successful code exchange or refresh,
//! persisted by a [`TokenStorage`](crate::auth::TokenStorage), and replaced
//! wholesale on the next refresh. It is never mutated in place.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A stored access/refresh token pair.
///
/// `expire_at` is a Unix timestamp in seconds.
///
/// # Example
///
/// ```rust
/// use shopee_api::AccessToken;
///
/// let token = AccessToken {
///     access_token: "access".to_string(),
///     refresh_token: "refresh".to_string(),
///     shop_id: Some(67_890),
///     merchant_id: None,
///     expire_at: 4_102_444_800, // 2100-01-01
///     shop_id_list: Vec::new(),
///     merchant_id_list: Vec::new(),
/// };
///
/// assert!(!token.is_expired());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Short-lived credential sent with every authenticated call.
    pub access_token: String,

    /// Longer-lived credential used to obtain the next access token.
    pub refresh_token: String,

    /// The shop this token is scoped to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<u64>,

    /// The merchant this token is scoped to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<u64>,

    /// When the access token expires, in Unix seconds.
    pub expire_at: i64,

    /// Shops authorized through a main-account authorization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shop_id_list: Vec<u64>,

    /// Merchants authorized through a main-account authorization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merchant_id_list: Vec<u64>,
}

impl AccessToken {
    /// Builds a token from an auth endpoint response received at `now`.
    ///
    /// The ids a caller asked for win over ids echoed in the response.
    #[must_use]
    pub fn from_response(
        response: AccessTokenResponse,
        shop_id: Option<u64>,
        merchant_id: Option<u64>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            shop_id: shop_id.or(response.shop_id),
            merchant_id: merchant_id.or(response.merchant_id),
            expire_at: now.timestamp() + response.expire_in,
            shop_id_list: response.shop_id_list,
            merchant_id_list: response.merchant_id_list,
        }
    }

    /// Returns the expiry as a `DateTime`, or `None` if out of range.
    #[must_use]
    pub fn expires(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.expire_at, 0).single()
    }

    /// Returns `true` if the access token's expiry is in the past.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Returns `true` if the access token has expired as of `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_at <= now.timestamp()
    }
}

/// Response body of `/auth/token/get` and `/auth/access_token/get`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AccessTokenResponse {
    /// The new access token.
    #[serde(default)]
    pub access_token: String,

    /// The new refresh token.
    #[serde(default)]
    pub refresh_token: String,

    /// Access token lifetime in seconds.
    #[serde(default)]
    pub expire_in: i64,

    /// Request id assigned by the platform.
    #[serde(default)]
    pub request_id: Option<String>,

    /// Error code; empty on success.
    #[serde(default)]
    pub error: String,

    /// Human-readable error message.
    #[serde(default)]
    pub message: String,

    /// Echoed partner id (refresh responses only).
    #[serde(default)]
    pub partner_id: Option<u64>,

    /// Echoed shop id (refresh responses only).
    #[serde(default)]
    pub shop_id: Option<u64>,

    /// Echoed merchant id (refresh responses only).
    #[serde(default)]
    pub merchant_id: Option<u64>,

    /// Shops covered by a main-account authorization.
    #[serde(default)]
    pub shop_id_list: Vec<u64>,

    /// Merchants covered by a main-account authorization.
    #[serde(default)]
    pub merchant_id_list: Vec<u64>,

    /// Suppliers covered by a main-account authorization.
    #[serde(default)]
    pub supplier_id_list: Vec<u64>,
}

// Verify AccessToken is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AccessToken>();
};
