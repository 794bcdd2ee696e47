//! The signed request dispatcher for the Shopee partner API.
//!
//! [`ShopeeFetch`] is the single entry point every manager uses. For each
//! call it:
//!
//! 1. builds the URL from the configured base URL and the endpoint path
//! 2. merges `partner_id` and `timestamp`, the caller's parameters and, for
//!    shop-authenticated calls, `access_token` and `shop_id`
//! 3. appends the `sign` parameter computed over the matching field list
//! 4. sends the request and decodes the JSON response
//! 5. classifies the payload as success, [`ApiError`] or [`SdkError`]
//!
//! # Token Refresh
//!
//! When an authenticated call comes back with the platform's invalid-token
//! error, the dispatcher asks its [`TokenProvider`] for a fresh token once and
//! re-sends the whole request with a new timestamp and signature. A second
//! invalid-token answer is returned as-is. If the refresh fails, the original
//! error is returned.
//!
//! Before an authenticated call, a stored token whose `expire_at` has passed
//! is refreshed first. If that refresh fails, the stored token is used anyway
//! and the platform decides. Either way the call has spent its one refresh, so
//! an invalid-token answer after a proactive refresh is returned as-is.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopee_api::clients::{RequestOptions, ShopeeFetch};
//! use shopee_api::ApiResponse;
//! use serde_json::Value;
//!
//! let fetch = ShopeeFetch::new(&config).with_token_provider(&sdk);
//! let page: ApiResponse<Value> = fetch
//!     .fetch(
//!         "/order/get_order_list",
//!         RequestOptions::get().auth(true).param("page_size", 20),
//!     )
//!     .await?;
//! ```

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::signature::SignatureBase;
use crate::auth::{AccessToken, TokenProvider};
use crate::clients::errors::{ApiError, SdkError, ShopeeError};
use crate::clients::request::{HttpMethod, Params, RequestOptions};
use crate::config::ShopeeConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name sent in the `User-Agent` header.
pub const SDK_NAME: &str = "shopee-api-rust";

/// The shop-level credentials appended to an authenticated request.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ShopCredentials<'t> {
    pub(crate) access_token: &'t str,
    pub(crate) shop_id: u64,
}

/// Builds the fully signed request URL.
///
/// Parameters are merged in a fixed order: `partner_id` and `timestamp`, then
/// `params`, then `access_token` and `shop_id` when `shop` is given. A later
/// source overrides an earlier one on the same key without moving it. `sign`
/// is appended last and covers the URL path, not the endpoint path, so the
/// base URL's `/api/v2` prefix is part of the signature.
pub(crate) fn signed_url(
    config: &ShopeeConfig,
    path: &str,
    params: &Params,
    timestamp: i64,
    shop: Option<ShopCredentials<'_>>,
) -> Result<Url, SdkError> {
    let raw = if path.starts_with('/') {
        format!("{}{path}", config.base_url())
    } else {
        format!("{}/{path}", config.base_url())
    };
    let mut url = Url::parse(&raw).map_err(|e| SdkError::InvalidUrl {
        url: raw.clone(),
        reason: e.to_string(),
    })?;

    let partner_id = config.partner_id();
    let mut query = Params::new();
    query.insert("partner_id", partner_id.get());
    query.insert("timestamp", timestamp);
    query.extend(params);

    let base = match shop {
        Some(shop) => {
            query.insert("access_token", shop.access_token);
            query.insert("shop_id", shop.shop_id);
            SignatureBase::Shop {
                partner_id,
                path: url.path(),
                timestamp,
                access_token: shop.access_token,
                shop_id: shop.shop_id,
            }
        }
        None => SignatureBase::Public {
            partner_id,
            path: url.path(),
            timestamp,
        },
    };
    query.insert("sign", base.sign(config.partner_key().as_ref()));

    url.query_pairs_mut().extend_pairs(query.to_pairs());
    Ok(url)
}

/// Returns the `User-Agent` value for `config`.
pub(crate) fn user_agent(config: &ShopeeConfig) -> String {
    config.user_agent_prefix().map_or_else(
        || format!("{SDK_NAME}/v{SDK_VERSION}"),
        |prefix| format!("{prefix} | {SDK_NAME}/v{SDK_VERSION}"),
    )
}

/// Signed request dispatcher.
///
/// A `ShopeeFetch` borrows its configuration and, for authenticated calls, a
/// [`TokenProvider`]. It holds no other state and is cheap to create per call.
///
/// # Thread Safety
///
/// `ShopeeFetch` is `Send + Sync`; concurrent calls are independent.
#[derive(Clone, Copy)]
pub struct ShopeeFetch<'a> {
    config: &'a ShopeeConfig,
    token_provider: Option<&'a dyn TokenProvider>,
}

// Verify ShopeeFetch is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopeeFetch<'static>>();
};

impl std::fmt::Debug for ShopeeFetch<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopeeFetch")
            .field("config", &self.config)
            .field("token_provider", &self.token_provider.is_some())
            .finish()
    }
}

impl<'a> ShopeeFetch<'a> {
    /// Creates a dispatcher for unauthenticated calls.
    ///
    /// Authenticated calls made without a provider fail with
    /// [`SdkError::MissingAccessToken`].
    #[must_use]
    pub const fn new(config: &'a ShopeeConfig) -> Self {
        Self {
            config,
            token_provider: None,
        }
    }

    /// Attaches the provider consulted for authenticated calls.
    #[must_use]
    pub const fn with_token_provider(mut self, provider: &'a dyn TokenProvider) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// Returns the configuration this dispatcher signs with.
    #[must_use]
    pub const fn config(&self) -> &'a ShopeeConfig {
        self.config
    }

    /// Sends a request and deserializes the whole JSON payload into `T`.
    ///
    /// `T` is usually [`ApiResponse<R>`](crate::ApiResponse), which keeps the
    /// envelope's `request_id` and `warning` alongside the payload.
    ///
    /// # Errors
    ///
    /// Returns everything [`fetch_value`](Self::fetch_value) returns, plus
    /// [`SdkError::InvalidResponse`] if the payload does not match `T`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ShopeeError> {
        let payload = self.fetch_value(path, options).await?;
        serde_json::from_value(payload).map_err(|e| {
            SdkError::InvalidResponse {
                reason: format!("{path}: {e}"),
            }
            .into()
        })
    }

    /// Sends a request and returns the decoded JSON payload.
    ///
    /// # Errors
    ///
    /// - [`ShopeeError::Api`] if the payload carries a non-empty `error`
    /// - [`SdkError::MissingAccessToken`] / [`SdkError::MissingShopId`] if an
    ///   authenticated call has no credentials; nothing is sent
    /// - [`SdkError::Network`] if the platform could not be reached
    /// - [`SdkError::UnknownResponseType`] if the response is not JSON
    /// - [`SdkError::InvalidResponse`] if a JSON response fails to parse
    pub async fn fetch_value(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ShopeeError> {
        let headers = self.headers(&options)?;
        let (mut token, mut refreshed) = if options.auth {
            let (token, refreshed) = self.current_token().await?;
            (Some(token), refreshed)
        } else {
            (None, false)
        };

        loop {
            let shop = token
                .as_ref()
                .map(|token| self.shop_credentials(token))
                .transpose()?;
            let timestamp = Utc::now().timestamp();
            let url = signed_url(self.config, path, &options.params, timestamp, shop)?;

            tracing::debug!(
                "Shopee API {} {} (auth: {}, refreshed: {})",
                options.method,
                path,
                options.auth,
                refreshed
            );

            let (status, payload) = self.send(url, &options, headers.clone()).await?;
            let Some(error) = ApiError::from_payload(status, &payload) else {
                return Ok(payload);
            };

            if !options.auth || refreshed || !error.is_invalid_access_token() {
                return Err(error.into());
            }

            let Some(provider) = self.token_provider else {
                return Err(error.into());
            };
            match provider.refresh_token().await {
                Ok(Some(fresh)) => {
                    token = Some(fresh);
                    refreshed = true;
                }
                Ok(None) => {
                    tracing::warn!(
                        "Token refresh after '{}' on {} returned no token",
                        error.error,
                        path
                    );
                    return Err(error.into());
                }
                Err(refresh_error) => {
                    tracing::warn!(
                        "Token refresh after '{}' on {} failed: {}",
                        error.error,
                        path,
                        refresh_error
                    );
                    return Err(error.into());
                }
            }
        }
    }

    /// Returns the stored token, refreshing it first if it has expired.
    ///
    /// The flag is `true` when a refresh was attempted, whatever its outcome.
    async fn current_token(&self) -> Result<(AccessToken, bool), ShopeeError> {
        let provider = self.token_provider.ok_or(SdkError::MissingAccessToken)?;
        let token = provider
            .get_auth_token()
            .await?
            .ok_or(SdkError::MissingAccessToken)?;

        if !token.is_expired() {
            return Ok((token, false));
        }

        tracing::debug!(
            "Access token expired at {}, refreshing",
            token
                .expires()
                .map_or_else(|| token.expire_at.to_string(), |at| at.to_rfc3339())
        );
        match provider.refresh_token().await {
            Ok(Some(fresh)) => Ok((fresh, true)),
            Ok(None) => {
                tracing::warn!("Proactive token refresh returned no token, using stored token");
                Ok((token, true))
            }
            Err(e) => {
                tracing::warn!("Proactive token refresh failed, using stored token: {}", e);
                Ok((token, true))
            }
        }
    }

    fn shop_credentials<'t>(
        &self,
        token: &'t AccessToken,
    ) -> Result<ShopCredentials<'t>, SdkError> {
        let shop_id = token
            .shop_id
            .or_else(|| self.config.shop_id())
            .ok_or(SdkError::MissingShopId)?;
        Ok(ShopCredentials {
            access_token: &token.access_token,
            shop_id,
        })
    }

    /// Default headers overlaid with the caller's.
    fn headers(&self, options: &RequestOptions) -> Result<HeaderMap, SdkError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let agent = user_agent(self.config);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&agent).map_err(|_| SdkError::InvalidHeader {
                name: USER_AGENT.to_string(),
            })?,
        );

        for (name, value) in &options.headers {
            let invalid = || SdkError::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }

    /// Performs one HTTP exchange and decodes the JSON body.
    async fn send(
        &self,
        url: Url,
        options: &RequestOptions,
        headers: HeaderMap,
    ) -> Result<(u16, Value), SdkError> {
        let client = self.config.http_client();
        let mut builder = match options.method {
            HttpMethod::Get => client.get(url),
            HttpMethod::Post => client.post(url),
        }
        .headers(headers);

        if let Some(body) = &options.body {
            let body = serde_json::to_vec(body).map_err(|e| SdkError::Serialization {
                reason: e.to_string(),
            })?;
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;

        match content_type {
            Some(content_type) if is_json(&content_type) => serde_json::from_str(&body)
                .map(|payload| (status, payload))
                .map_err(|e| SdkError::InvalidResponse {
                    reason: e.to_string(),
                }),
            other => {
                let content_type = other.unwrap_or_else(|| "<none>".to_string());
                tracing::warn!(
                    "Shopee API returned non-JSON response ({}, HTTP {})",
                    content_type,
                    status
                );
                Err(SdkError::UnknownResponseType { content_type, body })
            }
        }
    }
}

fn is_json(content_type: &str) -> bool {
    content_type
        .to_ascii_lowercase()
        .contains("application/json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::signature::generate_signature;
    use crate::config::{BaseUrl, PartnerId, PartnerKey};

    fn config() -> ShopeeConfig {
        ShopeeConfig::builder()
            .partner_id(PartnerId::new(2_001_887).unwrap())
            .partner_key(PartnerKey::new("partner-key").unwrap())
            .base_url(BaseUrl::new("https://partner.test-stable.shopeemobile.com/api/v2").unwrap())
            .build()
            .unwrap()
    }

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_public_url_signs_full_path() {
        let url = signed_url(&config(), "/shop/get_shop_info", &Params::new(), 1_700_000_000, None)
            .unwrap();

        assert_eq!(url.path(), "/api/v2/shop/get_shop_info");
        let expected = generate_signature(
            "partner-key",
            &["2001887", "/api/v2/shop/get_shop_info", "1700000000"],
        );
        assert_eq!(
            pairs(&url),
            vec![
                ("partner_id".to_string(), "2001887".to_string()),
                ("timestamp".to_string(), "1700000000".to_string()),
                ("sign".to_string(), expected),
            ]
        );
    }

    #[test]
    fn test_shop_url_appends_credentials_after_caller_params() {
        let params: Params = [("page_size", 20)].into_iter().collect();
        let shop = ShopCredentials {
            access_token: "token-abc",
            shop_id: 67_890,
        };

        let url = signed_url(&config(), "/order/get_order_list", &params, 1_700_000_000, Some(shop))
            .unwrap();

        let keys: Vec<String> = pairs(&url).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["partner_id", "timestamp", "page_size", "access_token", "shop_id", "sign"]
        );
        let expected = generate_signature(
            "partner-key",
            &[
                "2001887",
                "/api/v2/order/get_order_list",
                "1700000000",
                "token-abc",
                "67890",
            ],
        );
        assert_eq!(pairs(&url).last().unwrap().1, expected);
    }

    #[test]
    fn test_caller_params_override_base_params_in_place() {
        let params: Params = [("timestamp", 5)].into_iter().collect();

        let url = signed_url(&config(), "/x", &params, 1, None).unwrap();

        assert_eq!(
            pairs(&url)[1],
            ("timestamp".to_string(), "5".to_string())
        );
    }

    #[test]
    fn test_path_without_leading_slash_is_joined() {
        let url = signed_url(&config(), "order/get_order_list", &Params::new(), 1, None).unwrap();
        assert_eq!(url.path(), "/api/v2/order/get_order_list");
    }

    #[test]
    fn test_array_params_repeat_in_order() {
        let params: Params = [("item_id_list", vec![1u64, 2, 3])].into_iter().collect();

        let url = signed_url(&config(), "/product/get_item_base_info", &params, 1, None).unwrap();

        let items: Vec<String> = pairs(&url)
            .into_iter()
            .filter(|(k, _)| k == "item_id_list")
            .map(|(_, v)| v)
            .collect();
        assert_eq!(items, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_user_agent_with_and_without_prefix() {
        assert_eq!(
            user_agent(&config()),
            format!("shopee-api-rust/v{SDK_VERSION}")
        );

        let prefixed = ShopeeConfig::builder()
            .partner_id(PartnerId::new(1).unwrap())
            .partner_key(PartnerKey::new("k").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        assert_eq!(
            user_agent(&prefixed),
            format!("MyApp/1.0 | shopee-api-rust/v{SDK_VERSION}")
        );
    }

    #[test]
    fn test_caller_headers_override_defaults() {
        let config = config();
        let fetch = ShopeeFetch::new(&config);
        let options = RequestOptions::get().header("Content-Type", "text/plain");

        let headers = fetch.headers(&options).unwrap();

        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "text/plain");
        assert!(headers.get(USER_AGENT).is_some());
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let config = config();
        let fetch = ShopeeFetch::new(&config);
        let options = RequestOptions::get().header("bad header", "x");

        assert!(matches!(
            fetch.headers(&options),
            Err(SdkError::InvalidHeader { name }) if name == "bad header"
        ));
    }

    #[test]
    fn test_is_json() {
        assert!(is_json("application/json"));
        assert!(is_json("application/json; charset=utf-8"));
        assert!(is_json("Application/JSON"));
        assert!(!is_json("text/html"));
        assert!(!is_json("text/plain"));
    }
}
