//! Error types for dispatched requests.
//!
//! Two kinds of failure are kept apart:
//!
//! - [`ApiError`]: the HTTP exchange worked and the platform answered with a
//!   non-empty `error` field.
//! - [`SdkError`]: nothing usable came back, or the request never left
//!   (missing token, network failure, non-JSON body, ...). Never carries an
//!   HTTP status.
//!
//! [`ShopeeError`] unifies both and is returned by every async operation.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopee_api::{ShopeeError, SdkError};
//!
//! match sdk.order().get_order_list(&params).await {
//!     Ok(page) => println!("{:?}", page.response),
//!     Err(ShopeeError::Api(e)) if e.error == "error_param" => {
//!         println!("Rejected ({}): {}", e.status, e.message);
//!     }
//!     Err(ShopeeError::Api(e)) => println!("Platform error: {e}"),
//!     Err(ShopeeError::Sdk(SdkError::Network(e))) => println!("Unreachable: {e}"),
//!     Err(ShopeeError::Sdk(e)) => println!("Local failure: {e}"),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::error::ConfigError;

/// Error codes the platform uses for a rejected access token.
///
/// The platform spells its code `invalid_acceess_token`; the correct spelling
/// is accepted as well.
pub const INVALID_ACCESS_TOKEN_ERRORS: &[&str] = &["invalid_acceess_token", "invalid_access_token"];

/// A structured error payload returned by the platform.
///
/// # Example
///
/// ```rust
/// use shopee_api::ApiError;
/// use serde_json::json;
///
/// let payload = json!({
///     "error": "invalid_acceess_token",
///     "message": "Invalid access_token.",
///     "request_id": "e3e3e7f33f3c4b2b9a"
/// });
///
/// let error = ApiError::from_payload(403, &payload).unwrap();
/// assert!(error.is_invalid_access_token());
/// assert_eq!(error.request_id.as_deref(), Some("e3e3e7f33f3c4b2b9a"));
/// ```
#[derive(Debug, Error)]
#[error("Shopee API error '{error}' (HTTP {status}): {message}")]
pub struct ApiError {
    /// HTTP status of the response.
    pub status: u16,
    /// Platform error code, e.g. `error_param`.
    pub error: String,
    /// Human-readable message from the platform.
    pub message: String,
    /// Request id for support tickets, if the platform sent one.
    pub request_id: Option<String>,
    /// The full decoded response body.
    pub payload: Value,
}

impl ApiError {
    /// Returns an `ApiError` if `payload` carries a non-empty `error` field.
    ///
    /// `null`, `false` and `""` count as "no error"; any other value is
    /// reported with its JSON rendering as the error code.
    #[must_use]
    pub fn from_payload(status: u16, payload: &Value) -> Option<Self> {
        let error = match payload.get("error")? {
            Value::Null | Value::Bool(false) => return None,
            Value::String(code) if code.is_empty() => return None,
            Value::String(code) => code.clone(),
            other => other.to_string(),
        };

        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let request_id = payload
            .get("request_id")
            .and_then(Value::as_str)
            .map(String::from);

        Some(Self {
            status,
            error,
            message,
            request_id,
            payload: payload.clone(),
        })
    }

    /// Returns `true` if the platform rejected the access token.
    #[must_use]
    pub fn is_invalid_access_token(&self) -> bool {
        INVALID_ACCESS_TOKEN_ERRORS.contains(&self.error.as_str())
    }
}

/// A local failure that did not come from a decoded platform payload.
#[derive(Debug, Error)]
pub enum SdkError {
    /// An authenticated call was made with no stored token.
    #[error("No access token found")]
    MissingAccessToken,

    /// An authenticated call has no shop id in either the token or the config.
    #[error("No shop id found on the access token or in the configuration")]
    MissingShopId,

    /// A refresh was requested with no stored token to refresh from.
    #[error("No token found to refresh")]
    NoTokenToRefresh,

    /// The platform could not be reached (DNS, connect, timeout, reset).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response was not JSON.
    #[error("Unknown response type: {content_type}\n{body}")]
    UnknownResponseType {
        /// The response `Content-Type`, or `<none>`.
        content_type: String,
        /// The raw response body.
        body: String,
    },

    /// The response was JSON but not the expected shape.
    #[error("Invalid response: {reason}")]
    InvalidResponse {
        /// What failed to parse.
        reason: String,
    },

    /// The request URL could not be built.
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// The parser's complaint.
        reason: String,
    },

    /// A caller-supplied header name or value is not valid HTTP.
    #[error("Invalid header '{name}'")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// Request parameters or body could not be serialized.
    #[error("Failed to serialize request: {reason}")]
    Serialization {
        /// The serializer's complaint.
        reason: String,
    },

    /// The token store failed.
    #[error("Token storage error: {reason}")]
    TokenStorage {
        /// What went wrong.
        reason: String,
    },

    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Unified error type for every SDK operation.
#[derive(Debug, Error)]
pub enum ShopeeError {
    /// The platform returned a structured error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A local failure occurred.
    #[error(transparent)]
    Sdk(#[from] SdkError),
}

impl ShopeeError {
    /// Returns the platform error, if this is one.
    #[must_use]
    pub const fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            Self::Sdk(_) => None,
        }
    }
}

impl From<ConfigError> for ShopeeError {
    fn from(error: ConfigError) -> Self {
        Self::Sdk(SdkError::Config(error))
    }
}

impl From<reqwest::Error> for ShopeeError {
    fn from(error: reqwest::Error) -> Self {
        Self::Sdk(SdkError::Network(error))
    }
}

// Verify ShopeeError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopeeError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_payload_ignores_empty_error() {
        assert!(ApiError::from_payload(200, &json!({"error": "", "response": {}})).is_none());
        assert!(ApiError::from_payload(200, &json!({"error": null})).is_none());
        assert!(ApiError::from_payload(200, &json!({"response": {}})).is_none());
    }

    #[test]
    fn test_from_payload_captures_code_message_and_request_id() {
        let error = ApiError::from_payload(
            400,
            &json!({
                "error": "error_param",
                "message": "order_sn_list is required",
                "request_id": "abc-123"
            }),
        )
        .unwrap();

        assert_eq!(error.status, 400);
        assert_eq!(error.error, "error_param");
        assert_eq!(error.message, "order_sn_list is required");
        assert_eq!(error.request_id.as_deref(), Some("abc-123"));
        assert!(!error.is_invalid_access_token());
        assert_eq!(error.payload["error"], "error_param");
    }

    #[test]
    fn test_from_payload_keeps_non_string_error_codes() {
        let error = ApiError::from_payload(500, &json!({"error": 10001})).unwrap();
        assert_eq!(error.error, "10001");
        assert!(error.message.is_empty());
    }

    #[test]
    fn test_invalid_access_token_sentinels() {
        for code in INVALID_ACCESS_TOKEN_ERRORS {
            let error = ApiError::from_payload(403, &json!({ "error": code })).unwrap();
            assert!(error.is_invalid_access_token(), "{code} should be a sentinel");
        }
    }

    #[test]
    fn test_api_error_display_includes_status_and_code() {
        let error = ApiError::from_payload(
            429,
            &json!({"error": "error_too_many_request", "message": "slow down"}),
        )
        .unwrap();
        let message = error.to_string();
        assert!(message.contains("429"));
        assert!(message.contains("error_too_many_request"));
        assert!(message.contains("slow down"));
    }

    #[test]
    fn test_sdk_error_messages() {
        assert_eq!(
            SdkError::MissingAccessToken.to_string(),
            "No access token found"
        );
        let error = SdkError::UnknownResponseType {
            content_type: "text/html".to_string(),
            body: "<html>".to_string(),
        };
        assert!(error.to_string().starts_with("Unknown response type: text/html"));
    }

    #[test]
    fn test_shopee_error_conversions() {
        let error: ShopeeError = SdkError::MissingShopId.into();
        assert!(error.as_api_error().is_none());

        let error: ShopeeError = ConfigError::EmptyPartnerKey.into();
        assert!(matches!(
            error,
            ShopeeError::Sdk(SdkError::Config(ConfigError::EmptyPartnerKey))
        ));

        let api = ApiError::from_payload(403, &json!({"error": "error_auth"})).unwrap();
        let error: ShopeeError = api.into();
        assert_eq!(error.as_api_error().map(|e| e.status), Some(403));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &SdkError::NoTokenToRefresh;
        let _: &dyn std::error::Error = &ShopeeError::Sdk(SdkError::MissingAccessToken);
    }
}
