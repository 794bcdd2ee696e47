//! The standard partner API response envelope.
//!
//! Every partner API endpoint answers with the same outer shape:
//!
//! ```json
//! {
//!     "request_id": "e3e3e7f33f3c4b2b9a",
//!     "error": "",
//!     "message": "",
//!     "warning": null,
//!     "response": { "...": "..." }
//! }
//! ```
//!
//! [`ApiResponse<T>`] types that envelope, with the endpoint-specific part in
//! `response`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A partner API response envelope.
///
/// # Example
///
/// ```rust
/// use shopee_api::ApiResponse;
/// use serde_json::{json, Value};
///
/// let envelope: ApiResponse<Value> = serde_json::from_value(json!({
///     "request_id": "abc",
///     "error": "",
///     "message": "",
///     "response": {"order_list": []}
/// }))
/// .unwrap();
///
/// assert_eq!(envelope.response.unwrap()["order_list"], json!([]));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Request id assigned by the platform.
    #[serde(default)]
    pub request_id: Option<String>,

    /// Error code; empty on success.
    #[serde(default)]
    pub error: String,

    /// Error or informational message.
    #[serde(default)]
    pub message: String,

    /// Non-fatal warnings. Shape varies by endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<Value>,

    /// The endpoint-specific payload.
    #[serde(default = "Option::default")]
    pub response: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Returns the payload, discarding the envelope.
    #[must_use]
    pub fn into_inner(self) -> Option<T> {
        self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct OrderList {
        more: bool,
        order_list: Vec<Value>,
    }

    #[test]
    fn test_deserializes_typed_payload() {
        let envelope: ApiResponse<OrderList> = serde_json::from_value(json!({
            "request_id": "req",
            "error": "",
            "message": "",
            "response": {"more": false, "order_list": [{"order_sn": "220101ABC"}]}
        }))
        .unwrap();

        assert_eq!(envelope.request_id.as_deref(), Some("req"));
        let payload = envelope.into_inner().unwrap();
        assert!(!payload.more);
        assert_eq!(payload.order_list[0]["order_sn"], "220101ABC");
    }

    #[test]
    fn test_missing_fields_default() {
        let envelope: ApiResponse<OrderList> = serde_json::from_value(json!({})).unwrap();

        assert!(envelope.request_id.is_none());
        assert!(envelope.error.is_empty());
        assert!(envelope.warning.is_none());
        assert!(envelope.response.is_none());
    }

    #[test]
    fn test_keeps_warning_payload() {
        let envelope: ApiResponse<Value> = serde_json::from_value(json!({
            "warning": ["item 1 skipped"],
            "response": {}
        }))
        .unwrap();

        assert_eq!(envelope.warning, Some(json!(["item 1 skipped"])));
    }
}
