//! Configuration error types for the Shopee API SDK.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! credentials or URLs are rejected before any request is attempted.
//!
//! # Example
//!
//! ```rust
//! use shopee_api::{ConfigError, PartnerKey};
//!
//! let result = PartnerKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyPartnerKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building SDK configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Partner id cannot be zero.
    #[error("Partner id cannot be zero. Please provide the partner id issued by Shopee.")]
    InvalidPartnerId,

    /// Partner key cannot be empty.
    #[error("Partner key cannot be empty. Please provide the partner key issued by Shopee.")]
    EmptyPartnerKey,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Expected an absolute http(s) URL such as 'https://partner.shopeemobile.com/api/v2'.")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Region name is not recognized.
    #[error("Unknown region '{region}'. Expected one of: global, china, brazil, test_global, test_china.")]
    UnknownRegion {
        /// The region string that was provided.
        region: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {reason}")]
    HttpClient {
        /// Why the client could not be created.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_partner_key_error_message() {
        let message = ConfigError::EmptyPartnerKey.to_string();
        assert!(message.contains("Partner key cannot be empty"));
    }

    #[test]
    fn test_invalid_base_url_error_includes_url() {
        let error = ConfigError::InvalidBaseUrl {
            url: "not a url".to_string(),
        };
        assert!(error.to_string().contains("not a url"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "partner_id",
        };
        let message = error.to_string();
        assert!(message.contains("partner_id"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::InvalidPartnerId;
        let _: &dyn std::error::Error = &error;
    }
}
