//! Request signature generation for the Shopee partner API.
//!
//! Every request carries a `sign` query parameter: an HMAC-SHA256 over the
//! concatenation of an ordered field list, keyed with the partner key and
//! rendered as lowercase hex.
//!
//! Field order is fixed by the platform:
//!
//! - unauthenticated calls sign `[partner_id, path, timestamp]`
//! - authenticated calls sign `[partner_id, path, timestamp, access_token, shop_id]`
//!
//! `path` is the URL path only (e.g. `/api/v2/order/get_order_list`), never the
//! host or query string. Fields are joined without a separator; this matches
//! the platform's scheme and must not change.
//!
//! # Example
//!
//! ```rust
//! use shopee_api::auth::signature::generate_signature;
//!
//! let sign = generate_signature("partner-key", &["2001887", "/api/v2/shop/auth_partner", "1655714431"]);
//! assert_eq!(sign.len(), 64);
//! assert!(sign.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::config::PartnerId;

type HmacSha256 = Hmac<Sha256>;

/// Computes the hex-encoded HMAC-SHA256 of `fields` concatenated in order.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn generate_signature<S: AsRef<str>>(secret: &str, fields: &[S]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    for field in fields {
        mac.update(field.as_ref().as_bytes());
    }
    hex::encode(mac.finalize().into_bytes())
}

/// The ordered field list a request is signed over.
///
/// Keeping the two shapes in one type ties the field order to the auth mode,
/// so a request can never be signed with a mismatched list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureBase<'a> {
    /// Partner-level call: `partner_id, path, timestamp`.
    Public {
        /// The partner id.
        partner_id: PartnerId,
        /// URL path component, including the `/api/v2` prefix.
        path: &'a str,
        /// Unix time in seconds.
        timestamp: i64,
    },
    /// Shop-level call: `partner_id, path, timestamp, access_token, shop_id`.
    Shop {
        /// The partner id.
        partner_id: PartnerId,
        /// URL path component, including the `/api/v2` prefix.
        path: &'a str,
        /// Unix time in seconds.
        timestamp: i64,
        /// The shop's current access token.
        access_token: &'a str,
        /// The shop the token belongs to.
        shop_id: u64,
    },
}

impl SignatureBase<'_> {
    /// Returns the fields in signing order.
    #[must_use]
    pub fn fields(&self) -> Vec<String> {
        match *self {
            Self::Public {
                partner_id,
                path,
                timestamp,
            } => vec![partner_id.to_string(), path.to_string(), timestamp.to_string()],
            Self::Shop {
                partner_id,
                path,
                timestamp,
                access_token,
                shop_id,
            } => vec![
                partner_id.to_string(),
                path.to_string(),
                timestamp.to_string(),
                access_token.to_string(),
                shop_id.to_string(),
            ],
        }
    }

    /// Signs the fields with `partner_key`.
    #[must_use]
    pub fn sign(&self, partner_key: &str) -> String {
        generate_signature(partner_key, &self.fields())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner() -> PartnerId {
        PartnerId::new(2_001_887).unwrap()
    }

    #[test]
    fn test_signature_matches_known_hmac_sha256_vector() {
        // RFC 4231 test case 2: key "Jefe", data "what do ya want for nothing?"
        let sign = generate_signature("Jefe", &["what do ya want ", "for nothing?"]);
        assert_eq!(
            sign,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_signature_is_deterministic_lowercase_hex() {
        let fields = ["2001887", "/api/v2/order/get_order_list", "1700000000"];
        let first = generate_signature("key", &fields);
        let second = generate_signature("key", &fields);

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_signature_changes_with_any_field_or_order() {
        let base = generate_signature("key", &["1", "/api/v2/a", "100"]);

        assert_ne!(base, generate_signature("key", &["2", "/api/v2/a", "100"]));
        assert_ne!(base, generate_signature("key", &["1", "/api/v2/b", "100"]));
        assert_ne!(base, generate_signature("key", &["1", "/api/v2/a", "101"]));
        assert_ne!(base, generate_signature("key", &["/api/v2/a", "1", "100"]));
        assert_ne!(base, generate_signature("other", &["1", "/api/v2/a", "100"]));
    }

    #[test]
    fn test_fields_are_concatenated_without_separator() {
        assert_eq!(
            generate_signature("key", &["12", "3"]),
            generate_signature("key", &["123"])
        );
    }

    #[test]
    fn test_public_base_signs_three_fields() {
        let base = SignatureBase::Public {
            partner_id: partner(),
            path: "/api/v2/shop/auth_partner",
            timestamp: 1_655_714_431,
        };

        assert_eq!(
            base.fields(),
            vec!["2001887", "/api/v2/shop/auth_partner", "1655714431"]
        );
        assert_eq!(
            base.sign("key"),
            generate_signature("key", &["2001887", "/api/v2/shop/auth_partner", "1655714431"])
        );
    }

    #[test]
    fn test_shop_base_appends_token_and_shop_id() {
        let base = SignatureBase::Shop {
            partner_id: partner(),
            path: "/api/v2/order/get_order_list",
            timestamp: 1_655_714_431,
            access_token: "token-abc",
            shop_id: 67_890,
        };

        assert_eq!(
            base.fields(),
            vec![
                "2001887",
                "/api/v2/order/get_order_list",
                "1655714431",
                "token-abc",
                "67890"
            ]
        );
    }

    #[test]
    fn test_shop_signature_differs_from_public_signature() {
        let public = SignatureBase::Public {
            partner_id: partner(),
            path: "/api/v2/order/get_order_list",
            timestamp: 1,
        };
        let shop = SignatureBase::Shop {
            partner_id: partner(),
            path: "/api/v2/order/get_order_list",
            timestamp: 1,
            access_token: "token",
            shop_id: 1,
        };
        assert_ne!(public.sign("key"), shop.sign("key"));
    }
}
