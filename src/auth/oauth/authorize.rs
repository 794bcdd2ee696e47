//! Authorization URL generation.

use chrono::Utc;
use reqwest::Url;

use crate::auth::signature::SignatureBase;
use crate::clients::SdkError;
use crate::config::ShopeeConfig;

/// Endpoint path of the shop authorization page.
pub const AUTH_PARTNER_PATH: &str = "/shop/auth_partner";

/// Builds the URL that sends a seller to the shop authorization page.
///
/// The URL carries `partner_id`, `timestamp`, the URL-encoded `redirect` and a
/// partner-level `sign`. The signature covers the full URL path, e.g.
/// `/api/v2/shop/auth_partner`. Links are only valid for a few minutes, so
/// build one per redirect.
///
/// # Errors
///
/// Returns [`SdkError::InvalidUrl`] if the configured base URL cannot be
/// parsed.
///
/// # Example
///
/// ```rust
/// use shopee_api::{PartnerId, PartnerKey, ShopeeConfig};
/// use shopee_api::auth::oauth::authorization_url;
///
/// let config = ShopeeConfig::builder()
///     .partner_id(PartnerId::new(2_001_887).unwrap())
///     .partner_key(PartnerKey::new("partner-key").unwrap())
///     .build()
///     .unwrap();
///
/// let url = authorization_url(&config, "https://myapp.example.com/callback").unwrap();
/// assert!(url.starts_with("https://partner.shopeemobile.com/api/v2/shop/auth_partner?"));
/// assert!(url.contains("redirect=https%3A%2F%2Fmyapp.example.com%2Fcallback"));
/// ```
pub fn authorization_url(config: &ShopeeConfig, redirect: &str) -> Result<String, SdkError> {
    build_authorization_url(config, redirect, Utc::now().timestamp())
}

fn build_authorization_url(
    config: &ShopeeConfig,
    redirect: &str,
    timestamp: i64,
) -> Result<String, SdkError> {
    let base = config.base_url().as_ref();
    let parsed = Url::parse(base).map_err(|e| SdkError::InvalidUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })?;
    let sign_path = format!("{}{AUTH_PARTNER_PATH}", parsed.path().trim_end_matches('/'));

    let partner_id = config.partner_id();
    let sign = SignatureBase::Public {
        partner_id,
        path: &sign_path,
        timestamp,
    }
    .sign(config.partner_key().as_ref());

    Ok(format!(
        "{base}{AUTH_PARTNER_PATH}?partner_id={partner_id}&timestamp={timestamp}&redirect={}&sign={sign}",
        urlencoding::encode(redirect)
    ))
}
