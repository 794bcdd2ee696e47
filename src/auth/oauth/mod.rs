//! Shop authorization for Shopee partner apps.
//!
//! A shop is connected to a partner app in three steps:
//!
//! 1. **Authorization** ([`authorization_url`]): send the seller to the
//!    platform's `auth_partner` page. After approval the platform redirects
//!    back with `code` and `shop_id` (or `main_account_id`).
//!
//! 2. **Code exchange** ([`get_access_token`]): trade the one-time code for an
//!    access/refresh token pair via `/auth/token/get`.
//!
//! 3. **Refresh** ([`refresh_access_token`]): trade the refresh token for a new
//!    pair via `/auth/access_token/get` whenever the access token expires.
//!
//! All three are partner-level (unauthenticated) calls signed over
//! `partner_id, path, timestamp`. They return tokens and never store them;
//! [`ShopeeSdk`](crate::ShopeeSdk) wires them to a
//! [`TokenStorage`](crate::auth::TokenStorage).
//!
//! # Example
//!
//! ```rust,ignore
//! use shopee_api::auth::oauth::{authorization_url, get_access_token};
//!
//! let url = authorization_url(&config, "https://myapp.example.com/callback")?;
//! // Redirect the seller to `url`, then on callback:
//! let token = get_access_token(&config, &code, Some(shop_id), None).await?;
//! ```

mod authorize;
mod token;

pub use authorize::{authorization_url, AUTH_PARTNER_PATH};
pub use token::{get_access_token, refresh_access_token, ACCESS_TOKEN_GET_PATH, TOKEN_GET_PATH};
