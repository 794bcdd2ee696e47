//! # Shopee API Rust SDK
//!
//! A Rust SDK for the Shopee Open Platform partner API (v2), providing
//! type-safe configuration, request signing, token lifecycle handling and an
//! async dispatcher for partner and shop endpoints.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ShopeeConfig`] and [`ShopeeConfigBuilder`]
//! - Validated newtypes for partner credentials and base URLs
//! - Region-based endpoint selection via [`ShopeeRegion`]
//! - HMAC-SHA256 request signing via [`auth::signature`]
//! - Shop authorization, code exchange and token refresh via [`auth::oauth`]
//! - Pluggable token persistence via [`auth::TokenStorage`]
//! - A signed request dispatcher with one automatic refresh-and-retry on an
//!   invalid access token, via [`clients::ShopeeFetch`]
//! - Typed endpoint groups via [`managers`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shopee_api::{PartnerId, PartnerKey, ShopeeConfig, ShopeeRegion, ShopeeSdk};
//!
//! let config = ShopeeConfig::builder()
//!     .partner_id(PartnerId::new(2_001_887).unwrap())
//!     .partner_key(PartnerKey::new("your-partner-key").unwrap())
//!     .region(ShopeeRegion::Global)
//!     .build()
//!     .unwrap();
//!
//! let sdk = ShopeeSdk::new(config);
//! ```
//!
//! ## Shop Authorization
//!
//! ```rust,ignore
//! // Step 1: send the seller to the authorization page
//! let url = sdk.authorization_url("https://your-app.com/callback")?;
//!
//! // Step 2: on callback, exchange the code; the token is stored
//! let token = sdk.authenticate_with_code(&code, Some(shop_id), None).await?;
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use shopee_api::managers::{GetOrderListParams, TimeRangeField};
//!
//! let params = GetOrderListParams {
//!     time_range_field: TimeRangeField::CreateTime,
//!     time_from: 1_700_000_000,
//!     time_to: 1_700_864_000,
//!     page_size: 20,
//!     ..Default::default()
//! };
//! let page = sdk.order().get_order_list(&params).await?;
//!
//! // Endpoints without a manager method go through the dispatcher directly
//! use shopee_api::clients::RequestOptions;
//! let info: serde_json::Value = sdk
//!     .fetcher()
//!     .fetch("/shop/get_shop_info", RequestOptions::get().auth(true))
//!     .await?;
//! ```
//!
//! ## Error Handling
//!
//! Every async operation returns [`ShopeeError`], which is either a platform
//! error ([`ApiError`], carrying the HTTP status and error code) or a local
//! failure ([`SdkError`], e.g. network errors or a missing token).
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Explicit token flow**: the dispatcher borrows a [`auth::TokenProvider`]
//!   instead of reaching back into the SDK

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod managers;
mod sdk;

// Re-export public types at crate root for convenience
pub use auth::AccessToken;
pub use config::{BaseUrl, PartnerId, PartnerKey, ShopeeConfig, ShopeeConfigBuilder, ShopeeRegion};
pub use error::ConfigError;
pub use sdk::ShopeeSdk;

// Re-export dispatcher types
pub use clients::{
    ApiError, ApiResponse, HttpMethod, RequestOptions, SdkError, ShopeeError, ShopeeFetch,
};
