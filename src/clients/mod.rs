//! Request dispatch for the Shopee partner API.
//!
//! # Overview
//!
//! - [`ShopeeFetch`]: signs, sends and classifies every API call
//! - [`RequestOptions`]: method, parameters, body, headers and auth mode
//! - [`Params`] / [`ParamValue`]: ordered query parameters; lists expand to
//!   repeated keys
//! - [`ApiResponse`]: the `request_id`/`error`/`message`/`response` envelope
//! - [`ApiError`], [`SdkError`], [`ShopeeError`]: the error taxonomy
//!
//! # Retry Behavior
//!
//! Exactly one failure is retried: an authenticated call rejected with the
//! platform's invalid-access-token error. The dispatcher refreshes the token
//! through its [`TokenProvider`](crate::auth::TokenProvider) and re-sends the
//! request once with a fresh signature. Rate limits, server errors and network
//! failures are returned to the caller unchanged.

mod errors;
mod fetch;
mod request;
mod response;

pub use errors::{ApiError, SdkError, ShopeeError, INVALID_ACCESS_TOKEN_ERRORS};
pub use fetch::{ShopeeFetch, SDK_NAME, SDK_VERSION};
pub use request::{HttpMethod, ParamValue, Params, RequestOptions};
pub use response::ApiResponse;
