//! Code exchange and token refresh.

use chrono::Utc;
use serde::Serialize;

use crate::auth::{AccessToken, AccessTokenResponse};
use crate::clients::{RequestOptions, SdkError, ShopeeError, ShopeeFetch};
use crate::config::ShopeeConfig;

/// Endpoint that exchanges an authorization code for tokens.
pub const TOKEN_GET_PATH: &str = "/auth/token/get";

/// Endpoint that exchanges a refresh token for new tokens.
pub const ACCESS_TOKEN_GET_PATH: &str = "/auth/access_token/get";

#[derive(Debug, Serialize)]
struct GetAccessTokenRequest<'a> {
    code: &'a str,
    partner_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    shop_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    main_account_id: Option<u64>,
}

#[derive(Debug, Serialize)]
struct RefreshAccessTokenRequest<'a> {
    refresh_token: &'a str,
    partner_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    shop_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_id: Option<u64>,
}

/// Exchanges an authorization code for an access token.
///
/// Pass the `shop_id` from the callback for a single-shop authorization, or
/// `main_account_id` for a main-account authorization (the token then lists
/// the covered shops in `shop_id_list`).
///
/// # Errors
///
/// - [`ShopeeError::Api`] if the platform rejects the code
/// - [`SdkError::InvalidResponse`] if the response carries no access token
/// - any transport error from [`ShopeeFetch::fetch`]
///
/// # Example
///
/// ```rust,ignore
/// use shopee_api::auth::oauth::get_access_token;
///
/// let token = get_access_token(&config, &code, Some(67_890), None).await?;
/// println!("Token expires at {}", token.expire_at);
/// ```
pub async fn get_access_token(
    config: &ShopeeConfig,
    code: &str,
    shop_id: Option<u64>,
    main_account_id: Option<u64>,
) -> Result<AccessToken, ShopeeError> {
    let body = to_body(&GetAccessTokenRequest {
        code,
        partner_id: config.partner_id().get(),
        shop_id,
        main_account_id,
    })?;

    let response: AccessTokenResponse = ShopeeFetch::new(config)
        .fetch(TOKEN_GET_PATH, RequestOptions::post().body(body))
        .await?;

    into_token(response, shop_id, None)
}

/// Exchanges a refresh token for a new access/refresh token pair.
///
/// The returned token is scoped to `shop_id` or `merchant_id` when given,
/// otherwise to the ids echoed by the platform.
///
/// # Errors
///
/// - [`ShopeeError::Api`] if the platform rejects the refresh token
/// - [`SdkError::InvalidResponse`] if the response carries no access token
/// - any transport error from [`ShopeeFetch::fetch`]
pub async fn refresh_access_token(
    config: &ShopeeConfig,
    refresh_token: &str,
    shop_id: Option<u64>,
    merchant_id: Option<u64>,
) -> Result<AccessToken, ShopeeError> {
    let body = to_body(&RefreshAccessTokenRequest {
        refresh_token,
        partner_id: config.partner_id().get(),
        shop_id,
        merchant_id,
    })?;

    let response: AccessTokenResponse = ShopeeFetch::new(config)
        .fetch(ACCESS_TOKEN_GET_PATH, RequestOptions::post().body(body))
        .await?;

    into_token(response, shop_id, merchant_id)
}

fn to_body<T: Serialize>(request: &T) -> Result<serde_json::Value, SdkError> {
    serde_json::to_value(request).map_err(|e| SdkError::Serialization {
        reason: e.to_string(),
    })
}

fn into_token(
    response: AccessTokenResponse,
    shop_id: Option<u64>,
    merchant_id: Option<u64>,
) -> Result<AccessToken, ShopeeError> {
    if response.access_token.is_empty() {
        return Err(SdkError::InvalidResponse {
            reason: "token response has no access_token".to_string(),
        }
        .into());
    }
    Ok(AccessToken::from_response(
        response,
        shop_id,
        merchant_id,
        Utc::now(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_code_exchange_body_omits_absent_ids() {
        let body = to_body(&GetAccessTokenRequest {
            code: "abc",
            partner_id: 2_001_887,
            shop_id: Some(67_890),
            main_account_id: None,
        })
        .unwrap();

        assert_eq!(
            body,
            json!({"code": "abc", "partner_id": 2_001_887, "shop_id": 67_890})
        );
    }

    #[test]
    fn test_refresh_body_shape() {
        let body = to_body(&RefreshAccessTokenRequest {
            refresh_token: "refresh",
            partner_id: 1,
            shop_id: None,
            merchant_id: Some(9),
        })
        .unwrap();

        assert_eq!(
            body,
            json!({"refresh_token": "refresh", "partner_id": 1, "merchant_id": 9})
        );
    }

    #[test]
    fn test_into_token_rejects_empty_access_token() {
        let result = into_token(AccessTokenResponse::default(), Some(1), None);
        assert!(matches!(
            result,
            Err(ShopeeError::Sdk(SdkError::InvalidResponse { .. }))
        ));
    }
}
