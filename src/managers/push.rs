//! Push (webhook) configuration endpoints.
//!
//! These are partner-level calls: they are signed without a shop token.

use serde::{Deserialize, Serialize};

use crate::clients::{ApiResponse, RequestOptions, SdkError, ShopeeError};
use crate::ShopeeSdk;

/// Body for `/push/set_app_push_config`.
///
/// Push types are the platform's numeric push codes (1 to 13).
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct SetAppPushConfigParams {
    /// Where the platform delivers pushes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Push types to enable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_push_config_on: Option<Vec<u8>>,
    /// Push types to disable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_push_config_off: Option<Vec<u8>>,
    /// Shops excluded from pushes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_shop_id_list: Option<Vec<u64>>,
}

/// Payload of `/push/set_app_push_config`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SetAppPushConfigResponse {
    /// `success` when the configuration was applied.
    #[serde(default)]
    pub result: String,
}

/// Health of live push delivery.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LivePushStatus {
    /// Deliveries are succeeding.
    Normal,
    /// Too many deliveries are failing.
    Warning,
    /// Delivery is suspended.
    Suspended,
}

/// Payload of `/push/get_app_push_config`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GetAppPushConfigResponse {
    /// Where the platform delivers pushes.
    #[serde(default)]
    pub callback_url: String,
    /// Delivery health.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_push_status: Option<LivePushStatus>,
    /// When delivery was suspended, Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspended_time: Option<i64>,
    /// Shops excluded from pushes.
    #[serde(default)]
    pub blocked_shop_id: Vec<u64>,
    /// Enabled push types.
    #[serde(default)]
    pub push_config_on_list: Vec<u8>,
    /// Disabled push types.
    #[serde(default)]
    pub push_config_off_list: Vec<u8>,
}

/// Push configuration endpoints, bound to a [`ShopeeSdk`].
#[derive(Clone, Copy, Debug)]
pub struct PushManager<'a> {
    sdk: &'a ShopeeSdk,
}

impl<'a> PushManager<'a> {
    pub(crate) const fn new(sdk: &'a ShopeeSdk) -> Self {
        Self { sdk }
    }

    /// Updates the app's push callback URL and enabled push types.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] if the call fails.
    pub async fn set_app_push_config(
        &self,
        params: &SetAppPushConfigParams,
    ) -> Result<ApiResponse<SetAppPushConfigResponse>, ShopeeError> {
        let body = serde_json::to_value(params).map_err(|e| SdkError::Serialization {
            reason: e.to_string(),
        })?;
        self.sdk
            .fetcher()
            .fetch(
                "/push/set_app_push_config",
                RequestOptions::post().body(body),
            )
            .await
    }

    /// Reads the app's push configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] if the call fails.
    pub async fn get_app_push_config(
        &self,
    ) -> Result<ApiResponse<GetAppPushConfigResponse>, ShopeeError> {
        self.sdk
            .fetcher()
            .fetch("/push/get_app_push_config", RequestOptions::get())
            .await
    }
}
