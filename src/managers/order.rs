//! Order endpoints.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopee_api::managers::{GetOrderListParams, OrderStatus, TimeRangeField};
//!
//! let params = GetOrderListParams {
//!     time_range_field: TimeRangeField::CreateTime,
//!     time_from: 1_700_000_000,
//!     time_to: 1_700_864_000,
//!     page_size: 50,
//!     order_status: Some(OrderStatus::ReadyToShip),
//!     ..Default::default()
//! };
//!
//! let page = sdk.order().get_order_list(&params).await?;
//! for order in page.response.map(|r| r.order_list).unwrap_or_default() {
//!     println!("{}", order.order_sn);
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::{ApiResponse, Params, RequestOptions, ShopeeError};
use crate::ShopeeSdk;

/// Which timestamp `time_from`/`time_to` filter on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeRangeField {
    /// Order creation time.
    #[default]
    CreateTime,
    /// Last update time.
    UpdateTime,
}

/// Order status as reported by the platform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Awaiting buyer payment.
    Unpaid,
    /// Paid, ready for the seller to arrange shipment.
    ReadyToShip,
    /// Shipment arranged.
    Processed,
    /// Handed to the carrier.
    Shipped,
    /// Delivered and closed.
    Completed,
    /// Buyer requested cancellation.
    InCancel,
    /// Cancelled.
    Cancelled,
    /// Waiting for invoice (Brazil).
    InvoicePending,
    /// Pending platform checks.
    Pending,
}

/// Query for `/order/get_order_list`.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct GetOrderListParams {
    /// Field `time_from`/`time_to` apply to.
    pub time_range_field: TimeRangeField,
    /// Range start, Unix seconds. The range may span at most 15 days.
    pub time_from: i64,
    /// Range end, Unix seconds.
    pub time_to: i64,
    /// Entries per page, 1 to 100.
    pub page_size: u32,
    /// Cursor from the previous page's `next_cursor`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Only orders in this status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_status: Option<OrderStatus>,
    /// Comma-separated optional response fields, e.g. `order_status`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_optional_fields: Option<String>,
    /// Include orders in `PENDING` status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_order_status_pending: Option<bool>,
    /// Logistics channel filter (Brazil only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logistics_channel_id: Option<u64>,
}

/// One row of an order list page.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OrderListItem {
    /// Order serial number.
    pub order_sn: String,
    /// Present when requested via `response_optional_fields`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_status: Option<OrderStatus>,
    /// Booking serial number for advance-fulfilment orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_sn: Option<String>,
}

/// Payload of `/order/get_order_list`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GetOrderListResponse {
    /// Whether another page exists.
    #[serde(default)]
    pub more: bool,
    /// Cursor for the next page.
    #[serde(default)]
    pub next_cursor: String,
    /// Orders on this page.
    #[serde(default)]
    pub order_list: Vec<OrderListItem>,
}

/// Query for `/order/get_order_detail`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOrderDetailParams {
    /// Orders to fetch, 1 to 50.
    pub order_sn_list: Vec<String>,
    /// Include `PENDING` status and `pending_terms`.
    pub request_order_status_pending: Option<bool>,
    /// Comma-separated optional response fields.
    pub response_optional_fields: Option<String>,
}

impl GetOrderDetailParams {
    /// Query parameters; `order_sn_list` is sent as one comma-joined value.
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("order_sn_list", self.order_sn_list.join(","));
        params.insert_opt(
            "request_order_status_pending",
            self.request_order_status_pending,
        );
        params.insert_opt(
            "response_optional_fields",
            self.response_optional_fields.as_deref(),
        );
        params
    }
}

/// An order as returned by `/order/get_order_detail`.
///
/// Fields not listed here (they depend on `response_optional_fields`) are kept
/// in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Order {
    /// Order serial number.
    pub order_sn: String,
    /// Two-letter region code.
    #[serde(default)]
    pub region: String,
    /// Currency code.
    #[serde(default)]
    pub currency: String,
    /// Cash on delivery.
    #[serde(default)]
    pub cod: bool,
    /// Current status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_status: Option<OrderStatus>,
    /// Creation time, Unix seconds.
    #[serde(default)]
    pub create_time: i64,
    /// Last update time, Unix seconds.
    #[serde(default)]
    pub update_time: i64,
    /// Days the seller has to ship.
    #[serde(default)]
    pub days_to_ship: i64,
    /// Ship-by deadline, Unix seconds.
    #[serde(default)]
    pub ship_by_date: i64,
    /// Buyer's note to the seller.
    #[serde(default)]
    pub message_to_seller: String,
    /// Total paid by the buyer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of `/order/get_order_detail`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GetOrderDetailResponse {
    /// The requested orders.
    #[serde(default)]
    pub order_list: Vec<Order>,
}

/// Query for `/order/get_shipment_list`.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct GetShipmentListParams {
    /// Entries per page, 1 to 100.
    pub page_size: u32,
    /// Cursor from the previous page's `next_cursor`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// An order awaiting shipment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShipmentListItem {
    /// Order serial number.
    pub order_sn: String,
    /// Package within the order.
    #[serde(default)]
    pub package_number: String,
}

/// Payload of `/order/get_shipment_list`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GetShipmentListResponse {
    /// Whether another page exists.
    #[serde(default)]
    pub more: bool,
    /// Cursor for the next page.
    #[serde(default)]
    pub next_cursor: String,
    /// Orders on this page.
    #[serde(default)]
    pub order_list: Vec<ShipmentListItem>,
}

/// Order endpoints, bound to a [`ShopeeSdk`]. All calls are shop-authenticated.
#[derive(Clone, Copy, Debug)]
pub struct OrderManager<'a> {
    sdk: &'a ShopeeSdk,
}

impl<'a> OrderManager<'a> {
    pub(crate) const fn new(sdk: &'a ShopeeSdk) -> Self {
        Self { sdk }
    }

    /// Searches orders in a time range, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] if the call fails.
    pub async fn get_order_list(
        &self,
        params: &GetOrderListParams,
    ) -> Result<ApiResponse<GetOrderListResponse>, ShopeeError> {
        let options = RequestOptions::get()
            .auth(true)
            .params(Params::from_serialize(params)?);
        self.sdk
            .fetcher()
            .fetch("/order/get_order_list", options)
            .await
    }

    /// Fetches full details for up to 50 orders.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] if the call fails.
    pub async fn get_order_detail(
        &self,
        params: &GetOrderDetailParams,
    ) -> Result<ApiResponse<GetOrderDetailResponse>, ShopeeError> {
        let options = RequestOptions::get().auth(true).params(params.to_params());
        self.sdk
            .fetcher()
            .fetch("/order/get_order_detail", options)
            .await
    }

    /// Lists `READY_TO_SHIP` orders awaiting shipment arrangement.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] if the call fails.
    pub async fn get_shipment_list(
        &self,
        params: &GetShipmentListParams,
    ) -> Result<ApiResponse<GetShipmentListResponse>, ShopeeError> {
        let options = RequestOptions::get()
            .auth(true)
            .params(Params::from_serialize(params)?);
        self.sdk
            .fetcher()
            .fetch("/order/get_shipment_list", options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ParamValue;
    use serde_json::json;

    #[test]
    fn test_order_list_params_skip_absent_fields() {
        let params = Params::from_serialize(&GetOrderListParams {
            time_from: 1,
            time_to: 2,
            page_size: 20,
            order_status: Some(OrderStatus::ReadyToShip),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            params.get("time_range_field"),
            Some(&ParamValue::String("create_time".to_string()))
        );
        assert_eq!(
            params.get("order_status"),
            Some(&ParamValue::String("READY_TO_SHIP".to_string()))
        );
        assert!(params.get("cursor").is_none());
        assert!(params.get("logistics_channel_id").is_none());
    }

    #[test]
    fn test_order_detail_joins_order_sn_list() {
        let params = GetOrderDetailParams {
            order_sn_list: vec!["A1".to_string(), "B2".to_string()],
            response_optional_fields: Some("buyer_username,item_list".to_string()),
            ..Default::default()
        }
        .to_params();

        assert_eq!(
            params.to_pairs(),
            vec![
                ("order_sn_list".to_string(), "A1,B2".to_string()),
                (
                    "response_optional_fields".to_string(),
                    "buyer_username,item_list".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_order_keeps_unmodelled_fields() {
        let order: Order = serde_json::from_value(json!({
            "order_sn": "220101ABC",
            "region": "SG",
            "order_status": "SHIPPED",
            "buyer_username": "alice",
            "item_list": [{"item_id": 1}]
        }))
        .unwrap();

        assert_eq!(order.order_status, Some(OrderStatus::Shipped));
        assert_eq!(order.extra["buyer_username"], "alice");
        assert!(order.extra.contains_key("item_list"));
        assert!(!order.extra.contains_key("region"));
    }
}
