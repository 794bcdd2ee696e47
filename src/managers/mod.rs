//! Endpoint groups built on [`ShopeeFetch`](crate::clients::ShopeeFetch).
//!
//! Each manager borrows a [`ShopeeSdk`](crate::ShopeeSdk) and maps its
//! methods to one endpoint each with a fixed path, method and auth mode:
//!
//! | Manager | Method | Endpoint | Auth |
//! |---|---|---|---|
//! | [`OrderManager`] | `get_order_list` | `GET /order/get_order_list` | shop |
//! | [`OrderManager`] | `get_order_detail` | `GET /order/get_order_detail` | shop |
//! | [`OrderManager`] | `get_shipment_list` | `GET /order/get_shipment_list` | shop |
//! | [`PushManager`] | `set_app_push_config` | `POST /push/set_app_push_config` | partner |
//! | [`PushManager`] | `get_app_push_config` | `GET /push/get_app_push_config` | partner |
//!
//! Endpoints without a manager method can be called directly with
//! [`ShopeeSdk::fetcher`](crate::ShopeeSdk::fetcher).

mod order;
mod push;

pub use order::{
    GetOrderDetailParams, GetOrderDetailResponse, GetOrderListParams, GetOrderListResponse,
    GetShipmentListParams, GetShipmentListResponse, Order, OrderListItem, OrderManager,
    OrderStatus, ShipmentListItem, TimeRangeField,
};
pub use push::{
    GetAppPushConfigResponse, LivePushStatus, PushManager, SetAppPushConfigParams,
    SetAppPushConfigResponse,
};
