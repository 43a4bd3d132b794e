//! Order DTOs
//!
//! Request fields are deliberately loose (strings, signed numbers, defaults
//! for missing keys) so that malformed input reaches the
//! [`OrderValidator`](crate::application::services::OrderValidator) and fails
//! with a field-level validation error instead of a deserialization error.

use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::aggregate::Order;
use crate::domain::order_lifecycle::value_objects::{Pagination, PricingBreakdown};

/// Raw request to create an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Owning user.
    #[serde(default)]
    pub user_id: String,
    /// `buy` or `sell`, any case.
    #[serde(rename = "type", default)]
    pub order_type: String,
    /// Requested lines.
    #[serde(default)]
    pub items: Vec<CreateOrderItemRequest>,
    /// ISO-4217-like currency code; the configured default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Custody service to attach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custody_service_id: Option<String>,
    /// Delivery address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<ShippingAddressRequest>,
    /// Payment method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethodRequest>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One requested line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItemRequest {
    /// Product to order.
    #[serde(default)]
    pub product_id: String,
    /// Units; must be positive.
    #[serde(default)]
    pub quantity: i64,
}

impl CreateOrderItemRequest {
    /// Convenience constructor.
    #[must_use]
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Delivery address; every field is required when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressRequest {
    /// Recipient first name.
    #[serde(default)]
    pub first_name: String,
    /// Recipient last name.
    #[serde(default)]
    pub last_name: String,
    /// Street and number.
    #[serde(default)]
    pub street: String,
    /// City.
    #[serde(default)]
    pub city: String,
    /// State or region.
    #[serde(default)]
    pub state: String,
    /// Postal code.
    #[serde(default)]
    pub zip_code: String,
    /// Country.
    #[serde(default)]
    pub country: String,
}

impl ShippingAddressRequest {
    /// Fields in validation order, paired with their wire names.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("street", self.street.as_str()),
            ("city", self.city.as_str()),
            ("state", self.state.as_str()),
            ("zipCode", self.zip_code.as_str()),
            ("country", self.country.as_str()),
        ]
    }
}

/// Payment method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodRequest {
    /// One of `card`, `bank_transfer`, `crypto`.
    #[serde(rename = "type", default)]
    pub method_type: String,
}

/// Response of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    /// The persisted order.
    pub order: Order,
    /// Totals the order was built from.
    pub pricing: PricingBreakdown,
}

/// Listing options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersOptions {
    /// 1-based page; values below 1 are treated as 1.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Page size; the configured default when absent. Clamped to `[1, 100]`.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Status filter.
    #[serde(default)]
    pub status: Option<String>,
    /// `buy` / `sell` filter.
    #[serde(rename = "type", default)]
    pub order_type: Option<String>,
}

const fn default_page() -> u32 {
    1
}

impl Default for ListOrdersOptions {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: None,
            status: None,
            order_type: None,
        }
    }
}

/// Status change request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    /// Order to update.
    pub order_id: String,
    /// Target status name.
    pub status: String,
}

/// One page of orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderListDto {
    /// Orders on this page, newest first.
    pub orders: Vec<Order>,
    /// Page metadata.
    pub pagination: Pagination,
}
