//! Data Transfer Objects
//!
//! Request and response shapes exchanged with the controller layer.

mod order_dto;

pub use order_dto::{
    CreateOrderItemRequest, CreateOrderRequest, CreateOrderResponse, ListOrdersOptions,
    OrderListDto, PaymentMethodRequest, ShippingAddressRequest, UpdateOrderStatusRequest,
};
