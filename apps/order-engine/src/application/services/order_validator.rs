//! Order Validator
//!
//! Checks a raw create request before any side effect and normalizes it into
//! typed values. Fail-fast: the first violation is reported.

use crate::application::dto::CreateOrderRequest;
use crate::application::errors::OrderLifecycleError;
use crate::application::ports::ItemRequest;
use crate::domain::order_lifecycle::value_objects::OrderType;
use crate::domain::shared::{Currency, CustodyServiceId, ProductId, Quantity, UserId};

/// Accepted payment method types.
pub const PAYMENT_METHOD_TYPES: [&str; 3] = ["card", "bank_transfer", "crypto"];

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrderRequest {
    /// Owning user.
    pub user_id: UserId,
    /// Normalized order type.
    pub order_type: OrderType,
    /// Lines in request order.
    pub items: Vec<ItemRequest>,
    /// Requested currency, if any.
    pub currency: Option<Currency>,
    /// Requested custody service, if any.
    pub custody_service_id: Option<CustodyServiceId>,
}

/// Stateless validator for create requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderValidator;

impl OrderValidator {
    /// Create a validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validate and normalize a create request.
    ///
    /// Checks run in this order: userId, type, items (presence, then each
    /// item's productId and quantity), shippingAddress, paymentMethod,
    /// currency, custodyServiceId.
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming the first offending field.
    pub fn validate(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<ValidatedOrderRequest, OrderLifecycleError> {
        if request.user_id.trim().is_empty() {
            return Err(OrderLifecycleError::validation("userId", "userId is required"));
        }

        let order_type = Self::validate_type(&request.order_type)?;
        let items = Self::validate_items(request)?;
        Self::validate_shipping_address(request)?;
        Self::validate_payment_method(request)?;

        let currency = request
            .currency
            .as_deref()
            .map(|code| {
                Currency::parse(code).map_err(|_| {
                    OrderLifecycleError::validation(
                        "currency",
                        format!("currency must be a three-letter code, got '{code}'"),
                    )
                })
            })
            .transpose()?;

        let custody_service_id = match request.custody_service_id.as_deref() {
            Some(id) if id.trim().is_empty() => {
                return Err(OrderLifecycleError::validation(
                    "custodyServiceId",
                    "custodyServiceId cannot be empty",
                ));
            }
            Some(id) => Some(CustodyServiceId::new(id.trim())),
            None => None,
        };

        Ok(ValidatedOrderRequest {
            user_id: UserId::new(request.user_id.trim()),
            order_type,
            items,
            currency,
            custody_service_id,
        })
    }

    fn validate_type(value: &str) -> Result<OrderType, OrderLifecycleError> {
        if value.trim().is_empty() {
            return Err(OrderLifecycleError::validation("type", "type is required"));
        }
        value.trim().parse().map_err(|_| {
            OrderLifecycleError::validation(
                "type",
                format!("type must be 'buy' or 'sell', got '{value}'"),
            )
        })
    }

    fn validate_items(request: &CreateOrderRequest) -> Result<Vec<ItemRequest>, OrderLifecycleError> {
        if request.items.is_empty() {
            return Err(OrderLifecycleError::validation(
                "items",
                "items must contain at least one item",
            ));
        }

        request
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let n = index + 1;
                if item.product_id.trim().is_empty() {
                    return Err(OrderLifecycleError::validation(
                        format!("items[{n}].productId"),
                        format!("Item {n}: productId is required"),
                    ));
                }
                if item.quantity <= 0 {
                    return Err(OrderLifecycleError::validation(
                        format!("items[{n}].quantity"),
                        format!("Item {n}: quantity must be greater than 0"),
                    ));
                }
                let quantity = u32::try_from(item.quantity).map_err(|_| {
                    OrderLifecycleError::validation(
                        format!("items[{n}].quantity"),
                        format!("Item {n}: quantity is too large"),
                    )
                })?;
                Ok(ItemRequest {
                    product_id: ProductId::new(item.product_id.trim()),
                    quantity: Quantity::new(quantity),
                })
            })
            .collect()
    }

    fn validate_shipping_address(request: &CreateOrderRequest) -> Result<(), OrderLifecycleError> {
        let Some(address) = &request.shipping_address else {
            return Ok(());
        };
        for (name, value) in address.fields() {
            if value.trim().is_empty() {
                return Err(OrderLifecycleError::validation(
                    format!("shippingAddress.{name}"),
                    format!("shippingAddress.{name} is required"),
                ));
            }
        }
        Ok(())
    }

    fn validate_payment_method(request: &CreateOrderRequest) -> Result<(), OrderLifecycleError> {
        let Some(method) = &request.payment_method else {
            return Ok(());
        };
        if PAYMENT_METHOD_TYPES.contains(&method.method_type.as_str()) {
            Ok(())
        } else {
            Err(OrderLifecycleError::validation(
                "paymentMethod.type",
                format!(
                    "paymentMethod.type must be one of {}, got '{}'",
                    PAYMENT_METHOD_TYPES.join(", "),
                    method.method_type
                ),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{
        CreateOrderItemRequest, PaymentMethodRequest, ShippingAddressRequest,
    };
    use test_case::test_case;

    fn valid_request() -> CreateOrderRequest {
        CreateOrderRequest {
            user_id: "u1".to_string(),
            order_type: "BUY".to_string(),
            items: vec![CreateOrderItemRequest::new("p1", 2)],
            ..CreateOrderRequest::default()
        }
    }

    fn full_address() -> ShippingAddressRequest {
        ShippingAddressRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            street: "12 Vault Lane".to_string(),
            city: "London".to_string(),
            state: "Greater London".to_string(),
            zip_code: "EC2R 8AH".to_string(),
            country: "GB".to_string(),
        }
    }

    fn field_of(err: OrderLifecycleError) -> String {
        match err {
            OrderLifecycleError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_minimal_request_and_normalizes_type() {
        let validated = OrderValidator::new().validate(&valid_request()).unwrap();

        assert_eq!(validated.user_id.as_str(), "u1");
        assert_eq!(validated.order_type, OrderType::Buy);
        assert_eq!(validated.items.len(), 1);
        assert_eq!(validated.items[0].quantity, Quantity::new(2));
        assert!(validated.currency.is_none());
    }

    #[test_case("buy", OrderType::Buy; "lowercase buy")]
    #[test_case("Sell", OrderType::Sell; "capitalized sell")]
    #[test_case("SELL", OrderType::Sell; "uppercase sell")]
    fn type_is_case_insensitive(raw: &str, expected: OrderType) {
        let mut request = valid_request();
        request.order_type = raw.to_string();
        assert_eq!(OrderValidator::new().validate(&request).unwrap().order_type, expected);
    }

    #[test]
    fn user_id_required() {
        let mut request = valid_request();
        request.user_id = "  ".to_string();
        assert_eq!(field_of(OrderValidator::new().validate(&request).unwrap_err()), "userId");
    }

    #[test]
    fn user_id_checked_before_type() {
        let mut request = valid_request();
        request.user_id = String::new();
        request.order_type = "hold".to_string();
        assert_eq!(field_of(OrderValidator::new().validate(&request).unwrap_err()), "userId");
    }

    #[test_case(""; "missing")]
    #[test_case("hold"; "unknown")]
    fn type_rejected(raw: &str) {
        let mut request = valid_request();
        request.order_type = raw.to_string();
        assert_eq!(field_of(OrderValidator::new().validate(&request).unwrap_err()), "type");
    }

    #[test]
    fn items_required() {
        let mut request = valid_request();
        request.items.clear();
        assert_eq!(field_of(OrderValidator::new().validate(&request).unwrap_err()), "items");
    }

    #[test]
    fn item_errors_carry_one_based_index() {
        let mut request = valid_request();
        request.items.push(CreateOrderItemRequest::new("p2", 0));

        let err = OrderValidator::new().validate(&request).unwrap_err();

        assert_eq!(
            err,
            OrderLifecycleError::Validation {
                field: "items[2].quantity".to_string(),
                message: "Item 2: quantity must be greater than 0".to_string(),
            }
        );
    }

    #[test]
    fn first_bad_item_wins() {
        let mut request = valid_request();
        request.items = vec![
            CreateOrderItemRequest::new("", 1),
            CreateOrderItemRequest::new("p2", -1),
        ];
        let err = OrderValidator::new().validate(&request).unwrap_err();
        assert_eq!(field_of(err), "items[1].productId");
    }

    #[test]
    fn oversized_quantity_rejected() {
        let mut request = valid_request();
        request.items = vec![CreateOrderItemRequest::new("p1", i64::from(u32::MAX) + 1)];
        assert!(OrderValidator::new().validate(&request).is_err());
    }

    #[test]
    fn full_shipping_address_accepted() {
        let mut request = valid_request();
        request.shipping_address = Some(full_address());
        assert!(OrderValidator::new().validate(&request).is_ok());
    }

    #[test]
    fn partial_shipping_address_rejected() {
        let mut request = valid_request();
        let mut address = full_address();
        address.city = String::new();
        address.country = String::new();
        request.shipping_address = Some(address);

        let err = OrderValidator::new().validate(&request).unwrap_err();

        assert_eq!(field_of(err), "shippingAddress.city");
    }

    #[test_case("card", true)]
    #[test_case("bank_transfer", true)]
    #[test_case("crypto", true)]
    #[test_case("cash", false)]
    #[test_case("", false)]
    fn payment_method_membership(method_type: &str, ok: bool) {
        let mut request = valid_request();
        request.payment_method = Some(PaymentMethodRequest {
            method_type: method_type.to_string(),
        });
        assert_eq!(OrderValidator::new().validate(&request).is_ok(), ok);
    }

    #[test]
    fn currency_normalized_when_valid() {
        let mut request = valid_request();
        request.currency = Some("eur".to_string());
        let validated = OrderValidator::new().validate(&request).unwrap();
        assert_eq!(validated.currency.unwrap().as_str(), "EUR");
    }

    #[test]
    fn bad_currency_rejected() {
        let mut request = valid_request();
        request.currency = Some("EURO".to_string());
        assert_eq!(field_of(OrderValidator::new().validate(&request).unwrap_err()), "currency");
    }

    #[test]
    fn blank_custody_service_rejected() {
        let mut request = valid_request();
        request.custody_service_id = Some(" ".to_string());
        assert_eq!(
            field_of(OrderValidator::new().validate(&request).unwrap_err()),
            "custodyServiceId"
        );
    }
}
