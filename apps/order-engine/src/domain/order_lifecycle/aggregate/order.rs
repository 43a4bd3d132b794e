//! Order Aggregate Root
//!
//! The Order aggregate owns the order header, its items and the custody
//! snapshot. It enforces the totals invariants on creation and routes every
//! status change through the [`OrderStateMachine`].

use serde::{Deserialize, Serialize};

use super::{NewOrderItem, OrderItem};
use crate::domain::order_lifecycle::errors::OrderError;
use crate::domain::order_lifecycle::events::{OrderCreated, OrderEvent, OrderStatusChanged};
use crate::domain::order_lifecycle::services::OrderStateMachine;
use crate::domain::order_lifecycle::value_objects::{
    CustodianRef, CustodyServiceRef, OrderNumber, OrderStatus, OrderType, PricingBreakdown,
    TransitionPolicy,
};
use crate::domain::shared::{Currency, CustodyServiceId, Money, OrderId, Timestamp, UserId};

/// Payment status given to every new order.
pub const DEFAULT_PAYMENT_STATUS: &str = "pending";

/// Parameters for reconstituting an Order from storage.
///
/// Used by the aggregator to rebuild aggregates from joined rows.
/// No domain events are generated during reconstitution.
#[derive(Debug, Clone)]
pub struct ReconstitutedOrderParams {
    /// Order identifier.
    pub id: OrderId,
    /// Display number.
    pub order_number: OrderNumber,
    /// Owning user.
    pub user_id: UserId,
    /// Buy or sell.
    pub order_type: OrderType,
    /// Current status.
    pub status: OrderStatus,
    /// Order currency.
    pub currency: Currency,
    /// Items in insertion order.
    pub items: Vec<OrderItem>,
    /// Totals (recomputed from items by the caller).
    pub totals: PricingBreakdown,
    /// Custody service snapshot.
    pub custody_service: Option<CustodyServiceRef>,
    /// Custodian snapshot.
    pub custodian: Option<CustodianRef>,
    /// Payment status.
    pub payment_status: String,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Last update timestamp.
    pub updated_at: Timestamp,
}

/// Command to create a new order from enriched, priced lines.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    /// Owning user.
    pub user_id: UserId,
    /// Buy or sell.
    pub order_type: OrderType,
    /// Order currency.
    pub currency: Currency,
    /// Enriched lines, in request order.
    pub items: Vec<NewOrderItem>,
    /// Totals produced by the pricing calculator.
    pub pricing: PricingBreakdown,
    /// Custody service to attach, if any.
    pub custody_service_id: Option<CustodyServiceId>,
}

/// Order Aggregate Root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: OrderId,
    order_number: OrderNumber,
    user_id: UserId,
    #[serde(rename = "type")]
    order_type: OrderType,
    status: OrderStatus,
    currency: Currency,
    items: Vec<OrderItem>,
    subtotal: Money,
    taxes: Money,
    total_amount: Money,
    custody_service_id: Option<CustodyServiceId>,
    custody_service: Option<CustodyServiceRef>,
    custodian: Option<CustodianRef>,
    payment_status: String,
    created_at: Timestamp,
    updated_at: Timestamp,
    #[serde(skip)]
    events: Vec<OrderEvent>,
}

impl Order {
    /// Create a new pending order.
    ///
    /// Generates the order id and number; `created_at` and `updated_at` are
    /// both `now`. Generates an `OrderCreated` event.
    ///
    /// # Errors
    ///
    /// Returns error if the user id is blank, there are no items, an item is
    /// invalid, or the pricing totals do not match the items.
    pub fn new(cmd: CreateOrderCommand, now: Timestamp) -> Result<Self, OrderError> {
        if cmd.user_id.is_blank() {
            return Err(OrderError::InvalidParameters {
                field: "userId".to_string(),
                message: "user id cannot be empty".to_string(),
            });
        }
        if cmd.items.is_empty() {
            return Err(OrderError::InvalidParameters {
                field: "items".to_string(),
                message: "an order needs at least one item".to_string(),
            });
        }
        cmd.currency.validate()?;

        let items = cmd
            .items
            .into_iter()
            .map(|params| OrderItem::new(params, now))
            .collect::<Result<Vec<_>, _>>()?;
        cmd.pricing.verify(&items)?;

        let id = OrderId::generate();
        let order_number = OrderNumber::derive(&id);

        let mut order = Self {
            id: id.clone(),
            order_number: order_number.clone(),
            user_id: cmd.user_id.clone(),
            order_type: cmd.order_type,
            status: OrderStatus::Pending,
            currency: cmd.currency.clone(),
            items,
            subtotal: cmd.pricing.subtotal,
            taxes: cmd.pricing.taxes,
            total_amount: cmd.pricing.total_amount,
            custody_service_id: cmd.custody_service_id,
            custody_service: None,
            custodian: None,
            payment_status: DEFAULT_PAYMENT_STATUS.to_string(),
            created_at: now,
            updated_at: now,
            events: Vec::new(),
        };

        order.events.push(OrderEvent::Created(OrderCreated {
            order_id: id,
            order_number,
            user_id: cmd.user_id,
            order_type: cmd.order_type,
            item_count: order.items.len(),
            total_amount: order.total_amount,
            currency: cmd.currency,
            occurred_at: now,
        }));

        Ok(order)
    }

    /// Reconstitute an order from stored state (no events generated).
    #[must_use]
    pub fn reconstitute(params: ReconstitutedOrderParams) -> Self {
        Self {
            id: params.id,
            order_number: params.order_number,
            user_id: params.user_id,
            order_type: params.order_type,
            status: params.status,
            currency: params.currency,
            items: params.items,
            subtotal: params.totals.subtotal,
            taxes: params.totals.taxes,
            total_amount: params.totals.total_amount,
            custody_service_id: params.custody_service.as_ref().map(|c| c.id.clone()),
            custody_service: params.custody_service,
            custodian: params.custodian,
            payment_status: params.payment_status,
            created_at: params.created_at,
            updated_at: params.updated_at,
            events: Vec::new(),
        }
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the order ID.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Get the display number.
    #[must_use]
    pub const fn order_number(&self) -> &OrderNumber {
        &self.order_number
    }

    /// Get the owning user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Get the order type.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Get the current status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Get the currency.
    #[must_use]
    pub const fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Get the items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Get the subtotal.
    #[must_use]
    pub const fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// Get the taxes.
    #[must_use]
    pub const fn taxes(&self) -> Money {
        self.taxes
    }

    /// Get the total amount.
    #[must_use]
    pub const fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Get the totals as a breakdown.
    #[must_use]
    pub const fn totals(&self) -> PricingBreakdown {
        PricingBreakdown {
            subtotal: self.subtotal,
            taxes: self.taxes,
            total_amount: self.total_amount,
        }
    }

    /// Get the custody service foreign key.
    #[must_use]
    pub const fn custody_service_id(&self) -> Option<&CustodyServiceId> {
        self.custody_service_id.as_ref()
    }

    /// Get the custody service snapshot.
    #[must_use]
    pub const fn custody_service(&self) -> Option<&CustodyServiceRef> {
        self.custody_service.as_ref()
    }

    /// Get the custodian snapshot.
    #[must_use]
    pub const fn custodian(&self) -> Option<&CustodianRef> {
        self.custodian.as_ref()
    }

    /// Get the payment status.
    #[must_use]
    pub fn payment_status(&self) -> &str {
        &self.payment_status
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Get the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ========================================================================
    // State Transitions
    // ========================================================================

    /// Move the order to `target`, bumping `updated_at` (never backwards).
    ///
    /// Generates an `OrderStatusChanged` event and returns the previous
    /// status.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` if the state machine rejects the
    /// transition under `policy`; the order is left untouched.
    pub fn transition_to(
        &mut self,
        target: OrderStatus,
        policy: TransitionPolicy,
        now: Timestamp,
    ) -> Result<OrderStatus, OrderError> {
        OrderStateMachine::new(policy).validate_transition(self.status, target)?;

        let previous = self.status;
        self.status = target;
        self.updated_at = now.not_before(self.updated_at);

        self.events.push(OrderEvent::StatusChanged(OrderStatusChanged {
            order_id: self.id.clone(),
            from: previous,
            to: target,
            occurred_at: self.updated_at,
        }));

        Ok(previous)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Drain accumulated domain events.
    pub fn drain_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get pending events without draining.
    #[must_use]
    pub fn pending_events(&self) -> &[OrderEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::{ProductId, Quantity};

    fn line(product: &str, quantity: u32, unit: i64) -> NewOrderItem {
        NewOrderItem {
            product_id: ProductId::new(product),
            product_name: format!("{product} name"),
            quantity: Quantity::new(quantity),
            unit_price: Money::from_units(unit),
        }
    }

    fn make_command(items: Vec<NewOrderItem>) -> CreateOrderCommand {
        let subtotal: Money = items.iter().map(|i| i.unit_price.times(i.quantity.units())).sum();
        CreateOrderCommand {
            user_id: UserId::new("u1"),
            order_type: OrderType::Buy,
            currency: Currency::usd(),
            items,
            pricing: PricingBreakdown {
                subtotal,
                taxes: Money::ZERO,
                total_amount: subtotal,
            },
            custody_service_id: None,
        }
    }

    #[test]
    fn new_order_is_pending_with_created_event() {
        let now = Timestamp::now();
        let order = Order::new(make_command(vec![line("p1", 2, 100)]), now).unwrap();

        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.payment_status(), "pending");
        assert_eq!(order.created_at(), order.updated_at());
        assert_eq!(order.items().len(), 1);
        assert_eq!(order.total_amount(), Money::from_units(200));
        assert_eq!(order.pending_events().len(), 1);
        assert!(matches!(order.pending_events()[0], OrderEvent::Created(_)));
    }

    #[test]
    fn new_order_number_derives_from_id() {
        let order = Order::new(make_command(vec![line("p1", 1, 10)]), Timestamp::now()).unwrap();
        assert_eq!(order.order_number(), &OrderNumber::derive(order.id()));
    }

    #[test]
    fn new_order_keeps_item_order() {
        let order = Order::new(
            make_command(vec![line("p1", 1, 10), line("p2", 1, 20), line("p3", 1, 30)]),
            Timestamp::now(),
        )
        .unwrap();

        let products: Vec<&str> = order.items().iter().map(|i| i.product_id().as_str()).collect();
        assert_eq!(products, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn new_order_requires_items() {
        let err = Order::new(make_command(vec![]), Timestamp::now()).unwrap_err();
        assert!(matches!(err, OrderError::InvalidParameters { ref field, .. } if field == "items"));
    }

    #[test]
    fn new_order_rejects_inconsistent_pricing() {
        let mut cmd = make_command(vec![line("p1", 2, 100)]);
        cmd.pricing.total_amount = Money::from_units(250);

        let err = Order::new(cmd, Timestamp::now()).unwrap_err();
        assert!(matches!(err, OrderError::InvariantViolation { .. }));
    }

    #[test]
    fn new_order_rejects_blank_user() {
        let mut cmd = make_command(vec![line("p1", 1, 1)]);
        cmd.user_id = UserId::new("");
        assert!(Order::new(cmd, Timestamp::now()).is_err());
    }

    #[test]
    fn transition_keeps_updated_at_monotonic() {
        let created = Timestamp::parse("2026-03-01T10:00:00Z").unwrap();
        let skewed = Timestamp::parse("2026-03-01T09:59:00Z").unwrap();
        let mut order = Order::new(make_command(vec![line("p1", 1, 1)]), created).unwrap();

        order
            .transition_to(OrderStatus::Confirmed, TransitionPolicy::Strict, skewed)
            .unwrap();

        assert_eq!(order.updated_at(), created);
    }

    #[test]
    fn transition_updates_status_and_timestamp() {
        let created = Timestamp::parse("2026-03-01T10:00:00Z").unwrap();
        let later = Timestamp::parse("2026-03-01T11:00:00Z").unwrap();
        let mut order = Order::new(make_command(vec![line("p1", 1, 1)]), created).unwrap();
        order.drain_events();

        let previous = order
            .transition_to(OrderStatus::Confirmed, TransitionPolicy::Strict, later)
            .unwrap();

        assert_eq!(previous, OrderStatus::Pending);
        assert_eq!(order.status(), OrderStatus::Confirmed);
        assert_eq!(order.updated_at(), later);
        assert_eq!(order.created_at(), created);
        assert!(matches!(
            order.pending_events()[0],
            OrderEvent::StatusChanged(OrderStatusChanged {
                from: OrderStatus::Pending,
                to: OrderStatus::Confirmed,
                ..
            })
        ));
    }

    #[test]
    fn rejected_transition_leaves_order_untouched() {
        let now = Timestamp::now();
        let mut order = Order::new(make_command(vec![line("p1", 1, 1)]), now).unwrap();
        order.drain_events();

        let result = order.transition_to(OrderStatus::Delivered, TransitionPolicy::Strict, now);

        assert!(result.is_err());
        assert_eq!(order.status(), OrderStatus::Pending);
        assert!(order.pending_events().is_empty());
    }

    #[test]
    fn order_serializes_type_field() {
        let order = Order::new(make_command(vec![line("p1", 1, 1)]), Timestamp::now()).unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["type"], "buy");
        assert_eq!(json["status"], "pending");
        assert!(json.get("orderNumber").is_some());
        assert!(json.get("events").is_none());
    }
}
