//! Order Aggregator Service
//!
//! Rebuilds `Order` aggregates from the flattened join rows returned by the
//! persistence boundary. Pure and stateless: the same rows always produce
//! the same aggregates.

use std::collections::HashMap;

use crate::domain::order_lifecycle::aggregate::{
    Order, OrderItem, ReconstitutedOrderParams, DEFAULT_PAYMENT_STATUS,
};
use crate::domain::order_lifecycle::value_objects::{
    CustodianRef, CustodyServiceRef, OrderNumber, OrderRow, PricingBreakdown,
};
use crate::domain::shared::{Currency, Money, OrderId, ProductId, Quantity};

/// Groups joined rows into complete orders.
#[derive(Debug, Clone, Default)]
pub struct OrderAggregator {
    default_currency: Currency,
}

impl OrderAggregator {
    /// Create an aggregator that falls back to `default_currency` for rows
    /// without a stored currency.
    #[must_use]
    pub const fn new(default_currency: Currency) -> Self {
        Self { default_currency }
    }

    /// Rebuild one order per distinct order id, in first-seen order.
    ///
    /// Items keep the order of their rows. Totals are always recomputed from
    /// the items.
    #[must_use]
    pub fn aggregate(&self, rows: &[OrderRow]) -> Vec<Order> {
        let mut groups: Vec<Vec<&OrderRow>> = Vec::new();
        let mut positions: HashMap<&OrderId, usize> = HashMap::new();

        for row in rows {
            if let Some(&index) = positions.get(&row.order_id) {
                groups[index].push(row);
            } else {
                positions.insert(&row.order_id, groups.len());
                groups.push(vec![row]);
            }
        }

        groups
            .into_iter()
            .filter_map(|group| self.build_order(&group))
            .collect()
    }

    /// Rebuild the single order carried by `rows`, if any.
    #[must_use]
    pub fn aggregate_one(&self, rows: &[OrderRow]) -> Option<Order> {
        self.aggregate(rows).into_iter().next()
    }

    fn build_order(&self, group: &[&OrderRow]) -> Option<Order> {
        let head = *group.first()?;

        let items: Vec<OrderItem> = group
            .iter()
            .filter_map(|row| Self::build_item(row))
            .collect();
        let totals = PricingBreakdown::from_items(&items);

        let order_number = head
            .order_number
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .map_or_else(|| OrderNumber::derive(&head.order_id), OrderNumber::new);

        let currency = head
            .currency
            .as_deref()
            .map_or_else(|| self.default_currency.clone(), Currency::new);

        Some(Order::reconstitute(ReconstitutedOrderParams {
            id: head.order_id.clone(),
            order_number,
            user_id: head.user_id.clone(),
            order_type: head.order_type,
            status: head.status,
            custody_service: Self::build_custody_service(head, &currency),
            custodian: Self::build_custodian(head),
            currency,
            items,
            totals,
            payment_status: head
                .payment_status
                .clone()
                .unwrap_or_else(|| DEFAULT_PAYMENT_STATUS.to_string()),
            created_at: head.created_at,
            updated_at: head.updated_at,
        }))
    }

    fn build_item(row: &OrderRow) -> Option<OrderItem> {
        let id = row.item_id.clone()?;
        let quantity = Quantity::parse_or_zero(row.quantity.as_deref());
        let unit_price = Money::parse_or_zero(row.unit_price.as_deref());
        let total_price = row
            .total_price
            .as_deref()
            .and_then(|text| text.trim().parse().ok())
            .map_or_else(|| unit_price.times(quantity.units()), Money::new);

        Some(OrderItem::reconstitute(
            id,
            row.product_id.clone().unwrap_or_else(|| ProductId::new("")),
            row.product_name.clone().unwrap_or_default(),
            quantity,
            unit_price,
            total_price,
            row.item_created_at.unwrap_or(row.created_at),
        ))
    }

    // Fee currency falls back to the order's currency.
    fn build_custody_service(row: &OrderRow, order_currency: &Currency) -> Option<CustodyServiceRef> {
        let id = row.custody_service_id.clone()?;
        Some(CustodyServiceRef {
            id,
            name: row.custody_service_name.clone().unwrap_or_default(),
            fee: Money::parse_or_zero(row.custody_fee.as_deref()),
            currency: row
                .custody_currency
                .as_deref()
                .map_or_else(|| order_currency.clone(), Currency::new),
        })
    }

    fn build_custodian(row: &OrderRow) -> Option<CustodianRef> {
        row.custody_service_id.as_ref()?;
        let id = row.custodian_id.clone()?;
        Some(CustodianRef {
            id,
            name: row.custodian_name.clone().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_lifecycle::value_objects::{OrderStatus, OrderType};
    use crate::domain::shared::{
        CustodianId, CustodyServiceId, OrderItemId, Timestamp, UserId,
    };
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn header(order_id: &str) -> OrderRow {
        OrderRow {
            order_id: OrderId::new(order_id),
            user_id: UserId::new("u1"),
            order_type: OrderType::Buy,
            status: OrderStatus::Pending,
            order_number: None,
            currency: Some("USD".to_string()),
            payment_status: Some("pending".to_string()),
            created_at: Timestamp::parse("2026-03-01T10:00:00Z").unwrap(),
            updated_at: Timestamp::parse("2026-03-01T10:00:00Z").unwrap(),
            item_id: None,
            product_id: None,
            product_name: None,
            quantity: None,
            unit_price: None,
            total_price: None,
            item_created_at: None,
            custody_service_id: None,
            custody_service_name: None,
            custody_fee: None,
            custody_currency: None,
            custodian_id: None,
            custodian_name: None,
        }
    }

    fn item_row(order_id: &str, item_id: &str, quantity: &str, unit: &str, total: &str) -> OrderRow {
        OrderRow {
            item_id: Some(OrderItemId::new(item_id)),
            product_id: Some(ProductId::new(format!("prod-{item_id}"))),
            product_name: Some(format!("Product {item_id}")),
            quantity: Some(quantity.to_string()),
            unit_price: Some(unit.to_string()),
            total_price: Some(total.to_string()),
            item_created_at: Some(Timestamp::parse("2026-03-01T10:00:01Z").unwrap()),
            ..header(order_id)
        }
    }

    fn aggregator() -> OrderAggregator {
        OrderAggregator::new(Currency::usd())
    }

    #[test]
    fn groups_n_item_rows_and_sentinel_row() {
        let rows = vec![
            item_row("o1", "i1", "2", "100.00", "200.00"),
            item_row("o1", "i2", "1", "50.00", "50.00"),
            item_row("o1", "i3", "3", "10.00", "30.00"),
            header("o2"),
        ];

        let orders = aggregator().aggregate(&rows);

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id().as_str(), "o1");
        assert_eq!(orders[0].items().len(), 3);
        assert_eq!(orders[1].id().as_str(), "o2");
        assert!(orders[1].items().is_empty());
    }

    #[test]
    fn grouping_preserves_first_seen_order() {
        let rows = vec![
            item_row("zz", "i1", "1", "1", "1"),
            item_row("aa", "i2", "1", "1", "1"),
            item_row("zz", "i3", "1", "1", "1"),
        ];

        let orders = aggregator().aggregate(&rows);

        let ids: Vec<&str> = orders.iter().map(|o| o.id().as_str()).collect();
        assert_eq!(ids, vec!["zz", "aa"]);
        let items: Vec<&str> = orders[0].items().iter().map(|i| i.id().as_str()).collect();
        assert_eq!(items, vec!["i1", "i3"]);
    }

    #[test]
    fn zero_item_order_has_zero_totals() {
        let orders = aggregator().aggregate(&[header("o1")]);

        assert_eq!(orders.len(), 1);
        assert!(orders[0].items().is_empty());
        assert_eq!(orders[0].subtotal(), Money::ZERO);
        assert_eq!(orders[0].total_amount(), Money::ZERO);
    }

    #[test]
    fn totals_are_recomputed_from_items() {
        let rows = vec![
            item_row("o1", "i1", "2", "100.00", "200.00"),
            item_row("o1", "i2", "1", "49.99", "49.99"),
        ];

        let order = aggregator().aggregate_one(&rows).unwrap();

        assert_eq!(order.subtotal().amount(), dec!(249.99));
        assert_eq!(order.taxes(), Money::ZERO);
        assert_eq!(order.total_amount(), order.subtotal() + order.taxes());
        assert!(order.totals().verify(order.items()).is_ok());
    }

    #[test]
    fn garbled_numbers_degrade_to_zero() {
        let rows = vec![item_row("o1", "i1", "two", "abc", "n/a")];

        let order = aggregator().aggregate_one(&rows).unwrap();

        assert_eq!(order.items().len(), 1);
        assert_eq!(order.items()[0].quantity(), Quantity::ZERO);
        assert_eq!(order.items()[0].total_price(), Money::ZERO);
        assert_eq!(order.subtotal(), Money::ZERO);
    }

    #[test]
    fn overflowing_line_total_degrades_to_zero() {
        let mut row = item_row("o1", "i1", "2", "79228162514264337593543950335", "");
        row.total_price = None;

        let order = aggregator().aggregate_one(&[row]).unwrap();

        assert_eq!(order.items()[0].total_price(), Money::ZERO);
        assert_eq!(order.subtotal(), Money::ZERO);
        assert!(order.totals().verify(order.items()).is_ok());
    }

    #[test]
    fn overflowing_subtotal_degrades_to_zero() {
        let huge = "79228162514264337593543950335";
        let rows = vec![
            item_row("o1", "i1", "1", huge, huge),
            item_row("o1", "i2", "1", huge, huge),
            item_row("o2", "i3", "1", "5.00", "5.00"),
        ];

        let orders = aggregator().aggregate(&rows);

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].items().len(), 2);
        assert_eq!(orders[0].subtotal(), Money::ZERO);
        assert_eq!(orders[0].total_amount(), Money::ZERO);
        assert_eq!(orders[1].subtotal(), Money::from_units(5));
    }

    #[test]
    fn missing_total_price_is_recomputed() {
        let mut row = item_row("o1", "i1", "3", "10.005", "");
        row.total_price = None;

        let order = aggregator().aggregate_one(&[row]).unwrap();

        assert_eq!(order.items()[0].total_price().amount(), dec!(30.02));
    }

    #[test]
    fn derives_order_number_when_not_stored() {
        let id = OrderId::generate();
        let order = aggregator()
            .aggregate_one(&[header(id.as_str())])
            .unwrap();
        assert_eq!(order.order_number(), &OrderNumber::derive(&id));
    }

    #[test]
    fn keeps_stored_order_number() {
        let mut row = header("o1");
        row.order_number = Some("ORD-LEGACY01".to_string());

        let order = aggregator().aggregate_one(&[row]).unwrap();

        assert_eq!(order.order_number().as_str(), "ORD-LEGACY01");
    }

    #[test]
    fn missing_currency_and_payment_status_use_defaults() {
        let mut row = header("o1");
        row.currency = None;
        row.payment_status = None;

        let order = OrderAggregator::new(Currency::new("EUR"))
            .aggregate_one(&[row])
            .unwrap();

        assert_eq!(order.currency().as_str(), "EUR");
        assert_eq!(order.payment_status(), "pending");
    }

    #[test]
    fn custody_present_only_when_foreign_key_set() {
        let mut with_custody = header("o1");
        with_custody.custody_service_id = Some(CustodyServiceId::new("cs-1"));
        with_custody.custody_service_name = Some("Zurich Vault".to_string());
        with_custody.custody_fee = Some("12.50".to_string());
        with_custody.custody_currency = Some("CHF".to_string());
        with_custody.custodian_id = Some(CustodianId::new("cust-1"));
        with_custody.custodian_name = Some("Alpine Custody AG".to_string());

        let orders = aggregator().aggregate(&[with_custody, header("o2")]);

        let custody = orders[0].custody_service().unwrap();
        assert_eq!(custody.id.as_str(), "cs-1");
        assert_eq!(custody.fee.amount(), dec!(12.50));
        assert_eq!(custody.currency.as_str(), "CHF");
        assert_eq!(orders[0].custodian().unwrap().name, "Alpine Custody AG");
        assert_eq!(orders[0].custody_service_id().map(CustodyServiceId::as_str), Some("cs-1"));

        assert!(orders[1].custody_service().is_none());
        assert!(orders[1].custodian().is_none());
    }

    #[test]
    fn empty_rows_yield_no_orders() {
        assert!(aggregator().aggregate(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn aggregation_is_deterministic(
            layout in prop::collection::vec((0usize..4, 0u32..20, 0i64..100_000), 0..25)
        ) {
            let rows: Vec<OrderRow> = layout
                .iter()
                .enumerate()
                .map(|(n, (order, qty, cents))| {
                    let unit = Money::from_cents(*cents);
                    item_row(
                        &format!("o{order}"),
                        &format!("i{n}"),
                        &qty.to_string(),
                        &unit.to_string(),
                        &unit.times(*qty).to_string(),
                    )
                })
                .collect();

            let first = aggregator().aggregate(&rows);
            let second = aggregator().aggregate(&rows);

            prop_assert_eq!(&first, &second);
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
            for order in &first {
                prop_assert!(order.totals().verify(order.items()).is_ok());
            }
        }
    }
}
