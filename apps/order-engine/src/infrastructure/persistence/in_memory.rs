//! In-memory order repository.
//!
//! Keeps normalized `orders`, `order_items` and `custody_services` tables and
//! answers reads with joined rows, the way a relational adapter would.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::order_lifecycle::aggregate::Order;
use crate::domain::order_lifecycle::repository::{OrderFilter, OrderRepository, RepositoryError};
use crate::domain::order_lifecycle::value_objects::{
    CustodianRef, CustodyServiceRef, OrderRow, OrderStatus, OrderType,
};
use crate::domain::shared::{
    CustodyServiceId, OrderId, OrderItemId, ProductId, Timestamp, UserId,
};

#[derive(Debug, Clone)]
struct OrderRecord {
    id: OrderId,
    user_id: UserId,
    order_type: OrderType,
    status: OrderStatus,
    order_number: String,
    currency: String,
    payment_status: String,
    custody_service_id: Option<CustodyServiceId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

// Numeric columns are stored as text, like NUMERIC columns read back
// through a relational driver.
#[derive(Debug, Clone)]
struct ItemRecord {
    id: OrderItemId,
    order_id: OrderId,
    product_id: ProductId,
    product_name: String,
    quantity: String,
    unit_price: String,
    total_price: String,
    created_at: Timestamp,
}

#[derive(Debug, Clone)]
struct CustodyRecord {
    service: CustodyServiceRef,
    custodian: CustodianRef,
}

#[derive(Debug, Default)]
struct Tables {
    orders: Vec<OrderRecord>,
    items: Vec<ItemRecord>,
    custody_services: HashMap<CustodyServiceId, CustodyRecord>,
}

impl Tables {
    fn rows_for(&self, order: &OrderRecord) -> Vec<OrderRow> {
        let custody = order
            .custody_service_id
            .as_ref()
            .and_then(|id| self.custody_services.get(id));

        let base = OrderRow {
            order_id: order.id.clone(),
            user_id: order.user_id.clone(),
            order_type: order.order_type,
            status: order.status,
            order_number: Some(order.order_number.clone()),
            currency: Some(order.currency.clone()),
            payment_status: Some(order.payment_status.clone()),
            created_at: order.created_at,
            updated_at: order.updated_at,
            item_id: None,
            product_id: None,
            product_name: None,
            quantity: None,
            unit_price: None,
            total_price: None,
            item_created_at: None,
            custody_service_id: custody.map(|c| c.service.id.clone()),
            custody_service_name: custody.map(|c| c.service.name.clone()),
            custody_fee: custody.map(|c| c.service.fee.amount().to_string()),
            custody_currency: custody.map(|c| c.service.currency.as_str().to_string()),
            custodian_id: custody.map(|c| c.custodian.id.clone()),
            custodian_name: custody.map(|c| c.custodian.name.clone()),
        };

        let mut items: Vec<&ItemRecord> = self
            .items
            .iter()
            .filter(|item| item.order_id == order.id)
            .collect();
        // Stable: ties keep insertion order.
        items.sort_by_key(|item| item.created_at);

        if items.is_empty() {
            return vec![base];
        }

        items
            .into_iter()
            .map(|item| OrderRow {
                item_id: Some(item.id.clone()),
                product_id: Some(item.product_id.clone()),
                product_name: Some(item.product_name.clone()),
                quantity: Some(item.quantity.clone()),
                unit_price: Some(item.unit_price.clone()),
                total_price: Some(item.total_price.clone()),
                item_created_at: Some(item.created_at),
                ..base.clone()
            })
            .collect()
    }

    fn matching<'a>(&'a self, filter: &'a OrderFilter) -> impl Iterator<Item = &'a OrderRecord> {
        self.orders
            .iter()
            .filter(|o| filter.matches(&o.user_id, o.status, o.order_type))
    }
}

/// In-memory implementation of `OrderRepository`.
///
/// All tables sit behind one lock, so `save` writes the header and its items
/// atomically and `update_status` is a true compare-and-swap.
/// Suitable for testing and development. Not for production use.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    tables: RwLock<Tables>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custody service (and its custodian) that orders may
    /// reference.
    pub fn register_custody_service(&self, service: CustodyServiceRef, custodian: CustodianRef) {
        let mut tables = self.tables.write().unwrap();
        tables
            .custody_services
            .insert(service.id.clone(), CustodyRecord { service, custodian });
    }

    /// Get the number of orders in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.read().unwrap().orders.len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.read().unwrap().orders.is_empty()
    }

    /// Get the number of stored item rows.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.tables.read().unwrap().items.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().unwrap();

        if tables.orders.iter().any(|o| &o.id == order.id()) {
            return Err(RepositoryError::DuplicateOrder {
                order_id: order.id().to_string(),
            });
        }
        if let Some(custody_id) = order.custody_service_id() {
            if !tables.custody_services.contains_key(custody_id) {
                return Err(RepositoryError::Storage {
                    message: format!("custody service {custody_id} does not exist"),
                });
            }
        }

        let items: Vec<ItemRecord> = order
            .items()
            .iter()
            .map(|item| ItemRecord {
                id: item.id().clone(),
                order_id: order.id().clone(),
                product_id: item.product_id().clone(),
                product_name: item.product_name().to_string(),
                quantity: item.quantity().to_string(),
                unit_price: item.unit_price().amount().to_string(),
                total_price: item.total_price().amount().to_string(),
                created_at: item.created_at(),
            })
            .collect();

        tables.orders.push(OrderRecord {
            id: order.id().clone(),
            user_id: order.user_id().clone(),
            order_type: order.order_type(),
            status: order.status(),
            order_number: order.order_number().as_str().to_string(),
            currency: order.currency().as_str().to_string(),
            payment_status: order.payment_status().to_string(),
            custody_service_id: order.custody_service_id().cloned(),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        });
        tables.items.extend(items);
        Ok(())
    }

    async fn find_joined_rows_by_id(&self, id: &OrderId) -> Result<Vec<OrderRow>, RepositoryError> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .orders
            .iter()
            .find(|o| &o.id == id)
            .map(|o| tables.rows_for(o))
            .unwrap_or_default())
    }

    async fn find_joined_rows_by_filter(
        &self,
        filter: &OrderFilter,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<OrderRow>, RepositoryError> {
        let tables = self.tables.read().unwrap();

        let mut orders: Vec<&OrderRecord> = tables.matching(filter).collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        Ok(orders
            .into_iter()
            .skip(skip)
            .take(limit as usize)
            .flat_map(|o| tables.rows_for(o))
            .collect())
    }

    async fn count_by_filter(&self, filter: &OrderFilter) -> Result<u64, RepositoryError> {
        let tables = self.tables.read().unwrap();
        Ok(tables.matching(filter).count() as u64)
    }

    async fn update_status(
        &self,
        id: &OrderId,
        expected: OrderStatus,
        new_status: OrderStatus,
        updated_at: Timestamp,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().unwrap();
        let Some(order) = tables.orders.iter_mut().find(|o| &o.id == id) else {
            return Ok(false);
        };
        if order.status != expected {
            return Err(RepositoryError::Conflict {
                order_id: id.to_string(),
                expected,
                actual: order.status,
            });
        }
        order.status = new_status;
        order.updated_at = updated_at;
        Ok(true)
    }
}
