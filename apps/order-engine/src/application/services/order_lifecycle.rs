//! Order Lifecycle Service
//!
//! Orchestrates order creation, retrieval, listing and status changes over
//! the driven ports.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::instrument;

use crate::application::context::RequestContext;
use crate::application::dto::{
    CreateOrderRequest, CreateOrderResponse, ListOrdersOptions, OrderListDto,
};
use crate::application::errors::OrderLifecycleError;
use crate::application::ports::{
    EnrichedItem, EnrichmentError, EventPublisherPort, PricingCalculator, PricingLine,
    ProductEnrichmentPort,
};
use crate::application::services::order_validator::{OrderValidator, ValidatedOrderRequest};
use crate::domain::order_lifecycle::aggregate::{CreateOrderCommand, NewOrderItem, Order};
use crate::domain::order_lifecycle::events::OrderEvent;
use crate::domain::order_lifecycle::repository::{OrderFilter, OrderRepository, RepositoryError};
use crate::domain::order_lifecycle::services::{OrderAggregator, OrderStateMachine};
use crate::domain::order_lifecycle::value_objects::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, OrderStatus, OrderType, PageRequest, Pagination,
    TransitionPolicy,
};
use crate::domain::shared::{Currency, OrderId, ProductId, Timestamp, UserId};

/// Tunables for the lifecycle service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLifecycleSettings {
    /// Currency for requests that do not name one.
    pub default_currency: Currency,
    /// Page size when the caller does not ask for one.
    pub default_page_size: u32,
    /// Upper bound on page size (never above 100).
    pub max_page_size: u32,
    /// Status transition policy.
    pub transition_policy: TransitionPolicy,
}

impl Default for OrderLifecycleSettings {
    fn default() -> Self {
        Self {
            default_currency: Currency::usd(),
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            transition_policy: TransitionPolicy::Strict,
        }
    }
}

/// Order lifecycle orchestration.
pub struct OrderLifecycleService<R, P, C, E>
where
    R: OrderRepository,
    P: ProductEnrichmentPort,
    C: PricingCalculator,
    E: EventPublisherPort,
{
    repository: Arc<R>,
    catalog: Arc<P>,
    pricing: Arc<C>,
    event_publisher: Arc<E>,
    validator: OrderValidator,
    aggregator: OrderAggregator,
    state_machine: OrderStateMachine,
    settings: OrderLifecycleSettings,
}

impl<R, P, C, E> OrderLifecycleService<R, P, C, E>
where
    R: OrderRepository,
    P: ProductEnrichmentPort,
    C: PricingCalculator,
    E: EventPublisherPort,
{
    /// Create a new OrderLifecycleService.
    pub fn new(
        repository: Arc<R>,
        catalog: Arc<P>,
        pricing: Arc<C>,
        event_publisher: Arc<E>,
        settings: OrderLifecycleSettings,
    ) -> Self {
        Self {
            repository,
            catalog,
            pricing,
            event_publisher,
            validator: OrderValidator::new(),
            aggregator: OrderAggregator::new(settings.default_currency.clone()),
            state_machine: OrderStateMachine::new(settings.transition_policy),
            settings,
        }
    }

    /// Get the settings in force.
    #[must_use]
    pub const fn settings(&self) -> &OrderLifecycleSettings {
        &self.settings
    }

    /// Validate, enrich, price and persist a new order.
    ///
    /// Nothing is persisted unless every step succeeds. The returned order is
    /// re-read from storage, so it looks exactly like a later
    /// [`get_order_by_id`](Self::get_order_by_id).
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed request, `Forbidden` when a user orders
    /// on someone else's behalf, `Enrichment` for unknown products or short
    /// stock, `Pricing`, `Domain` when the totals are inconsistent, and
    /// `Persistence` for storage failures.
    #[instrument(skip(self, ctx, request), fields(caller = %ctx.user_id, user_id = %request.user_id))]
    pub async fn create_order(
        &self,
        ctx: &RequestContext,
        request: CreateOrderRequest,
    ) -> Result<CreateOrderResponse, OrderLifecycleError> {
        let validated = self.validator.validate(&request).inspect_err(|e| {
            tracing::warn!(error = %e, "Order request rejected");
        })?;

        if !ctx.can_access(&validated.user_id) {
            return Err(forbidden(ctx, "create orders for another user"));
        }

        let enriched = self.enrich(&validated).await?;

        let lines: Vec<PricingLine> = enriched
            .iter()
            .map(|item| PricingLine {
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect();
        let pricing = self.pricing.calculate(&lines).await.inspect_err(|e| {
            tracing::warn!(error = %e, "Pricing failed");
        })?;

        let mut order = Order::new(
            CreateOrderCommand {
                user_id: validated.user_id,
                order_type: validated.order_type,
                currency: validated
                    .currency
                    .unwrap_or_else(|| self.settings.default_currency.clone()),
                items: enriched
                    .into_iter()
                    .map(|item| NewOrderItem {
                        product_id: item.product_id,
                        product_name: item.product_name,
                        quantity: item.quantity,
                        unit_price: item.unit_price,
                    })
                    .collect(),
                pricing,
                custody_service_id: validated.custody_service_id,
            },
            Timestamp::now(),
        )
        .inspect_err(|e| tracing::warn!(error = %e, "Order rejected by aggregate"))?;

        self.repository.save(&order).await.inspect_err(|e| {
            tracing::error!("Failed to save order {}: {}", order.id(), e);
        })?;

        let events = order.drain_events();
        self.publish(events).await;

        let stored = self.reload(&order).await?;
        tracing::info!(
            order_id = %stored.id(),
            order_number = %stored.order_number(),
            total_amount = %stored.total_amount(),
            items = stored.items().len(),
            "Order created"
        );

        Ok(CreateOrderResponse {
            order: stored,
            pricing,
        })
    }

    /// Fetch one order.
    ///
    /// A user asking for someone else's order gets `NotFound`.
    ///
    /// # Errors
    ///
    /// `NotFound` if no visible order has this id, `Persistence` on storage
    /// failure.
    #[instrument(skip(self, ctx), fields(caller = %ctx.user_id))]
    pub async fn get_order_by_id(
        &self,
        ctx: &RequestContext,
        order_id: &str,
    ) -> Result<Order, OrderLifecycleError> {
        let id = OrderId::new(order_id);
        let order = self.load(&id).await?;
        if !ctx.can_access(order.user_id()) {
            return Err(not_found(&id));
        }
        Ok(order)
    }

    /// List one page of orders, newest first.
    ///
    /// `user_id == None` lists every user's orders and requires an admin.
    ///
    /// # Errors
    ///
    /// `Forbidden` for listing other users' orders, `InvalidStatus` /
    /// `Validation` for bad filters, `Persistence` on storage failure.
    #[instrument(skip(self, ctx, options), fields(caller = %ctx.user_id, page = options.page))]
    pub async fn list_orders_by_user(
        &self,
        ctx: &RequestContext,
        user_id: Option<&str>,
        options: ListOrdersOptions,
    ) -> Result<OrderListDto, OrderLifecycleError> {
        let user_id = user_id.map(UserId::new);
        match &user_id {
            None if !ctx.is_admin() => return Err(forbidden(ctx, "list all orders")),
            Some(owner) if !ctx.can_access(owner) => {
                return Err(forbidden(ctx, "list another user's orders"));
            }
            _ => {}
        }

        let status = options
            .status
            .as_deref()
            .map(OrderStateMachine::parse_status)
            .transpose()?;
        let order_type = options
            .order_type
            .as_deref()
            .map(|raw| {
                raw.parse::<OrderType>().map_err(|_| {
                    OrderLifecycleError::validation(
                        "type",
                        format!("type must be 'buy' or 'sell', got '{raw}'"),
                    )
                })
            })
            .transpose()?;

        let page = PageRequest::with_max(
            options.page,
            options.limit.unwrap_or(self.settings.default_page_size),
            self.settings.max_page_size,
        );
        let filter = OrderFilter {
            user_id,
            status,
            order_type,
        };

        let total = self
            .repository
            .count_by_filter(&filter)
            .await
            .inspect_err(|e| tracing::error!("Failed to count orders: {}", e))?;
        let rows = self
            .repository
            .find_joined_rows_by_filter(&filter, page.limit(), page.offset())
            .await
            .inspect_err(|e| tracing::error!("Failed to list orders: {}", e))?;
        let orders = self.aggregator.aggregate(&rows);

        tracing::debug!(total, returned = orders.len(), "Orders listed");
        Ok(OrderListDto {
            orders,
            pagination: Pagination::new(page, total),
        })
    }

    /// Move an order to a new status.
    ///
    /// Admins may apply any allowed transition; the owning user may only
    /// cancel. The write is conditional on the status read here, so a
    /// concurrent change surfaces as `Persistence(Conflict)`.
    ///
    /// # Errors
    ///
    /// `NotFound`, `InvalidStatus`, `Forbidden`, `InvalidTransition`, or
    /// `Persistence`, checked in that order.
    #[instrument(skip(self, ctx), fields(caller = %ctx.user_id))]
    pub async fn update_order_status(
        &self,
        ctx: &RequestContext,
        order_id: &str,
        new_status: &str,
    ) -> Result<Order, OrderLifecycleError> {
        let id = OrderId::new(order_id);
        let mut order = self.load(&id).await?;
        if !ctx.can_access(order.user_id()) {
            return Err(not_found(&id));
        }

        let target = OrderStateMachine::parse_status(new_status).inspect_err(|e| {
            tracing::warn!(error = %e, "Unknown target status");
        })?;

        if !ctx.is_admin() && target != OrderStatus::Cancelled {
            return Err(forbidden(ctx, &format!("set order status to {target}")));
        }

        let previous = order
            .transition_to(target, self.state_machine.policy(), Timestamp::now())
            .inspect_err(|e| tracing::warn!(error = %e, "Status transition rejected"))?;

        let applied = self
            .repository
            .update_status(&id, previous, target, order.updated_at())
            .await
            .inspect_err(|e| {
                tracing::error!("Failed to update status of order {}: {}", id, e);
            })?;
        if !applied {
            return Err(not_found(&id));
        }

        let events = order.drain_events();
        self.publish(events).await;

        tracing::info!(order_id = %id, from = %previous, to = %target, "Order status updated");
        Ok(order)
    }

    async fn enrich(
        &self,
        validated: &ValidatedOrderRequest,
    ) -> Result<Vec<EnrichedItem>, OrderLifecycleError> {
        let enriched = self
            .catalog
            .enrich(&validated.items)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Enrichment failed"))?;

        if enriched.len() != validated.items.len() {
            return Err(EnrichmentError::Unavailable {
                message: format!(
                    "catalog returned {} lines for {} items",
                    enriched.len(),
                    validated.items.len()
                ),
            }
            .into());
        }

        // Stock is checked against the total requested per product, so a
        // product split across several lines cannot exceed it.
        let mut demand: HashMap<&ProductId, u64> = HashMap::new();
        for item in &enriched {
            *demand.entry(&item.product_id).or_default() += u64::from(item.quantity.units());
        }

        let short = enriched.iter().find_map(|item| {
            let requested = demand
                .get(&item.product_id)
                .copied()
                .unwrap_or_else(|| u64::from(item.quantity.units()));
            (!item.available || requested > u64::from(item.in_stock.units()))
                .then(|| (item, u32::try_from(requested).unwrap_or(u32::MAX)))
        });

        if let Some((item, requested)) = short {
            tracing::warn!(
                product_id = %item.product_id,
                available = item.in_stock.units(),
                requested,
                "Insufficient stock"
            );
            return Err(EnrichmentError::InsufficientStock {
                product_id: item.product_id.to_string(),
                available: item.in_stock.units(),
                requested,
            }
            .into());
        }

        Ok(enriched)
    }

    async fn load(&self, id: &OrderId) -> Result<Order, OrderLifecycleError> {
        let rows = self
            .repository
            .find_joined_rows_by_id(id)
            .await
            .inspect_err(|e| tracing::error!("Failed to load order {}: {}", id, e))?;
        self.aggregator
            .aggregate_one(&rows)
            .ok_or_else(|| not_found(id))
    }

    async fn reload(&self, order: &Order) -> Result<Order, OrderLifecycleError> {
        let rows = self.repository.find_joined_rows_by_id(order.id()).await?;
        match self.aggregator.aggregate_one(&rows) {
            Some(stored) if stored.items().len() == order.items().len() => Ok(stored),
            _ => {
                tracing::error!("Order {} was not fully persisted", order.id());
                Err(RepositoryError::PartialWrite {
                    order_id: order.id().to_string(),
                }
                .into())
            }
        }
    }

    async fn publish(&self, events: Vec<OrderEvent>) {
        if events.is_empty() {
            return;
        }
        if let Err(e) = self.event_publisher.publish_order_events(events).await {
            tracing::error!("Failed to publish events: {}", e);
        }
    }
}

fn not_found(id: &OrderId) -> OrderLifecycleError {
    OrderLifecycleError::NotFound {
        order_id: id.to_string(),
    }
}

fn forbidden(ctx: &RequestContext, action: &str) -> OrderLifecycleError {
    tracing::warn!(caller = %ctx.user_id, action, "Forbidden");
    OrderLifecycleError::Forbidden {
        user_id: ctx.user_id.to_string(),
        action: action.to_string(),
    }
}
