//! Dependency Injection Container
//!
//! Manages creation and wiring of all application components.

use std::sync::Arc;

use crate::application::ports::{EventPublisherPort, PricingCalculator, ProductEnrichmentPort};
use crate::application::services::{OrderLifecycleService, OrderLifecycleSettings};
use crate::config::Config;
use crate::domain::order_lifecycle::repository::OrderRepository;
use crate::domain::order_lifecycle::value_objects::{CustodianRef, CustodyServiceRef};
use crate::domain::shared::{Currency, ProductId};
use crate::infrastructure::catalog::{CatalogProduct, StaticProductCatalog};
use crate::infrastructure::events::TracingEventPublisher;
use crate::infrastructure::persistence::InMemoryOrderRepository;
use crate::infrastructure::pricing::FlatPricingCalculator;

/// Dependency injection container.
///
/// Holds all wired dependencies for the application. Use
/// [`Container::new`] with specific implementations, or
/// [`InMemoryContainer::from_config`] for the in-process adapters.
pub struct Container<R, P, C, E>
where
    R: OrderRepository + 'static,
    P: ProductEnrichmentPort + 'static,
    C: PricingCalculator + 'static,
    E: EventPublisherPort + 'static,
{
    // Ports
    order_repo: Arc<R>,
    catalog: Arc<P>,
    pricing: Arc<C>,
    event_publisher: Arc<E>,

    settings: OrderLifecycleSettings,
}

/// Container wired with the in-process adapters.
pub type InMemoryContainer = Container<
    InMemoryOrderRepository,
    StaticProductCatalog,
    FlatPricingCalculator,
    TracingEventPublisher,
>;

impl<R, P, C, E> Container<R, P, C, E>
where
    R: OrderRepository + 'static,
    P: ProductEnrichmentPort + 'static,
    C: PricingCalculator + 'static,
    E: EventPublisherPort + 'static,
{
    /// Create a new container with all dependencies.
    pub const fn new(
        order_repo: Arc<R>,
        catalog: Arc<P>,
        pricing: Arc<C>,
        event_publisher: Arc<E>,
        settings: OrderLifecycleSettings,
    ) -> Self {
        Self {
            order_repo,
            catalog,
            pricing,
            event_publisher,
            settings,
        }
    }

    /// Get the order repository.
    pub fn order_repo(&self) -> Arc<R> {
        Arc::clone(&self.order_repo)
    }

    /// Get the product enrichment port.
    pub fn catalog(&self) -> Arc<P> {
        Arc::clone(&self.catalog)
    }

    /// Get the pricing calculator.
    pub fn pricing(&self) -> Arc<C> {
        Arc::clone(&self.pricing)
    }

    /// Get the event publisher port.
    pub fn event_publisher(&self) -> Arc<E> {
        Arc::clone(&self.event_publisher)
    }

    /// Get the lifecycle settings.
    pub const fn settings(&self) -> &OrderLifecycleSettings {
        &self.settings
    }

    /// Create an `OrderLifecycleService`.
    pub fn order_lifecycle_service(&self) -> OrderLifecycleService<R, P, C, E> {
        OrderLifecycleService::new(
            Arc::clone(&self.order_repo),
            Arc::clone(&self.catalog),
            Arc::clone(&self.pricing),
            Arc::clone(&self.event_publisher),
            self.settings.clone(),
        )
    }
}

impl InMemoryContainer {
    /// Wire the in-process adapters from configuration.
    ///
    /// Catalog products are loaded into the static catalog and custody
    /// services are registered with the repository.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let settings = config.orders.to_settings();

        let order_repo = InMemoryOrderRepository::new();
        for entry in &config.custody.services {
            let currency = entry
                .currency
                .as_deref()
                .map_or_else(|| settings.default_currency.clone(), Currency::new);
            order_repo.register_custody_service(
                CustodyServiceRef {
                    id: entry.id.as_str().into(),
                    name: entry.name.clone(),
                    fee: entry.fee,
                    currency,
                },
                CustodianRef {
                    id: entry.custodian_id.as_str().into(),
                    name: entry.custodian_name.clone(),
                },
            );
        }

        let catalog = StaticProductCatalog::new(config.catalog.products.iter().map(|p| {
            CatalogProduct {
                id: ProductId::new(p.id.as_str()),
                name: p.name.clone(),
                unit_price: p.unit_price,
                stock: p.stock,
            }
        }));

        tracing::debug!(
            products = catalog.len(),
            custody_services = config.custody.services.len(),
            "Container wired from configuration"
        );

        Self::new(
            Arc::new(order_repo),
            Arc::new(catalog),
            Arc::new(FlatPricingCalculator::new()),
            Arc::new(TracingEventPublisher::new()),
            settings,
        )
    }
}

impl Default for InMemoryContainer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::context::RequestContext;
    use crate::application::dto::{CreateOrderItemRequest, CreateOrderRequest};
    use crate::application::ports::NoOpEventPublisher;
    use crate::config::load_config_from_string;
    use crate::domain::order_lifecycle::value_objects::TransitionPolicy;
    use crate::domain::shared::{Money, UserId};

    const YAML: &str = r#"
orders:
  default_currency: EUR
  transition_policy: permissive
catalog:
  products:
    - { id: p1, name: "Gold Bar 1oz", unit_price: "2000.00", stock: 10 }
custody:
  services:
    - id: cs1
      name: "Zurich Vault"
      fee: "12.50"
      custodian_id: c1
      custodian_name: "Alpine Custody AG"
"#;

    #[test]
    fn container_shares_its_ports() {
        let repository = Arc::new(InMemoryOrderRepository::new());
        let catalog = Arc::new(StaticProductCatalog::default());
        let settings = OrderLifecycleSettings {
            max_page_size: 25,
            ..OrderLifecycleSettings::default()
        };
        let container = Container::new(
            Arc::clone(&repository),
            Arc::clone(&catalog),
            Arc::new(FlatPricingCalculator::new()),
            Arc::new(NoOpEventPublisher),
            settings.clone(),
        );

        assert!(Arc::ptr_eq(&container.order_repo(), &repository));
        assert!(Arc::ptr_eq(&container.catalog(), &catalog));
        assert_eq!(container.settings(), &settings);
        assert_eq!(container.order_lifecycle_service().settings(), &settings);
    }

    #[test]
    fn from_config_applies_settings_and_catalog() {
        let config = load_config_from_string(YAML).unwrap();
        let container = InMemoryContainer::from_config(&config);

        assert_eq!(container.settings().default_currency.as_str(), "EUR");
        assert_eq!(
            container.settings().transition_policy,
            TransitionPolicy::Permissive
        );
        assert_eq!(container.catalog().len(), 1);
        assert!(container.order_repo().is_empty());
    }

    #[tokio::test]
    async fn custody_service_from_config_is_attached_to_orders() {
        let config = load_config_from_string(YAML).unwrap();
        let container = InMemoryContainer::from_config(&config);
        let service = container.order_lifecycle_service();

        let request = CreateOrderRequest {
            user_id: "u1".to_string(),
            order_type: "buy".to_string(),
            items: vec![CreateOrderItemRequest::new("p1", 1)],
            custody_service_id: Some("cs1".to_string()),
            ..CreateOrderRequest::default()
        };

        let response = service
            .create_order(&RequestContext::user(UserId::new("u1")), request)
            .await
            .unwrap();

        let custody = response.order.custody_service().unwrap();
        assert_eq!(custody.name, "Zurich Vault");
        assert_eq!(custody.fee, Money::from_cents(1250));
        // Falls back to the configured order currency.
        assert_eq!(custody.currency.as_str(), "EUR");
        assert_eq!(response.order.custodian().unwrap().name, "Alpine Custody AG");
    }

    #[test]
    fn default_container_is_empty() {
        let container = InMemoryContainer::default();
        assert!(container.catalog().is_empty());
        assert_eq!(container.settings(), &OrderLifecycleSettings::default());
    }
}
