// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Order Engine - Order Lifecycle Core
//!
//! Order lifecycle and aggregation core for the bullion trading platform:
//! validates and prices new orders, persists header and items together,
//! enforces the status state machine, and rebuilds `Order` aggregates from
//! joined persistence rows.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, domain events)
//!   - `order_lifecycle`: Order aggregate, status machine, row aggregation
//!   - `shared`: Identifiers, `Money`, `Currency`, `Quantity`, `Timestamp`
//!
//! - **Application**: Orchestration
//!   - `ports`: Interfaces for collaborators (`ProductEnrichmentPort`,
//!     `PricingCalculator`, `EventPublisherPort`)
//!   - `services`: `OrderValidator`, `OrderLifecycleService`
//!   - `dto`: Request and response shapes
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: Order repository (in-memory)
//!   - `catalog`: Static product catalog
//!   - `pricing`: Flat pricing calculator
//!   - `events`: Tracing event publisher
//!   - `config`: Dependency injection container
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Services and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and wiring.
pub mod infrastructure;

/// YAML configuration loading.
pub mod config;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::order_lifecycle::{
    aggregate::{Order, OrderItem},
    repository::{OrderFilter, OrderRepository, RepositoryError},
    services::{OrderAggregator, OrderStateMachine},
    value_objects::{OrderRow, OrderStatus, OrderType, Pagination, TransitionPolicy},
};
pub use domain::shared::{Currency, Money, OrderId, Quantity, Timestamp, UserId};

// Application re-exports
pub use application::dto::{
    CreateOrderItemRequest, CreateOrderRequest, CreateOrderResponse, ListOrdersOptions,
    OrderListDto,
};
pub use application::ports::{
    EnrichmentError, EventPublisherPort, NoOpEventPublisher, PricingCalculator, PricingError,
    ProductEnrichmentPort,
};
pub use application::{
    OrderLifecycleError, OrderLifecycleService, OrderLifecycleSettings, OrderValidator,
    RequestContext, Role,
};

// Infrastructure re-exports
pub use infrastructure::config::{Container, InMemoryContainer};
pub use infrastructure::persistence::InMemoryOrderRepository;

// Configuration re-exports
pub use config::{Config, ConfigError, load_config, load_config_from_string};
