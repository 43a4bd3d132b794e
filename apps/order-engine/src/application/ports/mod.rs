//! Application Ports (Driven)
//!
//! Interfaces this core requires from external collaborators.

mod event_publisher_port;
mod pricing_calculator_port;
mod product_enrichment_port;

pub use event_publisher_port::{EventPublishError, EventPublisherPort, NoOpEventPublisher};
pub use pricing_calculator_port::{PricingCalculator, PricingError, PricingLine};
pub use product_enrichment_port::{
    EnrichedItem, EnrichmentError, ItemRequest, ProductEnrichmentPort,
};
