//! Infrastructure Layer
//!
//! This module contains all adapters (implementations) for the ports defined
//! in the application and domain layers. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**: Implement ports for external systems
//!   - `persistence/`: Order repository adapters
//!   - `catalog/`: Product enrichment adapters
//!   - `pricing/`: Pricing calculators
//!   - `events/`: Domain event publishers
//!
//! - **Wiring**
//!   - `config/`: Dependency injection container

pub mod catalog;
pub mod config;
pub mod events;
pub mod persistence;
pub mod pricing;
