//! Application Layer
//!
//! The application layer orchestrates domain logic through services.
//! It defines:
//!
//! - **Ports**: Interfaces for interacting with external systems
//! - **Services**: Validation and order lifecycle orchestration
//! - **DTOs**: Data transfer objects for API boundaries
//! - **Context**: The caller identity every operation receives

pub mod context;
pub mod dto;
pub mod errors;
pub mod ports;
pub mod services;

pub use context::{RequestContext, Role};
pub use dto::*;
pub use errors::OrderLifecycleError;
pub use ports::*;
pub use services::*;
