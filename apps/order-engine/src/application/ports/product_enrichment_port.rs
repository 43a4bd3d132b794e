//! Product Enrichment Port (Driven Port)
//!
//! Interface to the product catalog: resolves bare `(productId, quantity)`
//! pairs into named, priced, availability-checked lines.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::shared::{Money, ProductId, Quantity};

/// Enrichment error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrichmentError {
    /// The catalog has no such product.
    #[error("Product not found: {product_id}")]
    ProductNotFound {
        /// Product ID.
        product_id: String,
    },

    /// Not enough stock for the requested quantity.
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        /// Product ID.
        product_id: String,
        /// Units in stock.
        available: u32,
        /// Units requested.
        requested: u32,
    },

    /// The catalog could not be reached.
    #[error("Product catalog unavailable: {message}")]
    Unavailable {
        /// Error message.
        message: String,
    },
}

/// One requested line before enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    /// Product to order.
    pub product_id: ProductId,
    /// Units requested.
    pub quantity: Quantity,
}

/// One line after enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedItem {
    /// Product ID.
    pub product_id: ProductId,
    /// Display name at enrichment time.
    pub product_name: String,
    /// Units requested.
    pub quantity: Quantity,
    /// Catalog price per unit.
    pub unit_price: Money,
    /// `unit_price * quantity`.
    pub total_price: Money,
    /// Whether the requested quantity can be fulfilled.
    pub available: bool,
    /// Units currently in stock.
    pub in_stock: Quantity,
}

/// Port for enriching order lines from the product catalog.
#[async_trait]
pub trait ProductEnrichmentPort: Send + Sync {
    /// Enrich every requested line, in request order.
    ///
    /// Lines whose stock is short may be returned with `available == false`
    /// or rejected outright with `InsufficientStock`.
    async fn enrich(&self, items: &[ItemRequest]) -> Result<Vec<EnrichedItem>, EnrichmentError>;
}
