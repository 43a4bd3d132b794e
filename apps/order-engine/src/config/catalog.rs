//! Product catalog configuration.

use serde::{Deserialize, Serialize};

use crate::domain::shared::Money;

/// Products served by the static enrichment adapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog entries.
    #[serde(default)]
    pub products: Vec<ProductEntry>,
}

/// One catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductEntry {
    /// Product ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price per unit.
    pub unit_price: Money,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
}
