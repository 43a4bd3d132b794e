//! Static product catalog backed by configuration.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{EnrichedItem, EnrichmentError, ItemRequest, ProductEnrichmentPort};
use crate::domain::shared::{Money, ProductId, Quantity};

/// A product the catalog can sell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Price per unit.
    pub unit_price: Money,
    /// Units in stock.
    pub stock: u32,
}

/// In-process catalog for development and tests.
///
/// Enrichment only reads stock; it never reserves it. Availability is judged
/// on the total requested per product across all lines.
#[derive(Debug, Default)]
pub struct StaticProductCatalog {
    products: RwLock<HashMap<ProductId, CatalogProduct>>,
}

impl StaticProductCatalog {
    /// Create a catalog from a product list.
    #[must_use]
    pub fn new(products: impl IntoIterator<Item = CatalogProduct>) -> Self {
        Self {
            products: RwLock::new(products.into_iter().map(|p| (p.id.clone(), p)).collect()),
        }
    }

    /// Add or replace a product.
    pub fn upsert(&self, product: CatalogProduct) {
        let mut products = self.products.write().unwrap();
        products.insert(product.id.clone(), product);
    }

    /// Set the stock level for a product.
    pub fn set_stock(&self, product_id: &ProductId, stock: u32) {
        let mut products = self.products.write().unwrap();
        if let Some(product) = products.get_mut(product_id) {
            product.stock = stock;
        }
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.read().unwrap().len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.read().unwrap().is_empty()
    }
}

#[async_trait]
impl ProductEnrichmentPort for StaticProductCatalog {
    async fn enrich(&self, items: &[ItemRequest]) -> Result<Vec<EnrichedItem>, EnrichmentError> {
        let products = self.products.read().unwrap();

        let mut demand: HashMap<&ProductId, u64> = HashMap::new();
        for item in items {
            *demand.entry(&item.product_id).or_default() += u64::from(item.quantity.units());
        }

        items
            .iter()
            .map(|item| {
                let product = products.get(&item.product_id).ok_or_else(|| {
                    EnrichmentError::ProductNotFound {
                        product_id: item.product_id.to_string(),
                    }
                })?;
                Ok(EnrichedItem {
                    product_id: product.id.clone(),
                    product_name: product.name.clone(),
                    quantity: item.quantity,
                    unit_price: product.unit_price,
                    total_price: product.unit_price.times(item.quantity.units()),
                    available: demand
                        .get(&item.product_id)
                        .is_none_or(|&requested| requested <= u64::from(product.stock)),
                    in_stock: Quantity::new(product.stock),
                })
            })
            .collect()
    }
}
