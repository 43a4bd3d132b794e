//! Product Catalog Adapters
//!
//! Implementations of `ProductEnrichmentPort`.

mod static_catalog;

pub use static_catalog::{CatalogProduct, StaticProductCatalog};
