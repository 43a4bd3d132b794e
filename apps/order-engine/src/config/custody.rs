//! Custody service configuration.

use serde::{Deserialize, Serialize};

use crate::domain::shared::Money;

/// Custody services orders may be assigned to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustodyConfig {
    /// Registered services.
    #[serde(default)]
    pub services: Vec<CustodyServiceEntry>,
}

/// One custody service and the custodian operating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustodyServiceEntry {
    /// Custody service ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Storage fee.
    #[serde(default)]
    pub fee: Money,
    /// Fee currency; defaults to `orders.default_currency`.
    #[serde(default)]
    pub currency: Option<String>,
    /// Custodian ID.
    pub custodian_id: String,
    /// Custodian display name.
    pub custodian_name: String,
}
