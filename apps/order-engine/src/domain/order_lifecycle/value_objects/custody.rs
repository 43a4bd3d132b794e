//! Custody snapshots attached to an order.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{Currency, CustodianId, CustodyServiceId, Money};

/// Snapshot of the custody (vaulting) service assigned to an order.
///
/// Denormalized at assignment time; it is not a live reference to the
/// custody catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyServiceRef {
    /// Custody service id.
    pub id: CustodyServiceId,
    /// Display name.
    pub name: String,
    /// Storage fee charged by the service.
    pub fee: Money,
    /// Currency of the fee.
    pub currency: Currency,
}

/// Snapshot of the custodian operating the assigned custody service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodianRef {
    /// Custodian id.
    pub id: CustodianId,
    /// Display name.
    pub name: String,
}
