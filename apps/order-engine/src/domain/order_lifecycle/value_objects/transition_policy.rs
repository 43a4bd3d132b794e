//! Status transition policy.

use serde::{Deserialize, Serialize};

/// Which status transitions the state machine accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Follow the lifecycle graph; `completed` and `cancelled` are terminal.
    #[default]
    Strict,
    /// Any recognized target status except the current one.
    Permissive,
}
