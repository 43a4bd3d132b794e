//! Order lifecycle configuration.

use serde::{Deserialize, Serialize};

use crate::application::services::OrderLifecycleSettings;
use crate::domain::order_lifecycle::value_objects::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, TransitionPolicy,
};
use crate::domain::shared::Currency;

/// Order lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersConfig {
    /// Currency applied when a request does not name one.
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// Page size used when the caller does not ask for one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Upper bound on page size.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
    /// Which status transitions are accepted.
    #[serde(default)]
    pub transition_policy: TransitionPolicy,
}

impl OrdersConfig {
    /// Convert into service settings.
    #[must_use]
    pub fn to_settings(&self) -> OrderLifecycleSettings {
        OrderLifecycleSettings {
            default_currency: Currency::new(self.default_currency.as_str()),
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
            transition_policy: self.transition_policy,
        }
    }
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            transition_policy: TransitionPolicy::default(),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

const fn default_max_page_size() -> u32 {
    MAX_PAGE_SIZE
}
