//! Order bookkeeping instants.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// When an order or item was created or last changed, always in UTC.
///
/// Serialized as RFC 3339. Stored rows order by this value, so listing
/// newest-first is a plain descending sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current instant.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parse a stored RFC 3339 value; any offset is normalized to UTC.
    ///
    /// # Errors
    ///
    /// Returns error if `text` is not RFC 3339.
    pub fn parse(text: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(text.trim()).map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// This instant, or `floor` if the clock stepped backwards past it.
    ///
    /// Keeps `updated_at` from ever preceding the value it replaces.
    #[must_use]
    pub fn not_before(self, floor: Self) -> Self {
        self.max(floor)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}
