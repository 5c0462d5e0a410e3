//! Timestamp range filter for listing.

use serde::Deserialize;

/// Inclusive bounds on a record's `timestamp`, compared lexically.
///
/// Either bound may be omitted. Deserializes straight from the
/// `?start=..&end=..` query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TimestampRange {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl TimestampRange {
    /// No bounds: every record matches
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    pub fn contains(&self, timestamp: &str) -> bool {
        let after_start = self
            .start
            .as_deref()
            .map_or(true, |start| timestamp >= start);
        let before_end = self.end.as_deref().map_or(true, |end| timestamp <= end);
        after_start && before_end
    }
}
