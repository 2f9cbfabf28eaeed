use serde::{Deserialize, Serialize};

/// Recursive boolean filter over event text and dates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterSpec {
    /// Substring of the event's neighborhood, name or address, after normalization
    Text(String),
    /// Every sub-filter matches
    All(Vec<FilterSpec>),
    /// At least one sub-filter matches
    Any(Vec<FilterSpec>),
    /// The day (`dd/mm/yyyy`) falls inside the event's interval
    DateExact(String),
    /// The event overlaps `[date - before_days, date + after_days]`
    DateWindow {
        date: String,
        before_days: i64,
        after_days: i64,
    },
    /// At least one date filter matches
    DateAny(Vec<FilterSpec>),
    /// A clause whose shape could not be understood; never matches
    Unrecognized(String),
}

impl FilterSpec {
    /// Conjunction of the optional key and date filters
    pub fn combine(key: Option<FilterSpec>, date: Option<FilterSpec>) -> Option<FilterSpec> {
        match (key, date) {
            (Some(k), Some(d)) => Some(FilterSpec::All(vec![k, d])),
            (k, d) => k.or(d),
        }
    }
}
