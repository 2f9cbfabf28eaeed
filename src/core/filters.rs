use chrono::{Duration, NaiveDate};
use crate::core::error::MatchError;
use crate::core::normalize::normalize;
use crate::models::{Event, FilterSpec};

/// Date format used by the agenda feed and by date filters
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a `dd/mm/yyyy` date
pub fn parse_date(value: &str) -> Result<NaiveDate, MatchError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| MatchError::date(value))
}

/// A filter ready to be evaluated against events
///
/// Filter text is normalized and filter dates are parsed once, when compiling.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledFilter {
    Text(String),
    All(Vec<CompiledFilter>),
    Any(Vec<CompiledFilter>),
    DateExact(NaiveDate),
    DateWindow { start: NaiveDate, end: NaiveDate },
    Never,
}

/// Compile a filter specification
///
/// Fails with `InvalidDate` when a date in the specification is malformed.
/// Unrecognized clauses compile to a filter that never matches.
pub fn compile(spec: &FilterSpec) -> Result<CompiledFilter, MatchError> {
    let compiled = match spec {
        FilterSpec::Text(text) => CompiledFilter::Text(normalize(text)),
        FilterSpec::All(specs) => CompiledFilter::All(compile_all(specs)?),
        FilterSpec::Any(specs) | FilterSpec::DateAny(specs) => {
            CompiledFilter::Any(compile_all(specs)?)
        }
        FilterSpec::DateExact(date) => CompiledFilter::DateExact(parse_date(date)?),
        FilterSpec::DateWindow {
            date,
            before_days,
            after_days,
        } => {
            let day = parse_date(date)?;
            let start = shift_days(day, before_days.checked_neg(), date)?;
            let end = shift_days(day, Some(*after_days), date)?;
            CompiledFilter::DateWindow { start, end }
        }
        FilterSpec::Unrecognized(clause) => {
            tracing::warn!("Ignoring unrecognized filter clause {}; it matches no event", clause);
            CompiledFilter::Never
        }
    };
    Ok(compiled)
}

fn compile_all(specs: &[FilterSpec]) -> Result<Vec<CompiledFilter>, MatchError> {
    specs.iter().map(compile).collect()
}

fn shift_days(day: NaiveDate, days: Option<i64>, raw: &str) -> Result<NaiveDate, MatchError> {
    days.and_then(Duration::try_days)
        .and_then(|delta| day.checked_add_signed(delta))
        .ok_or_else(|| MatchError::date(raw))
}

impl CompiledFilter {
    /// Evaluate against one event
    ///
    /// Date clauses fail with `InvalidDate` when the event's own dates are
    /// malformed.
    pub fn matches(&self, event: &Event) -> Result<bool, MatchError> {
        match self {
            CompiledFilter::Text(needle) => Ok(matches_text(needle, event)),
            CompiledFilter::All(filters) => {
                for filter in filters {
                    if !filter.matches(event)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            CompiledFilter::Any(filters) => {
                for filter in filters {
                    if filter.matches(event)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            CompiledFilter::DateExact(day) => {
                let (begin, end) = event_interval(event)?;
                Ok(begin <= *day && *day <= end)
            }
            CompiledFilter::DateWindow { start, end: window_end } => {
                let (begin, end) = event_interval(event)?;
                Ok(!(begin > *window_end || end < *start))
            }
            CompiledFilter::Never => Ok(false),
        }
    }
}

#[inline]
fn matches_text(needle: &str, event: &Event) -> bool {
    [&event.neighborhood, &event.name, &event.address]
        .into_iter()
        .any(|field| normalize(field).contains(needle))
}

fn event_interval(event: &Event) -> Result<(NaiveDate, NaiveDate), MatchError> {
    Ok((parse_date(&event.begin_date)?, parse_date(&event.end_date)?))
}
