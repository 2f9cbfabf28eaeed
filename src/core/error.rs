use thiserror::Error;

/// Errors raised by the matching core when upstream data breaks its contract
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("invalid coordinate {value:?}: {reason}")]
    InvalidCoordinate { value: String, reason: &'static str },

    #[error("invalid date {value:?}: expected dd/mm/yyyy")]
    InvalidDate { value: String },
}

impl MatchError {
    pub(crate) fn coordinate(value: impl Into<String>, reason: &'static str) -> Self {
        MatchError::InvalidCoordinate {
            value: value.into(),
            reason,
        }
    }

    pub(crate) fn date(value: impl Into<String>) -> Self {
        MatchError::InvalidDate { value: value.into() }
    }
}
