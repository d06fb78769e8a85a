//! Errors for translation.

use chrono::NaiveDate;
use thiserror::Error;

/// A type for translation errors.
///
/// These are raised before any descriptor is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Missing required parameter '{0}'.")]
    MissingRequiredParameter(&'static str),
    #[error("Malformed value for '{parameter}': {reason}.")]
    MalformedInput {
        parameter: &'static str,
        reason: String,
    },
    #[error("Stay period must end after it starts, got {date_in} to {date_out}.")]
    InvalidStayPeriod {
        date_in: NaiveDate,
        date_out: NaiveDate,
    },
    #[error("At least one room is required.")]
    EmptyRoomList,
}

impl Error {
    pub(crate) fn malformed(parameter: &'static str, reason: impl Into<String>) -> Error {
        Error::MalformedInput {
            parameter,
            reason: reason.into(),
        }
    }
}
