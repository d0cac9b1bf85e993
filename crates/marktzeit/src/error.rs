//! Error types for marktzeit operations.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Which half of a conversion request an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// A conversion request violates the descriptor invariants.
///
/// Raised before any calendar arithmetic; a request that fails validation
/// has had no effect on the timestamp.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{side} descriptor is an end date but has no end_date_time_kind")]
    MissingEndDateTimeKind { side: Side },
    #[error("{side} descriptor has an end_date_time_kind but is not an end date")]
    UnexpectedEndDateTimeKind { side: Side },

    #[error("{side} descriptor is gas but has no is_gas_tag_aware flag")]
    MissingGasTagAwareness { side: Side },
    #[error("{side} descriptor has an is_gas_tag_aware flag but is not gas")]
    UnexpectedGasTagAwareness { side: Side },

    #[error(
        "source and target must belong to the same Sparte: \
         source is_gas={source_is_gas}, target is_gas={target_is_gas}"
    )]
    SparteMismatch {
        source_is_gas: bool,
        target_is_gas: bool,
    },

    #[error("unknown end date kind '{value}', expected INCLUSIVE or EXCLUSIVE")]
    UnknownEndDateTimeKind { value: String },
}

/// A boundary operation was called on a timestamp that is not on the
/// required boundary.
///
/// Only the direct calls to
/// [`six_am_to_midnight`](crate::GasTagConverter::six_am_to_midnight) and
/// [`midnight_to_six_am`](crate::GasTagConverter::midnight_to_six_am) raise
/// this; [`convert`](crate::GasTagConverter::convert) checks the boundary
/// itself and skips the move instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("{timestamp} is not 06:00 local time in {zone}")]
    NotLocalSixAm {
        timestamp: DateTime<Utc>,
        zone: Tz,
    },
    #[error("{timestamp} is not midnight local time in {zone}")]
    NotLocalMidnight {
        timestamp: DateTime<Utc>,
        zone: Tz,
    },
}

/// Top-level error type for [`convert`](crate::GasTagConverter::convert).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
}

/// The zone name handed to [`GasTagConverter::new`](crate::GasTagConverter::new)
/// does not resolve to an IANA time zone.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown time zone '{0}'")]
pub struct UnknownTimeZone(pub String);

pub type Result<T, E = ConversionError> = std::result::Result<T, E>;
