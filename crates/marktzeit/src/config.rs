//! Convention descriptors: how a timestamp is meant to be read.
//!
//! German market communication mixes several independent conventions for the
//! same instant. A [`DateTimeConfiguration`] names the conventions one system
//! applies; a [`ConversionConfiguration`] pairs the current interpretation
//! (`source`) with the desired one (`target`) and is the only input the
//! conversion engine needs besides the timestamp itself.
//!
//! The serialized form matches the JSON other MaKo tooling exchanges:
//! camelCase field names, `"INCLUSIVE"`/`"EXCLUSIVE"` kind tokens, optional
//! fields omitted when absent.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Side, ValidationError};

// ── End date kind ───────────────────────────────────────────────────────────

/// How an end date marks the end of its period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndDateTimeKind {
    /// The last day that still belongs to the period; end of October 2022 is
    /// `2022-10-31`. The convention of most market messages.
    #[serde(rename = "INCLUSIVE")]
    Inclusive,
    /// The first day after the period; end of October 2022 is `2022-11-01`.
    /// The convention of most technical systems.
    #[serde(rename = "EXCLUSIVE")]
    Exclusive,
}

impl EndDateTimeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inclusive => "INCLUSIVE",
            Self::Exclusive => "EXCLUSIVE",
        }
    }
}

impl Display for EndDateTimeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndDateTimeKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "INCLUSIVE" => Ok(Self::Inclusive),
            "EXCLUSIVE" => Ok(Self::Exclusive),
            other => Err(ValidationError::UnknownEndDateTimeKind {
                value: other.to_owned(),
            }),
        }
    }
}

// ── Descriptors ─────────────────────────────────────────────────────────────

/// Describes how one side of a conversion reads a timestamp.
///
/// A descriptor is a plain value object; build it with a struct literal and
/// fill the rest from [`Default`]:
///
/// ```
/// use marktzeit::DateTimeConfiguration;
///
/// let gas_tag_aware = DateTimeConfiguration {
///     is_gas: true,
///     is_gas_tag_aware: Some(true),
///     ..Default::default()
/// };
/// assert!(!gas_tag_aware.is_end_date);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeConfiguration {
    /// True if the timestamp denotes the end of a period, e.g. a contract
    /// end date.
    #[serde(default)]
    pub is_end_date: bool,
    /// How the end date is meant. Set exactly when `is_end_date` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date_time_kind: Option<EndDateTimeKind>,
    /// True if the commodity is gas rather than electricity.
    #[serde(default)]
    pub is_gas: bool,
    /// Whether the timestamp already respects the Gas-Tag, the gas day
    /// starting at 06:00 local time. Set exactly when `is_gas` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_gas_tag_aware: Option<bool>,
    /// Discard the local time of day, before conversion on the source side
    /// and after conversion on the target side.
    #[serde(default)]
    pub strip_time: bool,
}

impl DateTimeConfiguration {
    /// Structural validity of this descriptor alone, with `side` naming it
    /// in any error.
    fn validate(self, side: Side) -> Result<(), ValidationError> {
        match (self.is_end_date, self.end_date_time_kind) {
            (true, None) => return Err(ValidationError::MissingEndDateTimeKind { side }),
            (false, Some(_)) => return Err(ValidationError::UnexpectedEndDateTimeKind { side }),
            _ => {}
        }
        match (self.is_gas, self.is_gas_tag_aware) {
            (true, None) => return Err(ValidationError::MissingGasTagAwareness { side }),
            (false, Some(_)) => return Err(ValidationError::UnexpectedGasTagAwareness { side }),
            _ => {}
        }
        Ok(())
    }
}

/// A conversion request: how the timestamp is currently meant (`source`) and
/// how the receiving system expects it (`target`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionConfiguration {
    pub source: DateTimeConfiguration,
    pub target: DateTimeConfiguration,
}

impl ConversionConfiguration {
    /// The reverse request, with source and target swapped.
    ///
    /// Converting with the inverted request undoes a conversion, as long as
    /// neither side strips the time of day (stripping is lossy).
    #[must_use]
    pub const fn invert(self) -> Self {
        Self {
            source: self.target,
            target: self.source,
        }
    }

    /// Check the structural invariants of the request.
    ///
    /// [`convert`](crate::GasTagConverter::convert) runs this itself; call
    /// it directly to vet a request before any timestamp is at hand.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending side when an
    /// end-date kind or Gas-Tag awareness flag is missing or stray, or when
    /// source and target disagree on the Sparte.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.source.validate(Side::Source)?;
        self.target.validate(Side::Target)?;
        if self.source.is_gas != self.target.is_gas {
            return Err(ValidationError::SparteMismatch {
                source_is_gas: self.source.is_gas,
                target_is_gas: self.target.is_gas,
            });
        }
        Ok(())
    }
}
