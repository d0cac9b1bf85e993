//! # marktzeit
//!
//! Timestamp convention conversion for German energy market communication
//! (MaKo).
//!
//! Market messages mix several conventions for the same instant: gas
//! delivery days start at 06:00 local time (the Gas-Tag) while electricity
//! days start at midnight, end dates mean either the last included day or
//! the first excluded one, and date-only fields travel as timestamps whose
//! time of day must be discarded. [`GasTagConverter`] moves a timestamp
//! between any two of these interpretations, DST-safely, through one bound
//! civil zone. For German data that zone is `"Europe/Berlin"`.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use marktzeit::{ConversionConfiguration, DateTimeConfiguration, GasTagConverter};
//!
//! let converter = GasTagConverter::new("Europe/Berlin")?;
//!
//! // A Gas-Tag-aware timestamp, rewritten for a midnight-based system.
//! let request = ConversionConfiguration {
//!     source: DateTimeConfiguration {
//!         is_gas: true,
//!         is_gas_tag_aware: Some(true),
//!         ..Default::default()
//!     },
//!     target: DateTimeConfiguration {
//!         is_gas: true,
//!         is_gas_tag_aware: Some(false),
//!         ..Default::default()
//!     },
//! };
//!
//! let gas_tag_start = Utc.with_ymd_and_hms(2022, 12, 31, 5, 0, 0).unwrap();
//! let converted = converter.convert(gas_tag_start, &request)?;
//! assert_eq!(converted, Utc.with_ymd_and_hms(2022, 12, 30, 23, 0, 0).unwrap());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Convention descriptors and conversion requests
//! - [`converter`] — The zone-bound conversion engine
//! - [`error`] — Error types

pub mod config;
pub mod converter;
pub mod error;

pub use config::{ConversionConfiguration, DateTimeConfiguration, EndDateTimeKind};
pub use converter::GasTagConverter;
pub use error::{
    ConversionError, PreconditionError, Result, Side, UnknownTimeZone, ValidationError,
};
