//! The conversion engine: Gas-Tag boundaries and civil-day arithmetic.
//!
//! [`GasTagConverter`] is bound to one civil time zone at construction and
//! renders every timestamp through that zone to find calendar boundaries.
//! Inputs and outputs are absolute instants (`DateTime<Utc>`); the zone only
//! decides where local midnight and 06:00 fall.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::config::{ConversionConfiguration, EndDateTimeKind};
use crate::error::{PreconditionError, Result, UnknownTimeZone};

/// Start of the Gas-Tag in local wall time.
const GAS_DAY_START: NaiveTime = match NaiveTime::from_hms_opt(6, 0, 0) {
    Some(time) => time,
    None => unreachable!(),
};

/// Converts timestamps between Gas-Tag, Stromtag and end-date conventions.
///
/// The converter is a small `Copy` value holding only the zone binding; it
/// is `Send + Sync` and free to share across threads. All operations are
/// pure functions of the timestamp and the bound zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasTagConverter {
    zone: Tz,
}

impl GasTagConverter {
    /// Create a converter bound to an IANA time zone.
    ///
    /// German market data uses `"Europe/Berlin"`; any IANA name works, which
    /// keeps the calendar logic testable against other zones.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownTimeZone`] if `zone_name` is not in the IANA
    /// database.
    ///
    /// # Examples
    ///
    /// ```
    /// use marktzeit::GasTagConverter;
    ///
    /// let converter = GasTagConverter::new("Europe/Berlin").unwrap();
    /// assert!(GasTagConverter::new("Europe/Bielefeld").is_err());
    /// ```
    pub fn new(zone_name: &str) -> Result<Self, UnknownTimeZone> {
        let zone = zone_name
            .parse::<Tz>()
            .map_err(|_| UnknownTimeZone(zone_name.to_owned()))?;
        Ok(Self { zone })
    }

    /// Create a converter from an already-resolved zone, e.g.
    /// `chrono_tz::Europe::Berlin`.
    pub const fn from_tz(zone: Tz) -> Self {
        Self { zone }
    }

    /// The civil zone this converter renders timestamps in.
    pub const fn zone(&self) -> Tz {
        self.zone
    }

    // ── Boundary detection ──────────────────────────────────────────────────

    /// True iff `timestamp` is exactly midnight (00:00:00) in the bound
    /// zone, the start of a Stromtag.
    ///
    /// Sub-second components are ignored; the wire formats this crate exists
    /// for carry at most second precision.
    pub fn is_local_midnight(&self, timestamp: DateTime<Utc>) -> bool {
        self.matches_local_time(timestamp, NaiveTime::MIN)
    }

    /// True iff `timestamp` is exactly 06:00:00 in the bound zone, the start
    /// of a Gas-Tag.
    ///
    /// Sub-second components are ignored.
    pub fn is_local_six_am(&self, timestamp: DateTime<Utc>) -> bool {
        self.matches_local_time(timestamp, GAS_DAY_START)
    }

    /// Hour/minute/second comparison of `timestamp` rendered in the bound
    /// zone.
    fn matches_local_time(&self, timestamp: DateTime<Utc>, time: NaiveTime) -> bool {
        let local = timestamp.with_timezone(&self.zone);
        local.hour() == time.hour()
            && local.minute() == time.minute()
            && local.second() == time.second()
    }

    // ── Gas-Tag boundary moves ──────────────────────────────────────────────

    /// Move a Gas-Tag start (06:00 local) to midnight of the same calendar
    /// day.
    ///
    /// This is the step that makes a Gas-Tag-aware timestamp comparable to
    /// midnight-based systems: `2022-12-31T05:00:00Z` (06:00 German time)
    /// becomes `2022-12-30T23:00:00Z` (00:00 German time, same calendar
    /// day). Sub-seconds of a qualifying input are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::NotLocalSixAm`] if `timestamp` is not on
    /// a Gas-Tag boundary. [`convert`](Self::convert) checks the boundary
    /// itself and never triggers this.
    pub fn six_am_to_midnight(
        &self,
        timestamp: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, PreconditionError> {
        if !self.is_local_six_am(timestamp) {
            return Err(PreconditionError::NotLocalSixAm {
                timestamp,
                zone: self.zone,
            });
        }
        Ok(self.strip_time(timestamp))
    }

    /// Move a local midnight to 06:00 of the same calendar day, the start of
    /// that day's Gas-Tag.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::NotLocalMidnight`] if `timestamp` is not
    /// on a local midnight.
    pub fn midnight_to_six_am(
        &self,
        timestamp: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, PreconditionError> {
        if !self.is_local_midnight(timestamp) {
            return Err(PreconditionError::NotLocalMidnight {
                timestamp,
                zone: self.zone,
            });
        }
        let date = timestamp.with_timezone(&self.zone).date_naive();
        Ok(self.instant_at(date.and_time(GAS_DAY_START)))
    }

    // ── Civil-day arithmetic ────────────────────────────────────────────────

    /// Zero out the local time of day: the instant of local midnight on the
    /// calendar day `timestamp` falls on in the bound zone.
    ///
    /// Hours, minutes, seconds and sub-second precision are all discarded.
    /// Total: every instant has a well-defined calendar day.
    pub fn strip_time(&self, timestamp: DateTime<Utc>) -> DateTime<Utc> {
        let date = timestamp.with_timezone(&self.zone).date_naive();
        self.instant_at(date.and_time(NaiveTime::MIN))
    }

    /// Shift `timestamp` by whole calendar days, keeping the local wall
    /// time.
    ///
    /// Calendar arithmetic, not fixed-duration arithmetic: a shift across a
    /// DST transition moves by 23 or 25 real hours so that the wall time
    /// stays put. `2023-03-25T23:00:00Z` (midnight CET) shifted by one day
    /// is `2023-03-26T22:00:00Z` (midnight CEST), 23 hours later.
    ///
    /// # Panics
    ///
    /// Panics when the shifted date leaves chrono's representable range
    /// (about ±262,000 years), as chrono's own date arithmetic does.
    pub fn shift_civil_days(&self, timestamp: DateTime<Utc>, days: i64) -> DateTime<Utc> {
        let local = timestamp.with_timezone(&self.zone);
        let date = local.date_naive() + Duration::days(days);
        self.instant_at(date.and_time(local.time()))
    }

    /// Resolve a wall time in the bound zone to an absolute instant.
    ///
    /// Wall times that occur twice (DST fall-back) resolve to the earlier
    /// instant. Wall times skipped by a DST jump resolve through the
    /// pre-jump offset, the way a wall clock reads right after the jump:
    /// Berlin's skipped 02:30 becomes 03:30 CEST. The boundaries this crate
    /// produces (00:00 and 06:00) never fall in a gap in European zones, so
    /// the gap branch matters only for arbitrary wall times in
    /// [`shift_civil_days`](Self::shift_civil_days) and for zones that
    /// switch at midnight.
    fn instant_at(&self, wall: NaiveDateTime) -> DateTime<Utc> {
        match self.zone.from_local_datetime(&wall) {
            LocalResult::Single(instant) => instant.with_timezone(&Utc),
            LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
            LocalResult::None => {
                // Walk back to the last wall time that still exists, then
                // carry its offset across the gap. Transitions skip 30 or 60
                // minutes; a handful of historical ones skipped up to a day.
                let mut candidate = wall;
                for _ in 0..96 {
                    candidate -= Duration::minutes(30);
                    if let LocalResult::Single(before) | LocalResult::Ambiguous(before, _) =
                        self.zone.from_local_datetime(&candidate)
                    {
                        return before.with_timezone(&Utc) + (wall - candidate);
                    }
                }
                // Unreachable with real tzdata; read the wall time as UTC.
                Utc.from_utc_datetime(&wall)
            }
        }
    }

    // ── Conversion ──────────────────────────────────────────────────────────

    /// Convert `timestamp` from the source convention of `request` to its
    /// target convention.
    ///
    /// Steps, in order:
    ///
    /// 1. Validate `request`: source and target each well-formed, same
    ///    Sparte on both sides.
    /// 2. Strip the time of day if the source strips.
    /// 3. If source and target are identical, skip steps 4 and 5; aligned
    ///    conventions need no calendar shift.
    /// 4. Align the Gas-Tag boundary: a Gas-Tag-aware timestamp sitting on
    ///    06:00 local moves to midnight when the target is not aware, and
    ///    vice versa. A timestamp that is not on the boundary passes this
    ///    step unchanged; only the direct calls to
    ///    [`six_am_to_midnight`](Self::six_am_to_midnight) and
    ///    [`midnight_to_six_am`](Self::midnight_to_six_am) reject such
    ///    input.
    /// 5. Shift one civil day forward (inclusive → exclusive) or backward
    ///    (exclusive → inclusive) when both sides are end dates of different
    ///    kinds.
    /// 6. Strip the time of day if the target strips. This runs last: a
    ///    target that is Gas-Tag-aware *and* strips loses the 06:00
    ///    alignment of step 4 again.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::Validation`](crate::ConversionError::Validation)
    /// if `request` violates the descriptor invariants. No other error is
    /// produced.
    ///
    /// # Panics
    ///
    /// Inherits the representable-range bound of
    /// [`shift_civil_days`](Self::shift_civil_days): a timestamp within one
    /// day of chrono's range edge panics in step 5. No civil timestamp in
    /// market data comes anywhere near the bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use marktzeit::{
    ///     ConversionConfiguration, DateTimeConfiguration, EndDateTimeKind, GasTagConverter,
    /// };
    ///
    /// let converter = GasTagConverter::new("Europe/Berlin")?;
    ///
    /// // An inclusive contract end date, exclusive in the receiving system.
    /// let request = ConversionConfiguration {
    ///     source: DateTimeConfiguration {
    ///         is_end_date: true,
    ///         end_date_time_kind: Some(EndDateTimeKind::Inclusive),
    ///         ..Default::default()
    ///     },
    ///     target: DateTimeConfiguration {
    ///         is_end_date: true,
    ///         end_date_time_kind: Some(EndDateTimeKind::Exclusive),
    ///         ..Default::default()
    ///     },
    /// };
    ///
    /// let inclusive = Utc.with_ymd_and_hms(2023, 5, 30, 22, 0, 0).unwrap();
    /// let exclusive = converter.convert(inclusive, &request)?;
    /// assert_eq!(exclusive, Utc.with_ymd_and_hms(2023, 5, 31, 22, 0, 0).unwrap());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn convert(
        &self,
        timestamp: DateTime<Utc>,
        request: &ConversionConfiguration,
    ) -> Result<DateTime<Utc>> {
        request.validate()?;

        let mut result = timestamp;
        if request.source.strip_time {
            result = self.strip_time(result);
        }

        if request.source != request.target {
            if request.source.is_gas {
                // Validation guarantees the target is gas as well.
                if request.source.is_gas_tag_aware == Some(true)
                    && request.target.is_gas_tag_aware == Some(false)
                    && self.is_local_six_am(result)
                {
                    result = self.six_am_to_midnight(result)?;
                }
                if request.source.is_gas_tag_aware == Some(false)
                    && request.target.is_gas_tag_aware == Some(true)
                    && self.is_local_midnight(result)
                {
                    result = self.midnight_to_six_am(result)?;
                }
            }

            if let (Some(source_kind), Some(target_kind)) = (
                request.source.end_date_time_kind,
                request.target.end_date_time_kind,
            ) {
                if source_kind != target_kind {
                    result = match source_kind {
                        EndDateTimeKind::Inclusive => self.shift_civil_days(result, 1),
                        EndDateTimeKind::Exclusive => self.shift_civil_days(result, -1),
                    };
                }
            }
        }

        if request.target.strip_time {
            result = self.strip_time(result);
        }

        Ok(result)
    }
}
