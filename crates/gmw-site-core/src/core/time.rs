// crates/gmw-site-core/src/core/time.rs
// ============================================================================
// Module: GMW Site Time Model
// Description: Millisecond timestamps for persisted site records.
// Purpose: Provide one timestamp type shared by storage and the RPC wire form.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Every record carries server-assigned timestamps. Internally they are unix
//! epoch milliseconds, which is also the storage form; on the wire they render
//! as RFC 3339 strings in UTC.
//!
//! Store operations never read the clock themselves. Handlers stamp the
//! current time once per call and pass it down, so a single call produces a
//! single instant across every field it writes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Nanoseconds per millisecond.
const NANOS_PER_MILLI: i128 = 1_000_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while converting timestamps to or from RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// The value is outside the range representable as RFC 3339.
    #[error("timestamp out of range: {0}")]
    OutOfRange(i64),
    /// The input string is not valid RFC 3339.
    #[error("invalid rfc3339 timestamp: {0}")]
    Parse(String),
}

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// Server-assigned instant with millisecond precision.
///
/// # Invariants
/// - Stored as unix epoch milliseconds (UTC).
/// - Serializes as an RFC 3339 string; deserializes from the same form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Returns the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        Self(i64::try_from(now.as_millis()).unwrap_or(i64::MAX))
    }

    /// Creates a timestamp from unix epoch milliseconds.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as unix epoch milliseconds.
    #[must_use]
    pub const fn as_unix_millis(self) -> i64 {
        self.0
    }

    /// Renders the timestamp as an RFC 3339 string in UTC.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::OutOfRange`] when the instant falls outside
    /// the years RFC 3339 can express.
    pub fn to_rfc3339(self) -> Result<String, TimestampError> {
        let nanos = i128::from(self.0) * NANOS_PER_MILLI;
        let datetime = OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .map_err(|_| TimestampError::OutOfRange(self.0))?;
        datetime.format(&Rfc3339).map_err(|_| TimestampError::OutOfRange(self.0))
    }

    /// Parses an RFC 3339 string, truncating to millisecond precision.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::Parse`] when the input is not RFC 3339 or
    /// does not fit in unix milliseconds.
    pub fn parse_rfc3339(value: &str) -> Result<Self, TimestampError> {
        let datetime = OffsetDateTime::parse(value, &Rfc3339)
            .map_err(|err| TimestampError::Parse(err.to_string()))?;
        let millis = datetime.unix_timestamp_nanos().div_euclid(NANOS_PER_MILLI);
        i64::try_from(millis)
            .map(Self)
            .map_err(|_| TimestampError::Parse(format!("{value} exceeds millisecond range")))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Ok(rendered) => f.write_str(&rendered),
            Err(_) => write!(f, "{}ms", self.0),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rendered = self.to_rfc3339().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&rendered)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_rfc3339(&raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
