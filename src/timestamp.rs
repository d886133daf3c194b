use std::cmp;
use std::fmt;
use std::time;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    reader::WireReader,
    wire::{self, Tag, WireType},
    writer::WireWriter,
};

const MAX_NANOS: i32 = 999_999_999;
/// 0001-01-01T00:00:00Z
const MIN_SECONDS: i64 = -62_135_596_800;
/// 9999-12-31T23:59:59Z
const MAX_SECONDS: i64 = 253_402_300_799;

/// A point in time, UTC, with nanosecond resolution. Only times from the start of year 1 through
/// the end of year 9999 can be represented, which is what the backend supports.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimestamp", into = "RawTimestamp")]
pub struct Timestamp {
    seconds: i64,
    nanos: i32,
}

#[derive(Serialize, Deserialize)]
struct RawTimestamp {
    seconds: i64,
    #[serde(default)]
    nanos: i32,
}

impl TryFrom<RawTimestamp> for Timestamp {
    type Error = String;
    fn try_from(raw: RawTimestamp) -> Result<Self, String> {
        Timestamp::new(raw.seconds, raw.nanos).ok_or_else(|| {
            format!(
                "timestamp {}s + {}ns is outside the supported range",
                raw.seconds, raw.nanos
            )
        })
    }
}

impl From<Timestamp> for RawTimestamp {
    fn from(ts: Timestamp) -> Self {
        RawTimestamp {
            seconds: ts.seconds,
            nanos: ts.nanos,
        }
    }
}

impl Timestamp {
    /// Create a timestamp from seconds since the Unix epoch and a nanosecond offset. Returns `None`
    /// if either is out of range.
    pub fn new(seconds: i64, nanos: i32) -> Option<Timestamp> {
        Self::check(seconds, nanos).ok()
    }

    pub fn from_sec(seconds: i64) -> Option<Timestamp> {
        Self::new(seconds, 0)
    }

    fn check(seconds: i64, nanos: i32) -> Result<Timestamp, &'static str> {
        if seconds < MIN_SECONDS {
            Err("timestamp beyond the earliest supported date")
        } else if seconds > MAX_SECONDS {
            Err("timestamp beyond the latest supported date")
        } else if !(0..=MAX_NANOS).contains(&nanos) {
            Err("timestamp nanos must be between 0 and 999999999")
        } else {
            Ok(Timestamp { seconds, nanos })
        }
    }

    /// Minimum possible time that can be represented
    pub fn min_value() -> Timestamp {
        Timestamp {
            seconds: MIN_SECONDS,
            nanos: 0,
        }
    }

    /// Maximum possible time that can be represented
    pub fn max_value() -> Timestamp {
        Timestamp {
            seconds: MAX_SECONDS,
            nanos: MAX_NANOS,
        }
    }

    /// Seconds since January 1, 1970 0:00:00 UTC.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Nanoseconds past the second count.
    pub fn nanos(&self) -> i32 {
        self.nanos
    }

    /// Create a Timestamp based on the current system time. Fails only if the system clock is set
    /// before the Unix epoch or past year 9999.
    pub fn now() -> Option<Timestamp> {
        match time::SystemTime::now().duration_since(time::SystemTime::UNIX_EPOCH) {
            Ok(t) => Timestamp::new(t.as_secs() as i64, t.subsec_nanos() as i32),
            Err(_) => None,
        }
    }
}

impl cmp::Ord for Timestamp {
    fn cmp(&self, other: &Timestamp) -> cmp::Ordering {
        if self.seconds == other.seconds {
            self.nanos.cmp(&other.nanos)
        } else {
            self.seconds.cmp(&other.seconds)
        }
    }
}

impl cmp::PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Timestamp) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "UTC: {} sec + {} ns", self.seconds, self.nanos)
    }
}

/// Write the fields of a `google.protobuf.Timestamp`. Zero-valued fields are omitted, as proto3
/// does.
pub(crate) fn encode(writer: &mut WireWriter, timestamp: &Timestamp) -> Result<()> {
    if timestamp.seconds != 0 {
        writer.write_tag(Tag::varint(wire::timestamp::SECONDS))?;
        writer.write_integer(timestamp.seconds)?;
    }
    if timestamp.nanos != 0 {
        writer.write_tag(Tag::varint(wire::timestamp::NANOS))?;
        writer.write_integer(timestamp.nanos as i64)?;
    }
    Ok(())
}

/// Read the fields of a `google.protobuf.Timestamp` until the reader is exhausted, then check the
/// result is in range. Repeated fields take the last value.
pub(crate) fn decode(reader: &mut WireReader) -> Result<Timestamp> {
    let mut seconds = 0i64;
    let mut nanos = 0i32;
    while reader.bytes_left() > 0 {
        let tag = reader.read_tag()?;
        match tag.field_number {
            wire::timestamp::SECONDS => {
                reader.expect_wire_type(tag, WireType::Varint)?;
                seconds = reader.read_integer()?;
            }
            wire::timestamp::NANOS => {
                reader.expect_wire_type(tag, WireType::Varint)?;
                let raw = reader.read_integer()?;
                nanos = match i32::try_from(raw) {
                    Ok(n) => n,
                    Err(_) => {
                        return reader.fail(Error::BadTimestamp(format!(
                            "nanos value {} doesn't fit in an int32",
                            raw
                        )))
                    }
                };
            }
            _ => reader.unknown_field("Timestamp", tag)?,
        }
    }
    match Timestamp::check(seconds, nanos) {
        Ok(ts) => Ok(ts),
        Err(msg) => reader.fail(Error::BadTimestamp(msg.to_string())),
    }
}
