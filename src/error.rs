use crate::{wire::WireType, DatabaseId};
use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Broad classification of an [`Error`], for callers that map codec failures onto their own
/// status codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input bytes or resource name were corrupt, truncated, or otherwise not something this
    /// codec would ever produce.
    DataCorruption,
    /// The caller asked to encode something the codec refuses to produce, like a value nested
    /// deeper than the depth limit or larger than the maximum message size.
    InvalidArgument,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Input ended too early.
    LengthTooShort {
        step: &'static str,
        actual: usize,
        expected: usize,
    },
    /// Input was greater than the maximum allowed size on decode.
    LengthTooLong { max: usize, actual: usize },
    /// Basic wire encoding failure: a bad tag, an overlong varint, an invalid bool or null, or a
    /// string that isn't UTF-8.
    BadEncode(String),
    /// A known field arrived with the wrong wire type.
    WireTypeMismatch {
        field: u32,
        expected: WireType,
        actual: WireType,
    },
    /// A field number that isn't part of the message, while unknown fields are rejected.
    UnknownField { message: &'static str, field: u32 },
    /// A field that may only appear once appeared again.
    DuplicateField { message: &'static str, field: u32 },
    /// A required field never appeared.
    MissingField { message: &'static str, field: &'static str },
    /// A field appeared before the fields that must precede it.
    MisorderedField { message: &'static str, field: u32 },
    /// A map contained the same key twice.
    DuplicateKey(String),
    /// A nested message wasn't fully consumed by its decoder.
    TrailingBytes { step: &'static str, remaining: usize },
    /// Timestamp was outside the supported range.
    BadTimestamp(String),
    /// Decoding hit the nesting limit.
    ParseLimit(String),
    /// A resource name didn't have the `projects/{p}/databases/{d}/documents/...` shape.
    BadResourceName(String),
    /// A resource name belonged to a different project or database than expected.
    WrongDatabase {
        expected: DatabaseId,
        actual: DatabaseId,
    },
    /// Encoding hit the size or nesting limit.
    EncodeLimit(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EncodeLimit(_) => ErrorKind::InvalidArgument,
            _ => ErrorKind::DataCorruption,
        }
    }

    pub fn is_data_corruption(&self) -> bool {
        self.kind() == ErrorKind::DataCorruption
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::LengthTooShort {
                step,
                actual,
                expected,
            } => write!(
                f,
                "Expected data length {}, but got {} on step [{}]",
                expected, actual, step
            ),
            Error::LengthTooLong { max, actual } => write!(
                f,
                "Data too long: was {} bytes, maximum allowed is {}",
                actual, max
            ),
            Error::BadEncode(ref err) => write!(f, "Basic wire encoding failure: {}", err),
            Error::WireTypeMismatch {
                field,
                expected,
                actual,
            } => write!(
                f,
                "Malformed input: wire type {:?} does not match field {} (expected {:?})",
                actual, field, expected
            ),
            Error::UnknownField { message, field } => {
                write!(f, "Malformed input: unknown field {} in {}", field, message)
            }
            Error::DuplicateField { message, field } => {
                write!(f, "Malformed input: field {} repeated in {}", field, message)
            }
            Error::MissingField { message, field } => {
                write!(f, "Malformed input: {} is missing its {}", message, field)
            }
            Error::MisorderedField { message, field } => write!(
                f,
                "Malformed input: field {} out of order in {}",
                field, message
            ),
            Error::DuplicateKey(ref key) => {
                write!(f, "Malformed input: map key {:?} appears more than once", key)
            }
            Error::TrailingBytes { step, remaining } => write!(
                f,
                "Malformed input: {} bytes left unread on step [{}]",
                remaining, step
            ),
            Error::BadTimestamp(ref err) => write!(f, "Invalid timestamp: {}", err),
            Error::ParseLimit(ref err) => write!(f, "Hit parsing limit: {}", err),
            Error::BadResourceName(ref name) => write!(f, "Invalid resource name: {:?}", name),
            Error::WrongDatabase {
                ref expected,
                ref actual,
            } => write!(
                f,
                "Key belongs to a different project/database: expected {}, got {}",
                expected, actual
            ),
            Error::EncodeLimit(ref err) => write!(f, "Hit encoding limit: {}", err),
        }
    }
}

impl std::error::Error for Error {}
