//! Field tags and the protobuf message layout this codec speaks.

use crate::error::{Error, Result};
use std::fmt;

/// Largest field number protobuf allows.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// How a field's payload is framed. The encoder only ever produces `Varint` and
/// `LengthDelimited`; the fixed-width types are recognised so that unknown fields can be skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireType {
    Varint,
    Fixed64,
    LengthDelimited,
    Fixed32,
}

impl WireType {
    pub fn from_u8(n: u8) -> Option<WireType> {
        match n {
            0 => Some(WireType::Varint),
            1 => Some(WireType::Fixed64),
            2 => Some(WireType::LengthDelimited),
            5 => Some(WireType::Fixed32),
            _ => None,
        }
    }
}

impl From<WireType> for u8 {
    fn from(val: WireType) -> u8 {
        match val {
            WireType::Varint => 0,
            WireType::Fixed64 => 1,
            WireType::LengthDelimited => 2,
            WireType::Fixed32 => 5,
        }
    }
}

/// The (wire type, field number) pair written immediately before a field's payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag {
    pub wire_type: WireType,
    pub field_number: u32,
}

impl Tag {
    pub const fn varint(field_number: u32) -> Tag {
        Tag {
            wire_type: WireType::Varint,
            field_number,
        }
    }

    pub const fn length_delimited(field_number: u32) -> Tag {
        Tag {
            wire_type: WireType::LengthDelimited,
            field_number,
        }
    }

    /// The varint key this tag is written as.
    pub fn key(&self) -> u64 {
        ((self.field_number as u64) << 3) | (u8::from(self.wire_type) as u64)
    }

    /// Split a varint key back into a tag, rejecting field number 0, field numbers past
    /// [`MAX_FIELD_NUMBER`], group wire types, and undefined wire types.
    pub fn from_key(key: u64) -> Result<Tag> {
        let wire_type = (key & 0x7) as u8;
        let field_number = key >> 3;
        if field_number == 0 || field_number > MAX_FIELD_NUMBER as u64 {
            return Err(Error::BadEncode(format!(
                "invalid field number {}",
                field_number
            )));
        }
        let wire_type = WireType::from_u8(wire_type).ok_or_else(|| {
            Error::BadEncode(format!("unsupported wire type {}", wire_type))
        })?;
        Ok(Tag {
            wire_type,
            field_number: field_number as u32,
        })
    }

    /// Fail unless this tag carries the wire type its field number calls for.
    pub fn expect(&self, wire_type: WireType) -> Result<()> {
        if self.wire_type == wire_type {
            Ok(())
        } else {
            Err(Error::WireTypeMismatch {
                field: self.field_number,
                expected: wire_type,
                actual: self.wire_type,
            })
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "field {} ({:?})", self.field_number, self.wire_type)
    }
}

/// Field numbers of `google.firestore.v1.Value`.
pub mod value {
    pub const BOOLEAN_VALUE: u32 = 1;
    pub const INTEGER_VALUE: u32 = 2;
    pub const MAP_VALUE: u32 = 6;
    pub const TIMESTAMP_VALUE: u32 = 10;
    pub const NULL_VALUE: u32 = 11;
    pub const STRING_VALUE: u32 = 17;

    /// The only defined value of `google.protobuf.NullValue`.
    pub const NULL_VALUE_NULL: u64 = 0;
}

/// Field numbers of `google.protobuf.Timestamp`.
pub mod timestamp {
    pub const SECONDS: u32 = 1;
    pub const NANOS: u32 = 2;
}

/// Field numbers of `google.firestore.v1.MapValue` and its `FieldsEntry`.
pub mod map {
    pub const FIELDS: u32 = 1;
    pub const ENTRY_KEY: u32 = 1;
    pub const ENTRY_VALUE: u32 = 2;
}
