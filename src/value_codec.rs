//! Encoding and decoding of the `Value` message, a oneof over the kinds of [`Value`].

use crate::{
    error::{Error, Result},
    object_codec,
    options::UnknownFields,
    reader::WireReader,
    timestamp,
    value::Value,
    wire::{self, Tag, WireType},
    writer::WireWriter,
};

/// The oneof branches this codec knows, by field number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Null,
    Bool,
    Int,
    Str,
    Timestamp,
    Map,
}

impl Field {
    fn from_number(n: u32) -> Option<Field> {
        match n {
            wire::value::NULL_VALUE => Some(Field::Null),
            wire::value::BOOLEAN_VALUE => Some(Field::Bool),
            wire::value::INTEGER_VALUE => Some(Field::Int),
            wire::value::STRING_VALUE => Some(Field::Str),
            wire::value::TIMESTAMP_VALUE => Some(Field::Timestamp),
            wire::value::MAP_VALUE => Some(Field::Map),
            _ => None,
        }
    }

    fn wire_type(self) -> WireType {
        match self {
            Field::Null | Field::Bool | Field::Int => WireType::Varint,
            Field::Str | Field::Timestamp | Field::Map => WireType::LengthDelimited,
        }
    }
}

/// Write a value's oneof field: its tag, then its payload.
pub(crate) fn encode(writer: &mut WireWriter, value: &Value) -> Result<()> {
    match value {
        Value::Null => {
            writer.write_tag(Tag::varint(wire::value::NULL_VALUE))?;
            writer.write_null()
        }
        Value::Bool(v) => {
            writer.write_tag(Tag::varint(wire::value::BOOLEAN_VALUE))?;
            writer.write_bool(*v)
        }
        Value::Int(v) => {
            writer.write_tag(Tag::varint(wire::value::INTEGER_VALUE))?;
            writer.write_integer(*v)
        }
        Value::Str(v) => {
            writer.write_tag(Tag::length_delimited(wire::value::STRING_VALUE))?;
            writer.write_string(v)
        }
        Value::Timestamp(v) => {
            writer.write_tag(Tag::length_delimited(wire::value::TIMESTAMP_VALUE))?;
            writer.write_nested_message(|writer| timestamp::encode(writer, v))
        }
        Value::Map(map) => {
            writer.write_tag(Tag::length_delimited(wire::value::MAP_VALUE))?;
            object_codec::encode(writer, map)
        }
    }
}

/// Read a `Value` message, consuming the reader.
///
/// With unknown fields rejected the message must hold exactly one known field. When skipping
/// unknown fields, the last known field wins, as protobuf oneofs do.
pub(crate) fn decode(reader: &mut WireReader) -> Result<Value> {
    let mut value = None;
    while reader.bytes_left() > 0 {
        let tag = reader.read_tag()?;
        let field = match Field::from_number(tag.field_number) {
            Some(field) => field,
            None => {
                reader.unknown_field("Value", tag)?;
                continue;
            }
        };
        reader.expect_wire_type(tag, field.wire_type())?;
        if value.is_some() && reader.unknown_fields() == UnknownFields::Reject {
            return reader.fail(Error::DuplicateField {
                message: "Value",
                field: tag.field_number,
            });
        }
        value = Some(decode_field(reader, field)?);
    }
    match value {
        Some(value) => Ok(value),
        None => reader.fail(Error::MissingField {
            message: "Value",
            field: "value_type",
        }),
    }
}

fn decode_field(reader: &mut WireReader, field: Field) -> Result<Value> {
    Ok(match field {
        Field::Null => {
            reader.read_null()?;
            Value::Null
        }
        Field::Bool => Value::Bool(reader.read_bool()?),
        Field::Int => Value::Int(reader.read_integer()?),
        Field::Str => Value::Str(reader.read_string()?.to_owned()),
        Field::Timestamp => Value::Timestamp(reader.read_nested_message(timestamp::decode)?),
        Field::Map => Value::Map(object_codec::decode(reader)?),
    })
}
