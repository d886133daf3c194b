//! Encoding and decoding of `MapValue`, the message objects are carried in.
//!
//! A `MapValue` is a repeated list of `FieldsEntry` submessages, one per object field, each
//! holding the field name and a nested `Value`:
//!
//! ```text
//! MapValue   { fields: 1 (repeated FieldsEntry) }
//! FieldsEntry { key: 1 (string), value: 2 (Value) }
//! ```

use crate::{
    error::{Error, Result},
    reader::WireReader,
    value::{ObjectMap, Value},
    value_codec,
    wire::{self, Tag, WireType},
    writer::WireWriter,
};

/// Write an object as a length-delimited `MapValue`, entries in key order.
pub(crate) fn encode(writer: &mut WireWriter, map: &ObjectMap) -> Result<()> {
    writer.write_nested_message(|writer| {
        writer.enter_object()?;
        for (key, value) in map.iter() {
            writer.write_tag(Tag::length_delimited(wire::map::FIELDS))?;
            writer.write_nested_message(|writer| encode_entry(writer, key, value))?;
        }
        Ok(())
    })
}

fn encode_entry(writer: &mut WireWriter, key: &str, value: &Value) -> Result<()> {
    writer.write_tag(Tag::length_delimited(wire::map::ENTRY_KEY))?;
    writer.write_string(key)?;
    writer.write_tag(Tag::length_delimited(wire::map::ENTRY_VALUE))?;
    writer.write_nested_message(|writer| value_codec::encode(writer, value))
}

/// Read a length-delimited `MapValue`. Counts as one level of object nesting.
pub(crate) fn decode(reader: &mut WireReader) -> Result<ObjectMap> {
    reader.read_nested_message(|reader| {
        reader.enter_object()?;
        let mut map = ObjectMap::new();
        while reader.bytes_left() > 0 {
            let tag = reader.read_tag()?;
            if tag.field_number != wire::map::FIELDS {
                reader.unknown_field("MapValue", tag)?;
                continue;
            }
            reader.expect_wire_type(tag, WireType::LengthDelimited)?;
            let (key, value) = reader.read_nested_message(decode_entry)?;
            if map.contains_key(&key) {
                return reader.fail(Error::DuplicateKey(key));
            }
            map.insert(key, value);
        }
        Ok(map)
    })
}

/// Read the contents of one `FieldsEntry`. The key must come first, and both fields exactly once.
fn decode_entry(reader: &mut WireReader) -> Result<(String, Value)> {
    let mut key: Option<String> = None;
    let mut value: Option<Value> = None;
    while reader.bytes_left() > 0 {
        let tag = reader.read_tag()?;
        match tag.field_number {
            wire::map::ENTRY_KEY => {
                reader.expect_wire_type(tag, WireType::LengthDelimited)?;
                // A value is only accepted after a key, so this covers a key after the value too
                if key.is_some() {
                    return reader.fail(Error::DuplicateField {
                        message: "FieldsEntry",
                        field: tag.field_number,
                    });
                }
                key = Some(reader.read_string()?.to_owned());
            }
            wire::map::ENTRY_VALUE => {
                reader.expect_wire_type(tag, WireType::LengthDelimited)?;
                if key.is_none() {
                    return reader.fail(Error::MisorderedField {
                        message: "FieldsEntry",
                        field: tag.field_number,
                    });
                }
                if value.is_some() {
                    return reader.fail(Error::DuplicateField {
                        message: "FieldsEntry",
                        field: tag.field_number,
                    });
                }
                value = Some(reader.read_nested_message(value_codec::decode)?);
            }
            _ => reader.unknown_field("FieldsEntry", tag)?,
        }
    }
    match (key, value) {
        (Some(key), Some(value)) => Ok((key, value)),
        (None, _) => reader.fail(Error::MissingField {
            message: "FieldsEntry",
            field: "key",
        }),
        (Some(_), None) => reader.fail(Error::MissingField {
            message: "FieldsEntry",
            field: "value",
        }),
    }
}
