//! The input half of the wire primitives.

use crate::{
    depth_tracking::DepthTracker,
    error::{Error, Result},
    options::UnknownFields,
    varint,
    wire::{self, Tag, WireType},
};
use byteorder::{LittleEndian, ReadBytesExt};

/// Reads protobuf wire primitives off a borrowed byte slice. Nothing read from the input is
/// trusted: every length is checked against the bytes actually remaining.
///
/// Like [`WireWriter`](crate::writer::WireWriter), the reader is fail-fast. Once an error has
/// been recorded, every later call returns it again without consuming input.
#[derive(Clone, Debug)]
pub struct WireReader<'a> {
    data: &'a [u8],
    unknown_fields: UnknownFields,
    depth_tracking: DepthTracker,
    failed: Option<Error>,
}

impl<'a> WireReader<'a> {
    pub fn new(data: &'a [u8], unknown_fields: UnknownFields, max_depth: usize) -> Self {
        Self {
            data,
            unknown_fields,
            depth_tracking: DepthTracker::new(max_depth),
            failed: None,
        }
    }

    pub fn bytes_left(&self) -> usize {
        self.data.len()
    }

    pub fn unknown_fields(&self) -> UnknownFields {
        self.unknown_fields
    }

    /// The first error this reader recorded, if any.
    pub fn status(&self) -> Result<()> {
        match self.failed {
            Some(ref err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Record a failure found by a caller while interpreting what this reader produced, such as a
    /// decoded timestamp being out of range. Returns the error so it can be propagated with `?`.
    pub fn fail<T>(&mut self, err: Error) -> Result<T> {
        self.record(Err(err))
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(ref err) = result {
            if self.failed.is_none() {
                self.failed = Some(err.clone());
            }
        }
        result
    }

    pub fn read_varint(&mut self) -> Result<u64> {
        self.status()?;
        let result = varint::read(&mut self.data);
        self.record(result)
    }

    pub fn read_tag(&mut self) -> Result<Tag> {
        let key = self.read_varint()?;
        let result = Tag::from_key(key);
        self.record(result)
    }

    pub fn read_null(&mut self) -> Result<()> {
        let value = self.read_varint()?;
        if value != wire::value::NULL_VALUE_NULL {
            return self.fail(Error::BadEncode(format!("invalid null value {}", value)));
        }
        Ok(())
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_varint()? {
            0 => Ok(false),
            1 => Ok(true),
            v => self.fail(Error::BadEncode(format!("invalid bool value {}", v))),
        }
    }

    pub fn read_integer(&mut self) -> Result<i64> {
        Ok(self.read_varint()? as i64)
    }

    /// Read a length prefix and split off that many bytes.
    fn read_length_delimited(&mut self, step: &'static str) -> Result<&'a [u8]> {
        let len = self.read_varint()?;
        if len > self.data.len() as u64 {
            return self.fail(Error::LengthTooShort {
                step,
                actual: self.data.len(),
                expected: len as usize,
            });
        }
        let (bytes, data) = self.data.split_at(len as usize);
        self.data = data;
        Ok(bytes)
    }

    pub fn read_string(&mut self) -> Result<&'a str> {
        let bytes = self.read_length_delimited("get string content")?;
        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s),
            Err(e) => self.fail(Error::BadEncode(format!("{}", e))),
        }
    }

    /// Read a length-delimited submessage. `read_message` gets a reader bounded to exactly the
    /// submessage's bytes, and must consume all of them; leftover bytes are a decode error.
    pub fn read_nested_message<T, F>(&mut self, read_message: F) -> Result<T>
    where
        F: FnOnce(&mut WireReader<'a>) -> Result<T>,
    {
        let data = self.read_length_delimited("get nested message")?;
        let mut nested = WireReader {
            data,
            unknown_fields: self.unknown_fields,
            depth_tracking: self.depth_tracking,
            failed: None,
        };
        let result = read_message(&mut nested).and_then(|message| {
            nested.status()?;
            if nested.bytes_left() != 0 {
                return Err(Error::TrailingBytes {
                    step: "read nested message",
                    remaining: nested.bytes_left(),
                });
            }
            Ok(message)
        });
        self.record(result)
    }

    /// Discard the payload of a field this reader has already read the tag of.
    pub fn skip_field(&mut self, tag: Tag) -> Result<()> {
        self.status()?;
        let actual = self.data.len();
        let result = match tag.wire_type {
            WireType::Varint => varint::read(&mut self.data).map(|_| ()),
            WireType::Fixed64 => {
                self.data
                    .read_u64::<LittleEndian>()
                    .map(|_| ())
                    .map_err(|_| Error::LengthTooShort {
                        step: "skip fixed64 field",
                        actual,
                        expected: 8,
                    })
            }
            WireType::Fixed32 => {
                self.data
                    .read_u32::<LittleEndian>()
                    .map(|_| ())
                    .map_err(|_| Error::LengthTooShort {
                        step: "skip fixed32 field",
                        actual,
                        expected: 4,
                    })
            }
            WireType::LengthDelimited => {
                return self.read_length_delimited("skip length-delimited field").map(|_| ())
            }
        };
        self.record(result)
    }

    /// Handle a field number the message being decoded doesn't define, according to the reader's
    /// [`UnknownFields`] policy.
    pub fn unknown_field(&mut self, message: &'static str, tag: Tag) -> Result<()> {
        match self.unknown_fields {
            UnknownFields::Reject => self.fail(Error::UnknownField {
                message,
                field: tag.field_number,
            }),
            UnknownFields::Skip => {
                tracing::trace!(
                    container = message,
                    field = tag.field_number,
                    "skipping unknown field"
                );
                self.skip_field(tag)
            }
        }
    }

    /// Check that a known field carries the wire type it should, recording a mismatch.
    pub fn expect_wire_type(&mut self, tag: Tag, wire_type: WireType) -> Result<()> {
        let result = tag.expect(wire_type);
        self.record(result)
    }

    /// Record entry into one more level of object nesting, failing past the depth limit.
    pub fn enter_object(&mut self) -> Result<()> {
        self.status()?;
        let result = self.depth_tracking.enter_object();
        self.record(result)
    }
}
