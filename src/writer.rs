//! The output half of the wire primitives.

use crate::{
    depth_tracking::DepthTracker,
    error::{Error, Result},
    varint,
    wire::{self, Tag},
};

/// Appends protobuf wire primitives onto a byte vector.
///
/// The writer is fail-fast: the first error it hits is recorded, and every later call returns that
/// same error without writing anything, so a caller only needs to check the outcome at the end.
pub struct WireWriter<'a> {
    buf: &'a mut Vec<u8>,
    start: usize,
    max_size: usize,
    depth_tracking: DepthTracker,
    failed: Option<Error>,
}

impl<'a> WireWriter<'a> {
    /// Wrap a byte vector. Output is appended after whatever the vector already holds; at most
    /// `max_size` bytes may be appended.
    pub fn new(buf: &'a mut Vec<u8>, max_size: usize, max_depth: usize) -> Self {
        let start = buf.len();
        Self {
            buf,
            start,
            max_size,
            depth_tracking: DepthTracker::new(max_depth),
            failed: None,
        }
    }

    /// Number of bytes this writer has appended.
    pub fn bytes_written(&self) -> usize {
        self.buf.len() - self.start
    }

    /// The first error this writer recorded, if any.
    pub fn status(&self) -> Result<()> {
        match self.failed {
            Some(ref err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(ref err) = result {
            if self.failed.is_none() {
                self.failed = Some(err.clone());
            }
        }
        result
    }

    fn reserve(&mut self, len: usize) -> Result<()> {
        self.status()?;
        let total = self.bytes_written() + len;
        if total > self.max_size {
            tracing::warn!(
                size = total,
                max = self.max_size,
                "encoded message exceeds maximum size"
            );
            return self.record(Err(Error::EncodeLimit(format!(
                "message would be {} bytes, maximum is {}",
                total, self.max_size
            ))));
        }
        Ok(())
    }

    pub fn write_tag(&mut self, tag: Tag) -> Result<()> {
        self.write_varint(tag.key())
    }

    pub fn write_varint(&mut self, value: u64) -> Result<()> {
        self.reserve(varint::encoded_len(value))?;
        varint::write(self.buf, value);
        Ok(())
    }

    pub fn write_null(&mut self) -> Result<()> {
        self.write_varint(wire::value::NULL_VALUE_NULL)
    }

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_varint(value as u64)
    }

    /// Integers are written as the plain varint of their two's complement bits, so any negative
    /// number takes the full ten bytes.
    pub fn write_integer(&mut self, value: i64) -> Result<()> {
        self.write_varint(value as u64)
    }

    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_bytes(value.as_bytes())
    }

    pub fn write_bytes(&mut self, value: &[u8]) -> Result<()> {
        self.reserve(varint::encoded_len(value.len() as u64) + value.len())?;
        varint::write(self.buf, value.len() as u64);
        self.buf.extend_from_slice(value);
        Ok(())
    }

    /// Write a length-delimited submessage. The message is encoded once into a scratch buffer,
    /// then its length and bytes are appended here, so the length prefix is always exact.
    ///
    /// Each level of nesting copies its payload once more into its parent, so encoding costs
    /// O(depth * size) in copies. Both are bounded by the writer's limits.
    pub fn write_nested_message<F>(&mut self, write_message: F) -> Result<()>
    where
        F: FnOnce(&mut WireWriter) -> Result<()>,
    {
        self.status()?;
        let mut scratch = Vec::new();
        let mut nested = WireWriter {
            buf: &mut scratch,
            start: 0,
            max_size: self.max_size - self.bytes_written(),
            depth_tracking: self.depth_tracking,
            failed: None,
        };
        let result = write_message(&mut nested).and_then(|_| nested.status());
        self.record(result)?;
        self.write_bytes(&scratch)
    }

    /// Record entry into one more level of object nesting, failing past the depth limit.
    pub fn enter_object(&mut self) -> Result<()> {
        self.status()?;
        let result = self.depth_tracking.enter_object().map_err(|_| {
            tracing::warn!(depth = self.depth_tracking.depth(), "value nested too deeply to encode");
            Error::EncodeLimit(format!(
                "value nested more than {} objects deep",
                self.depth_tracking.depth() - 1
            ))
        });
        self.record(result)
    }
}
