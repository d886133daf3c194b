//! Base-128 varints, least significant group first, as used by the protobuf wire format.

use crate::error::{Error, Result};
use byteorder::ReadBytesExt;

/// A u64 never needs more than 10 groups of 7 bits.
pub const MAX_VARINT_LEN: usize = 10;

/// Append the varint encoding of `value` onto a byte vector.
pub fn write(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Number of bytes [`write`] produces for `value`.
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}

/// Read a varint off the front of `buf`, advancing it past the consumed bytes. Fails if the
/// buffer ends mid-varint or the varint doesn't fit in a u64.
pub fn read(buf: &mut &[u8]) -> Result<u64> {
    let start_len = buf.len();
    let mut value = 0u64;
    for i in 0..MAX_VARINT_LEN {
        let byte = buf.read_u8().map_err(|_| Error::LengthTooShort {
            step: "decode varint",
            actual: start_len,
            expected: i + 1,
        })?;
        if i == MAX_VARINT_LEN - 1 && byte > 1 {
            return Err(Error::BadEncode(String::from("varint larger than a u64")));
        }
        value |= ((byte & 0x7F) as u64) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(Error::BadEncode(String::from("varint larger than a u64")))
}
