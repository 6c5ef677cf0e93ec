//! LEB128 varints with zigzag mapping for signed values.
//!
//! Each byte carries seven value bits, least significant group first; the
//! high bit marks a continuation. Signed values are zigzag mapped first so
//! small magnitudes of either sign stay short.

use std::io::Read;

use crate::{Error, Result};

/// Longest encoding of a 64-bit value.
pub const MAX_VARINT_LEN: usize = 10;

#[inline]
pub fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[inline]
pub fn unzigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Encode `value` into `buf`, returning the number of bytes used.
pub fn put_uvarint(buf: &mut [u8; MAX_VARINT_LEN], mut value: u64) -> usize {
    let mut i = 0;
    while value >= 0x80 {
        buf[i] = value as u8 | 0x80;
        value >>= 7;
        i += 1;
    }
    buf[i] = value as u8;
    i + 1
}

#[inline]
pub fn put_varint(buf: &mut [u8; MAX_VARINT_LEN], value: i64) -> usize {
    put_uvarint(buf, zigzag(value))
}

pub fn read_uvarint<R: Read>(reader: &mut R) -> Result<u64> {
    let mut value = 0u64;
    let mut shift = 0u32;

    for i in 0..MAX_VARINT_LEN {
        let mut byte = [0u8; 1];
        reader.read_exact(&mut byte)?;
        let byte = byte[0];

        if byte < 0x80 {
            // The tenth byte may only carry the single remaining bit.
            if i == MAX_VARINT_LEN - 1 && byte > 1 {
                return Err(Error::VarintOverflow);
            }
            return Ok(value | (byte as u64) << shift);
        }

        value |= ((byte & 0x7f) as u64) << shift;
        shift += 7;
    }

    Err(Error::VarintOverflow)
}

#[inline]
pub fn read_varint<R: Read>(reader: &mut R) -> Result<i64> {
    read_uvarint(reader).map(unzigzag)
}
