use std::io::{ErrorKind, Write};

use super::varint::{put_uvarint, put_varint, MAX_VARINT_LEN};
use crate::{Error, FloatFormat, RawValue, Result, Writer};

/// Writes the compact binary format to a byte stream.
///
/// The writer does no buffering of its own; wrap the stream in a
/// `BufWriter` if it is expensive to write to.
pub struct BinaryWriter<W> {
    writer: W,
    scratch: [u8; MAX_VARINT_LEN],
}

/// Write all of `buf`, treating a stream that stops accepting bytes as a
/// short write rather than an I/O failure.
fn write_fully<W: Write>(writer: &mut W, buf: &[u8]) -> Result<()> {
    let mut written = 0;
    while written < buf.len() {
        match writer.write(&buf[written..]) {
            Ok(0) => {
                return Err(Error::ShortWrite {
                    expected: buf.len(),
                    written,
                })
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(writer: W) -> BinaryWriter<W> {
        BinaryWriter {
            writer,
            scratch: [0u8; MAX_VARINT_LEN],
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    #[inline]
    fn write_scratch(&mut self, len: usize) -> Result<()> {
        write_fully(&mut self.writer, &self.scratch[..len])
    }

    #[inline]
    fn write_uvarint(&mut self, value: u64) -> Result<()> {
        let len = put_uvarint(&mut self.scratch, value);
        self.write_scratch(len)
    }

    #[inline]
    fn write_varint(&mut self, value: i64) -> Result<()> {
        let len = put_varint(&mut self.scratch, value);
        self.write_scratch(len)
    }

    fn write_payload(&mut self, data: &[u8]) -> Result<()> {
        self.write_varint(data.len() as i64)?;
        write_fully(&mut self.writer, data)
    }
}

impl<W: Write> Writer for BinaryWriter<W> {
    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_varint(value as i64)
    }

    fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_varint(value)
    }

    fn write_f32(&mut self, value: f32, _format: FloatFormat) -> Result<()> {
        self.write_uvarint(value.to_bits() as u64)
    }

    fn write_f64(&mut self, value: f64, _format: FloatFormat) -> Result<()> {
        self.write_uvarint(value.to_bits())
    }

    fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_payload(value.as_bytes())
    }

    fn write_bytes(&mut self, value: &[u8]) -> Result<()> {
        self.write_payload(value)
    }

    fn write_byte_string(&mut self, value: &[u8]) -> Result<()> {
        self.write_payload(value)
    }

    fn write_value(&mut self, value: &dyn RawValue) -> Result<()> {
        let data = value.marshal_binary().map_err(Error::Value)?;
        self.write_payload(&data)
    }

    fn begin_object(&mut self) -> Result<()> {
        Ok(())
    }

    fn property(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        Ok(())
    }

    fn begin_array(&mut self, length: usize) -> Result<()> {
        tracing::trace!(length, "array length");
        self.write_varint(length as i64)
    }

    fn end_array(&mut self) -> Result<()> {
        Ok(())
    }

    fn begin_map(&mut self, length: usize) -> Result<()> {
        tracing::trace!(length, "map length");
        self.write_varint(length as i64)
    }

    fn next_key(&mut self, key: &str) -> Result<()> {
        self.write_string(key)
    }

    fn end_map(&mut self) -> Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
