use std::io::{BufReader, Read};

use super::varint::{read_uvarint, read_varint};
use super::{DEFAULT_BUFFER_SIZE, DEFAULT_COLLECTION_LIMIT};
use crate::counting::CountingReader;
use crate::{Error, Length, RawValue, Reader, Result};

/// Capacity reserved from a declared payload length before the bytes arrive.
const PREALLOCATE_LIMIT: usize = 64 * 1024;

/// Reads the compact binary format from a byte stream.
pub struct BinaryReader<R> {
    inner: CountingReader<BufReader<R>>,
    collection_limit: usize,
}

impl<R: Read> BinaryReader<R> {
    pub fn new(reader: R) -> BinaryReader<R> {
        BinaryReader::with_capacity(DEFAULT_BUFFER_SIZE, reader)
    }

    pub fn with_capacity(capacity: usize, reader: R) -> BinaryReader<R> {
        BinaryReader {
            inner: CountingReader::new(BufReader::with_capacity(capacity, reader)),
            collection_limit: DEFAULT_COLLECTION_LIMIT,
        }
    }

    /// Reject arrays and maps declaring more than `limit` elements.
    ///
    /// Elements that occupy no bytes on the wire would otherwise let a few
    /// bytes of input demand an arbitrary amount of work.
    pub fn with_collection_limit(mut self, limit: usize) -> BinaryReader<R> {
        self.collection_limit = limit;
        self
    }

    /// Bytes consumed from the stream so far.
    #[inline(always)]
    pub fn position(&self) -> u64 {
        self.inner.bytes_read()
    }

    pub fn get_ref(&self) -> &R {
        self.inner.get_ref().get_ref()
    }

    pub fn get_mut(&mut self) -> &mut R {
        self.inner.get_mut().get_mut()
    }

    /// Return the underlying stream. Bytes buffered but not yet decoded are lost.
    pub fn into_inner(self) -> R {
        self.inner.into_inner().into_inner()
    }

    fn read_length(&mut self) -> Result<usize> {
        let length = read_varint(&mut self.inner)?;
        usize::try_from(length).map_err(|_| Error::InvalidLength(length))
    }

    fn read_collection_length(&mut self) -> Result<usize> {
        let length = self.read_length()?;
        if length > self.collection_limit {
            return Err(Error::CollectionTooLong {
                length,
                limit: self.collection_limit,
            });
        }
        Ok(length)
    }

    fn read_payload(&mut self) -> Result<Vec<u8>> {
        let start = self.position();
        let len = self.read_length()?;

        let mut buf = Vec::with_capacity(len.min(PREALLOCATE_LIMIT));
        let read = (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        if read < len {
            return Err(Error::ShortRead {
                expected: len,
                actual: read,
            });
        }

        let end = self.position();
        tracing::debug!(
            start = format_args!("{:#x}", start),
            end = format_args!("{:#x}", end),
            bytes = end - start,
            len,
            "read payload"
        );
        Ok(buf)
    }
}

impl<R: Read> Reader for BinaryReader<R> {
    fn read_i32(&mut self) -> Result<i32> {
        let value = read_varint(&mut self.inner)?;
        i32::try_from(value).map_err(|_| Error::OutOfRange {
            value,
            target: "i32",
        })
    }

    fn read_i64(&mut self) -> Result<i64> {
        read_varint(&mut self.inner)
    }

    fn read_f32(&mut self) -> Result<f32> {
        let bits = read_uvarint(&mut self.inner)?;
        let bits = u32::try_from(bits).map_err(|_| Error::OutOfRange {
            value: bits as i64,
            target: "f32",
        })?;
        Ok(f32::from_bits(bits))
    }

    fn read_f64(&mut self) -> Result<f64> {
        read_uvarint(&mut self.inner).map(f64::from_bits)
    }

    fn read_string(&mut self) -> Result<String> {
        String::from_utf8(self.read_payload()?).map_err(Error::Utf8)
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>> {
        self.read_payload()
    }

    fn read_byte_string(&mut self) -> Result<Vec<u8>> {
        self.read_payload()
    }

    fn read_value(&mut self, value: &mut dyn RawValue) -> Result<()> {
        let data = self.read_payload()?;
        value.unmarshal_binary(&data).map_err(Error::Value)
    }

    // Objects are positional: nothing is on the wire for them.

    fn begin_object(&mut self) -> Result<()> {
        Ok(())
    }

    fn property(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        Ok(())
    }

    fn begin_array(&mut self) -> Result<Length> {
        let length = self.read_collection_length()?;
        tracing::trace!(length, "array length");
        Ok(Length::Determinate(length))
    }

    fn have_next(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn end_array(&mut self) -> Result<()> {
        Ok(())
    }

    fn begin_map(&mut self) -> Result<Length> {
        let length = self.read_collection_length()?;
        tracing::trace!(length, "map length");
        Ok(Length::Determinate(length))
    }

    fn next_key(&mut self) -> Result<Option<String>> {
        self.read_string().map(Some)
    }

    fn end_map(&mut self) -> Result<()> {
        Ok(())
    }
}
