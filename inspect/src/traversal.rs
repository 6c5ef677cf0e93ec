//! Direction binding: turns a format [`Reader`] or [`Writer`] into the one
//! direction-agnostic [`Traversal`] an [`Inspector`](crate::Inspector)
//! drives.

use crate::{Error, FloatFormat, Length, RawValue, Reader, Result, Writer};

/// Operations shared by both directions.
///
/// Primitive operations take the destination by mutable reference: a reading
/// traversal fills it, a writing traversal emits it. Operations that only
/// make sense in one direction fail with a direction violation on the other.
pub trait Traversal {
    fn is_reading(&self) -> bool;

    fn i32(&mut self, value: &mut i32) -> Result<()>;
    fn i64(&mut self, value: &mut i64) -> Result<()>;
    fn f32(&mut self, value: &mut f32, format: FloatFormat) -> Result<()>;
    fn f64(&mut self, value: &mut f64, format: FloatFormat) -> Result<()>;
    fn string(&mut self, value: &mut String) -> Result<()>;
    fn bytes(&mut self, value: &mut Vec<u8>) -> Result<()>;
    fn byte_string(&mut self, value: &mut Vec<u8>) -> Result<()>;
    fn value(&mut self, value: &mut dyn RawValue) -> Result<()>;

    /// Platform-width integer, carried as 64 or 32 bits to match the target.
    #[cfg(target_pointer_width = "64")]
    fn isize(&mut self, value: &mut isize) -> Result<()> {
        let mut wide = *value as i64;
        self.i64(&mut wide)?;
        *value = wide as isize;
        Ok(())
    }

    #[cfg(not(target_pointer_width = "64"))]
    fn isize(&mut self, value: &mut isize) -> Result<()> {
        let mut narrow = *value as i32;
        self.i32(&mut narrow)?;
        *value = narrow as isize;
        Ok(())
    }

    fn begin_object(&mut self) -> Result<()>;
    fn property(&mut self, name: &str) -> Result<()>;
    fn end_object(&mut self) -> Result<()>;

    fn read_array(&mut self) -> Result<Length>;
    fn write_array(&mut self, length: usize) -> Result<()>;
    fn have_next(&mut self) -> Result<bool>;
    fn end_array(&mut self) -> Result<()>;

    fn read_map(&mut self) -> Result<Length>;
    fn write_map(&mut self, length: usize) -> Result<()>;
    fn read_next_key(&mut self) -> Result<Option<String>>;
    fn write_next_key(&mut self, key: &str) -> Result<()>;
    fn end_map(&mut self) -> Result<()>;

    fn flush(&mut self) -> Result<()>;
}

/// A [`Reader`] bound as the reading side of a traversal.
#[derive(Debug, Default)]
pub struct Reading<R> {
    reader: R,
}

impl<R: Reader> Reading<R> {
    pub fn new(reader: R) -> Reading<R> {
        Reading { reader }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Reader> Traversal for Reading<R> {
    #[inline(always)]
    fn is_reading(&self) -> bool {
        true
    }

    fn i32(&mut self, value: &mut i32) -> Result<()> {
        *value = self.reader.read_i32()?;
        Ok(())
    }

    fn i64(&mut self, value: &mut i64) -> Result<()> {
        *value = self.reader.read_i64()?;
        Ok(())
    }

    fn f32(&mut self, value: &mut f32, _format: FloatFormat) -> Result<()> {
        *value = self.reader.read_f32()?;
        Ok(())
    }

    fn f64(&mut self, value: &mut f64, _format: FloatFormat) -> Result<()> {
        *value = self.reader.read_f64()?;
        Ok(())
    }

    fn string(&mut self, value: &mut String) -> Result<()> {
        *value = self.reader.read_string()?;
        Ok(())
    }

    fn bytes(&mut self, value: &mut Vec<u8>) -> Result<()> {
        *value = self.reader.read_bytes()?;
        Ok(())
    }

    fn byte_string(&mut self, value: &mut Vec<u8>) -> Result<()> {
        *value = self.reader.read_byte_string()?;
        Ok(())
    }

    fn value(&mut self, value: &mut dyn RawValue) -> Result<()> {
        self.reader.read_value(value)
    }

    fn begin_object(&mut self) -> Result<()> {
        self.reader.begin_object()
    }

    fn property(&mut self, name: &str) -> Result<()> {
        self.reader.property(name)
    }

    fn end_object(&mut self) -> Result<()> {
        self.reader.end_object()
    }

    fn read_array(&mut self) -> Result<Length> {
        self.reader.begin_array()
    }

    fn write_array(&mut self, _length: usize) -> Result<()> {
        Err(Error::ReaderCantWrite)
    }

    fn have_next(&mut self) -> Result<bool> {
        self.reader.have_next()
    }

    fn end_array(&mut self) -> Result<()> {
        self.reader.end_array()
    }

    fn read_map(&mut self) -> Result<Length> {
        self.reader.begin_map()
    }

    fn write_map(&mut self, _length: usize) -> Result<()> {
        Err(Error::ReaderCantWrite)
    }

    fn read_next_key(&mut self) -> Result<Option<String>> {
        self.reader.next_key()
    }

    fn write_next_key(&mut self, _key: &str) -> Result<()> {
        Err(Error::ReaderCantWrite)
    }

    fn end_map(&mut self) -> Result<()> {
        self.reader.end_map()
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A [`Writer`] bound as the writing side of a traversal.
#[derive(Debug, Default)]
pub struct Writing<W> {
    writer: W,
}

impl<W: Writer> Writing<W> {
    pub fn new(writer: W) -> Writing<W> {
        Writing { writer }
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
}

impl<W: Writer> Traversal for Writing<W> {
    #[inline(always)]
    fn is_reading(&self) -> bool {
        false
    }

    fn i32(&mut self, value: &mut i32) -> Result<()> {
        self.writer.write_i32(*value)
    }

    fn i64(&mut self, value: &mut i64) -> Result<()> {
        self.writer.write_i64(*value)
    }

    fn f32(&mut self, value: &mut f32, format: FloatFormat) -> Result<()> {
        self.writer.write_f32(*value, format)
    }

    fn f64(&mut self, value: &mut f64, format: FloatFormat) -> Result<()> {
        self.writer.write_f64(*value, format)
    }

    fn string(&mut self, value: &mut String) -> Result<()> {
        self.writer.write_string(value)
    }

    fn bytes(&mut self, value: &mut Vec<u8>) -> Result<()> {
        self.writer.write_bytes(value)
    }

    fn byte_string(&mut self, value: &mut Vec<u8>) -> Result<()> {
        self.writer.write_byte_string(value)
    }

    fn value(&mut self, value: &mut dyn RawValue) -> Result<()> {
        self.writer.write_value(value)
    }

    fn begin_object(&mut self) -> Result<()> {
        self.writer.begin_object()
    }

    fn property(&mut self, name: &str) -> Result<()> {
        self.writer.property(name)
    }

    fn end_object(&mut self) -> Result<()> {
        self.writer.end_object()
    }

    fn read_array(&mut self) -> Result<Length> {
        Err(Error::WriterCantRead)
    }

    fn write_array(&mut self, length: usize) -> Result<()> {
        self.writer.begin_array(length)
    }

    fn have_next(&mut self) -> Result<bool> {
        Err(Error::WriterCantRead)
    }

    fn end_array(&mut self) -> Result<()> {
        self.writer.end_array()
    }

    fn read_map(&mut self) -> Result<Length> {
        Err(Error::WriterCantRead)
    }

    fn write_map(&mut self, length: usize) -> Result<()> {
        self.writer.begin_map(length)
    }

    fn read_next_key(&mut self) -> Result<Option<String>> {
        Err(Error::WriterCantRead)
    }

    fn write_next_key(&mut self, key: &str) -> Result<()> {
        self.writer.next_key(key)
    }

    fn end_map(&mut self) -> Result<()> {
        self.writer.end_map()
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }
}
