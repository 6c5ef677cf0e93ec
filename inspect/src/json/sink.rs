use std::io::Write;

use crate::text::TokenSink;
use crate::{Error, FloatFormat, Result};

/// [`TokenSink`] producing compact JSON.
///
/// Output is collected in memory until [`flush`](TokenSink::flush) hands it
/// to the underlying writer.
#[derive(Debug)]
pub struct JsonTokenSink<W> {
    writer: W,
    buf: Vec<u8>,
}

impl<W: Write> JsonTokenSink<W> {
    pub fn new(writer: W) -> JsonTokenSink<W> {
        JsonTokenSink {
            writer,
            buf: Vec::new(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Return the writer, discarding anything not yet flushed.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn check_finite(value: f64) -> Result<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Error::NonFiniteFloat(value))
        }
    }
}

impl<W: Write> TokenSink for JsonTokenSink<W> {
    fn write_i64(&mut self, value: i64) -> Result<()> {
        self.buf.extend_from_slice(value.to_string().as_bytes());
        Ok(())
    }

    // Shortest floats go through serde_json, which switches to exponent
    // notation for very large and very small magnitudes.

    fn write_f32(&mut self, value: f32, format: FloatFormat) -> Result<()> {
        Self::check_finite(value as f64)?;
        match format {
            FloatFormat::Shortest => serde_json::to_writer(&mut self.buf, &value)?,
            _ => self
                .buf
                .extend_from_slice(format.render_f32(value).as_bytes()),
        }
        Ok(())
    }

    fn write_f64(&mut self, value: f64, format: FloatFormat) -> Result<()> {
        Self::check_finite(value)?;
        match format {
            FloatFormat::Shortest => serde_json::to_writer(&mut self.buf, &value)?,
            _ => self.buf.extend_from_slice(format.render(value).as_bytes()),
        }
        Ok(())
    }

    fn write_string(&mut self, value: &str) -> Result<()> {
        serde_json::to_writer(&mut self.buf, value)?;
        Ok(())
    }

    fn begin_object(&mut self) -> Result<()> {
        self.buf.push(b'{');
        Ok(())
    }

    fn write_field_name(&mut self, name: &str) -> Result<()> {
        self.write_string(name)?;
        self.buf.push(b':');
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        self.buf.push(b'}');
        Ok(())
    }

    fn begin_array(&mut self) -> Result<()> {
        self.buf.push(b'[');
        Ok(())
    }

    fn end_array(&mut self) -> Result<()> {
        self.buf.push(b']');
        Ok(())
    }

    fn write_more(&mut self) -> Result<()> {
        self.buf.push(b',');
        Ok(())
    }

    fn write_document_break(&mut self) -> Result<()> {
        self.buf.push(b'\n');
        Ok(())
    }

    fn buffered(&self) -> usize {
        self.buf.len()
    }

    fn flush(&mut self) -> Result<()> {
        if !self.buf.is_empty() {
            tracing::trace!(len = self.buf.len(), "flush");
            self.writer.write_all(&self.buf)?;
            self.buf.clear();
        }
        self.writer.flush()?;
        Ok(())
    }
}
