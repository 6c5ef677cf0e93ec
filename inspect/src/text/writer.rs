use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use super::stack::Scope;
use super::{TextOptions, TokenSink};
use crate::{Error, FloatFormat, RawValue, Result, Writer};

/// Encodes traversal operations into a token stream.
#[derive(Debug)]
pub struct TextWriter<S> {
    sink: S,
    options: TextOptions,
    scopes: Vec<Scope>,

    /// A sibling was already written at the current level.
    started: bool,
}

impl<S: TokenSink> TextWriter<S> {
    pub fn new(sink: S) -> TextWriter<S> {
        TextWriter::with_options(sink, TextOptions::default())
    }

    pub fn with_options(sink: S, options: TextOptions) -> TextWriter<S> {
        TextWriter {
            sink,
            options,
            scopes: Vec::new(),
            started: false,
        }
    }

    pub fn options(&self) -> &TextOptions {
        &self.options
    }

    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Return the sink. Call [`Writer::flush`] first to push out buffered
    /// output.
    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Emit the separator due before the next sibling.
    fn separate(&mut self) -> Result<()> {
        if !self.started {
            self.started = true;
            return Ok(());
        }

        if self.scopes.is_empty() {
            self.sink.write_document_break()
        } else {
            self.sink.write_more()
        }
    }

    fn open(&mut self, scope: Scope) -> Result<()> {
        self.separate()?;
        match scope {
            Scope::Array => self.sink.begin_array()?,
            _ => self.sink.begin_object()?,
        }
        self.scopes.push(scope);
        self.started = false;
        tracing::trace!(?scope, depth = self.scopes.len(), "open");
        Ok(())
    }

    fn close(&mut self, scope: Scope) -> Result<()> {
        if self.scopes.last() != Some(&scope) {
            return Err(Error::UnbalancedEnd);
        }
        self.scopes.pop();
        match scope {
            Scope::Array => self.sink.end_array()?,
            _ => self.sink.end_object()?,
        }
        self.started = true;
        tracing::trace!(?scope, depth = self.scopes.len(), "close");

        let buffered = self.sink.buffered();
        if buffered > self.options.flush_threshold {
            tracing::trace!(buffered, "flush threshold exceeded");
            self.sink.flush()?;
        }
        Ok(())
    }

    /// Write a field or key name. The value that follows takes no separator.
    fn name(&mut self, expected: Scope, name: &str) -> Result<()> {
        if self.scopes.last() != Some(&expected) {
            return Err(Error::NotAnObject);
        }
        self.separate()?;
        self.sink.write_field_name(name)?;
        self.started = false;
        Ok(())
    }
}

impl<S: TokenSink> Writer for TextWriter<S> {
    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.separate()?;
        self.sink.write_i64(value as i64)
    }

    fn write_i64(&mut self, value: i64) -> Result<()> {
        self.separate()?;
        self.sink.write_i64(value)
    }

    fn write_f32(&mut self, value: f32, format: FloatFormat) -> Result<()> {
        self.separate()?;
        self.sink.write_f32(value, format)
    }

    fn write_f64(&mut self, value: f64, format: FloatFormat) -> Result<()> {
        self.separate()?;
        self.sink.write_f64(value, format)
    }

    fn write_string(&mut self, value: &str) -> Result<()> {
        self.separate()?;
        self.sink.write_string(value)
    }

    fn write_bytes(&mut self, value: &[u8]) -> Result<()> {
        self.separate()?;
        self.sink.write_string(&URL_SAFE_NO_PAD.encode(value))
    }

    fn write_byte_string(&mut self, value: &[u8]) -> Result<()> {
        let text = String::from_utf8(value.to_vec()).map_err(Error::Utf8)?;
        self.separate()?;
        self.sink.write_string(&text)
    }

    fn write_value(&mut self, value: &dyn RawValue) -> Result<()> {
        let text = value.marshal_text().map_err(Error::Value)?;
        self.separate()?;
        self.sink.write_string(&text)
    }

    fn begin_object(&mut self) -> Result<()> {
        self.open(Scope::Object)
    }

    fn property(&mut self, name: &str) -> Result<()> {
        self.name(Scope::Object, name)
    }

    fn end_object(&mut self) -> Result<()> {
        self.close(Scope::Object)
    }

    fn begin_array(&mut self, _length: usize) -> Result<()> {
        self.open(Scope::Array)
    }

    fn end_array(&mut self) -> Result<()> {
        self.close(Scope::Array)
    }

    fn begin_map(&mut self, _length: usize) -> Result<()> {
        self.open(Scope::Map)
    }

    fn next_key(&mut self, key: &str) -> Result<()> {
        self.name(Scope::Map, key)
    }

    fn end_map(&mut self) -> Result<()> {
        self.close(Scope::Map)
    }

    fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }
}
