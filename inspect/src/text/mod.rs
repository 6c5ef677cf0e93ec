//! Streaming text backend.
//!
//! The backend does not know any concrete syntax. It drives a
//! [`TokenSource`] when reading and a [`TokenSink`] when writing, and keeps
//! a stack of nesting levels so that collections can be decoded without
//! knowing their length up front. Raw bytes travel as unpadded URL-safe
//! base64 strings; byte strings travel verbatim.
//!
//! The bundled JSON tokenizer lives in [`crate::json`].

mod reader;
mod stack;
mod writer;

pub use reader::TextReader;
pub use writer::TextWriter;

use crate::{FloatFormat, Result};

/// Buffered output size past which a writer flushes after closing a
/// structure.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TextOptions {
    /// Flush the sink after an object, array or map is closed once more
    /// than this many bytes are buffered.
    pub flush_threshold: usize,
}

impl Default for TextOptions {
    fn default() -> Self {
        TextOptions {
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
        }
    }
}

/// Pull tokenizer for a structured text syntax.
pub trait TokenSource {
    fn read_i64(&mut self) -> Result<i64>;
    fn read_f64(&mut self) -> Result<f64>;
    fn read_string(&mut self) -> Result<String>;

    /// Enter the object at the current position, or advance within the one
    /// being read, returning the next field name. `None` means the object
    /// has ended and its terminator was consumed.
    fn read_object_field(&mut self) -> Result<Option<String>>;

    /// Enter the array at the current position, or advance within the one
    /// being read. `false` means the array has ended and its terminator was
    /// consumed.
    fn read_array_next(&mut self) -> Result<bool>;
}

/// Push emitter for a structured text syntax.
///
/// Separators are requested explicitly: the sink never decides on its own
/// whether a comma or document break is due.
pub trait TokenSink {
    fn write_i64(&mut self, value: i64) -> Result<()>;
    fn write_f32(&mut self, value: f32, format: FloatFormat) -> Result<()>;
    fn write_f64(&mut self, value: f64, format: FloatFormat) -> Result<()>;
    fn write_string(&mut self, value: &str) -> Result<()>;

    fn begin_object(&mut self) -> Result<()>;
    fn write_field_name(&mut self, name: &str) -> Result<()>;
    fn end_object(&mut self) -> Result<()>;
    fn begin_array(&mut self) -> Result<()>;
    fn end_array(&mut self) -> Result<()>;

    /// Separator between two siblings inside a structure.
    fn write_more(&mut self) -> Result<()>;

    /// Separator between two top-level documents.
    fn write_document_break(&mut self) -> Result<()>;

    /// Bytes produced but not yet handed to the underlying stream.
    fn buffered(&self) -> usize;

    fn flush(&mut self) -> Result<()>;
}
