//! JSON through the streaming text backend.
//!
//! ```
//! use inspect::{json, FloatFormat, Inspect, Inspector, Traversal};
//!
//! #[derive(Default)]
//! struct Point {
//!     x: f64,
//!     y: f64,
//! }
//!
//! impl Inspect for Point {
//!     fn inspect<T: Traversal>(&mut self, inspector: &mut Inspector<T>) {
//!         let mut object = inspector.begin_object("point", "");
//!         object.f64("x", &mut self.x, FloatFormat::Shortest, true, "");
//!         object.f64("y", &mut self.y, FloatFormat::Shortest, true, "");
//!         object.end();
//!     }
//! }
//!
//! let text = json::to_string(&mut Point { x: 1.5, y: -2.0 }).unwrap();
//! assert_eq!(text, r#"{"x":1.5,"y":-2.0}"#);
//!
//! let point: Point = json::from_str(&text).unwrap();
//! assert_eq!(point.y, -2.0);
//! ```

mod sink;
mod source;
#[cfg(test)]
mod tests;

use std::io::{Read, Write};

pub use sink::JsonTokenSink;
pub use source::JsonTokenSource;

use crate::text::{TextOptions, TextReader, TextWriter};
use crate::{Error, Inspect, Inspector, Reading, Result, Writing};

pub type JsonReader<R> = TextReader<JsonTokenSource<R>>;
pub type JsonWriter<W> = TextWriter<JsonTokenSink<W>>;

pub type JsonReadInspector<R> = Inspector<Reading<JsonReader<R>>>;
pub type JsonWriteInspector<W> = Inspector<Writing<JsonWriter<W>>>;

pub fn reader<R: Read>(reader: R) -> JsonReadInspector<R> {
    Inspector::new(Reading::new(TextReader::new(JsonTokenSource::new(reader))))
}

pub fn writer<W: Write>(writer: W) -> JsonWriteInspector<W> {
    writer_with_options(writer, TextOptions::default())
}

pub fn writer_with_options<W: Write>(writer: W, options: TextOptions) -> JsonWriteInspector<W> {
    Inspector::new(Writing::new(TextWriter::with_options(
        JsonTokenSink::new(writer),
        options,
    )))
}

/// Encode `value` into `writer`, returning the writer once flushed.
pub fn to_writer<V: Inspect, W: Write>(value: &mut V, writer: W) -> Result<W> {
    let mut inspector = self::writer(writer);
    value.inspect(&mut inspector);
    inspector.flush();
    Ok(inspector.finish()?.into_inner().into_inner().into_inner())
}

pub fn to_string<V: Inspect>(value: &mut V) -> Result<String> {
    let data = to_writer(value, Vec::new())?;
    String::from_utf8(data).map_err(Error::Utf8)
}

pub fn from_reader<V: Inspect + Default, R: Read>(reader: R) -> Result<V> {
    let mut value = V::default();
    let mut inspector = self::reader(reader);
    value.inspect(&mut inspector);
    inspector.finish()?;
    Ok(value)
}

pub fn from_str<V: Inspect + Default>(text: &str) -> Result<V> {
    from_reader(text.as_bytes())
}
