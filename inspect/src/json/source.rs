use std::io::{self, Read};

use serde_json::de::IoRead;
use serde_json::{Deserializer, StreamDeserializer, Value};

use crate::text::TokenSource;
use crate::{Error, Result};

/// Structure being walked by the source.
enum Frame {
    Object(serde_json::map::IntoIter),
    Array(std::vec::IntoIter<Value>),
}

/// [`TokenSource`] over a stream of whitespace-separated JSON documents.
///
/// Each top-level document is parsed with `serde_json`, field order
/// preserved, and then walked token by token. `null` is accepted wherever
/// an object or array is expected and reads as an empty one.
pub struct JsonTokenSource<R: Read> {
    documents: StreamDeserializer<'static, IoRead<R>, Value>,

    /// Value at the current position, not yet consumed.
    pending: Option<Value>,
    frames: Vec<Frame>,
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unexpected(expected: &'static str, found: &Value) -> Error {
    Error::UnexpectedToken {
        expected,
        found: describe(found),
    }
}

impl<R: Read> JsonTokenSource<R> {
    pub fn new(reader: R) -> JsonTokenSource<R> {
        JsonTokenSource {
            documents: Deserializer::from_reader(reader).into_iter(),
            pending: None,
            frames: Vec::new(),
        }
    }

    /// Take the value at the current position, starting the next document
    /// when nothing is open.
    fn next_value(&mut self) -> Result<Value> {
        if let Some(value) = self.pending.take() {
            return Ok(value);
        }
        if let Some(frame) = self.frames.last() {
            let found = match frame {
                Frame::Object(_) => "object",
                Frame::Array(_) => "array",
            };
            return Err(Error::UnexpectedToken {
                expected: "value",
                found,
            });
        }

        match self.documents.next() {
            Some(value) => {
                tracing::trace!(offset = self.documents.byte_offset(), "document parsed");
                Ok(value?)
            }
            None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no more JSON documents").into()),
        }
    }

    /// Whether the next structural read opens a new value rather than
    /// advancing the innermost open one.
    #[inline]
    fn at_value(&self) -> bool {
        self.pending.is_some() || self.frames.is_empty()
    }
}

impl<R: Read> TokenSource for JsonTokenSource<R> {
    fn read_i64(&mut self) -> Result<i64> {
        match self.next_value()? {
            Value::Number(n) => n.as_i64().ok_or(Error::UnexpectedToken {
                expected: "integer",
                found: "number",
            }),
            other => Err(unexpected("integer", &other)),
        }
    }

    fn read_f64(&mut self) -> Result<f64> {
        match self.next_value()? {
            Value::Number(n) => n.as_f64().ok_or(Error::UnexpectedToken {
                expected: "float",
                found: "number",
            }),
            other => Err(unexpected("float", &other)),
        }
    }

    fn read_string(&mut self) -> Result<String> {
        match self.next_value()? {
            Value::String(s) => Ok(s),
            other => Err(unexpected("string", &other)),
        }
    }

    fn read_object_field(&mut self) -> Result<Option<String>> {
        if self.at_value() {
            match self.next_value()? {
                Value::Object(fields) => self.frames.push(Frame::Object(fields.into_iter())),
                Value::Null => return Ok(None),
                other => return Err(unexpected("object", &other)),
            }
        }

        let fields = match self.frames.last_mut() {
            Some(Frame::Object(fields)) => fields,
            _ => {
                return Err(Error::UnexpectedToken {
                    expected: "object",
                    found: "array",
                })
            }
        };
        match fields.next() {
            Some((name, value)) => {
                self.pending = Some(value);
                Ok(Some(name))
            }
            None => {
                self.frames.pop();
                Ok(None)
            }
        }
    }

    fn read_array_next(&mut self) -> Result<bool> {
        if self.at_value() {
            match self.next_value()? {
                Value::Array(items) => self.frames.push(Frame::Array(items.into_iter())),
                Value::Null => return Ok(false),
                other => return Err(unexpected("array", &other)),
            }
        }

        let items = match self.frames.last_mut() {
            Some(Frame::Array(items)) => items,
            _ => {
                return Err(Error::UnexpectedToken {
                    expected: "array",
                    found: "object",
                })
            }
        };
        match items.next() {
            Some(value) => {
                self.pending = Some(value);
                Ok(true)
            }
            None => {
                self.frames.pop();
                Ok(false)
            }
        }
    }
}
