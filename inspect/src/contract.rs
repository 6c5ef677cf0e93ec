//! The vocabulary every wire format speaks.
//!
//! A format supplies a [`Reader`] and a [`Writer`]. Neither is used by
//! application code directly: they are bound into an
//! [`Inspector`](crate::Inspector) through [`Reading`](crate::Reading) or
//! [`Writing`](crate::Writing).

use crate::{RawValue, Result};

/// Element count reported when a reader opens an array or map.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Length {
    /// The exact number of elements is known up front. `Determinate(0)`
    /// means the collection is empty and fully consumed; no `end_*` call
    /// follows it.
    Determinate(usize),

    /// The element count is unknown. The first element is read directly,
    /// then `have_next` (arrays) or `read_next_key` (maps) is polled before
    /// each further element, and `end_array`/`end_map` closes the
    /// collection.
    Indeterminate,
}

impl Length {
    pub const EMPTY: Length = Length::Determinate(0);

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Length::EMPTY
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::EMPTY
    }
}

/// Rendering hint for floats, honoured by text writers only.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum FloatFormat {
    /// The shortest representation that reads back to the same value.
    #[default]
    Shortest,
    /// Fixed notation with the given number of fractional digits.
    Fixed(usize),
    /// Scientific notation with the given number of fractional digits.
    Exponent(usize),
}

impl FloatFormat {
    pub(crate) fn render(self, value: f64) -> String {
        match self {
            FloatFormat::Shortest => format!("{}", value),
            FloatFormat::Fixed(precision) => format!("{:.*}", precision, value),
            FloatFormat::Exponent(precision) => format!("{:.*e}", precision, value),
        }
    }

    pub(crate) fn render_f32(self, value: f32) -> String {
        match self {
            FloatFormat::Shortest => format!("{}", value),
            FloatFormat::Fixed(precision) => format!("{:.*}", precision, value),
            FloatFormat::Exponent(precision) => format!("{:.*e}", precision, value),
        }
    }
}

pub trait Reader {
    fn read_i32(&mut self) -> Result<i32>;
    fn read_i64(&mut self) -> Result<i64>;
    fn read_f32(&mut self) -> Result<f32>;
    fn read_f64(&mut self) -> Result<f64>;
    fn read_string(&mut self) -> Result<String>;
    fn read_bytes(&mut self) -> Result<Vec<u8>>;

    /// Bytes transported verbatim, without the encoding `read_bytes` applies.
    fn read_byte_string(&mut self) -> Result<Vec<u8>>;

    fn read_value(&mut self, value: &mut dyn RawValue) -> Result<()>;

    fn begin_object(&mut self) -> Result<()>;

    /// Advance to the next field, which must be called `name`.
    ///
    /// Returns [`Error::NoField`](crate::Error::NoField) when the object has
    /// no more fields.
    fn property(&mut self, name: &str) -> Result<()>;

    fn end_object(&mut self) -> Result<()>;

    fn begin_array(&mut self) -> Result<Length>;

    /// Only meaningful after `begin_array` returned [`Length::Indeterminate`].
    fn have_next(&mut self) -> Result<bool>;

    fn end_array(&mut self) -> Result<()>;

    fn begin_map(&mut self) -> Result<Length>;

    /// The next key, or `None` once an indeterminate map is exhausted.
    fn next_key(&mut self) -> Result<Option<String>>;

    fn end_map(&mut self) -> Result<()>;
}

pub trait Writer {
    fn write_i32(&mut self, value: i32) -> Result<()>;
    fn write_i64(&mut self, value: i64) -> Result<()>;
    fn write_f32(&mut self, value: f32, format: FloatFormat) -> Result<()>;
    fn write_f64(&mut self, value: f64, format: FloatFormat) -> Result<()>;
    fn write_string(&mut self, value: &str) -> Result<()>;
    fn write_bytes(&mut self, value: &[u8]) -> Result<()>;
    fn write_byte_string(&mut self, value: &[u8]) -> Result<()>;
    fn write_value(&mut self, value: &dyn RawValue) -> Result<()>;

    fn begin_object(&mut self) -> Result<()>;
    fn property(&mut self, name: &str) -> Result<()>;
    fn end_object(&mut self) -> Result<()>;

    fn begin_array(&mut self, length: usize) -> Result<()>;
    fn end_array(&mut self) -> Result<()>;

    fn begin_map(&mut self, length: usize) -> Result<()>;
    fn next_key(&mut self, key: &str) -> Result<()>;
    fn end_map(&mut self) -> Result<()>;

    fn flush(&mut self) -> Result<()>;
}
