use std::collections::HashMap;

use crate::{
    containers, Error, FloatFormat, Length, ObjectInspector, RawValue, Result, Traversal,
};

/// The one routine a type implements to take part in a traversal.
///
/// The same sequence of inspector calls must be issued whether the
/// inspector is reading or writing.
pub trait Inspect {
    fn inspect<T: Traversal>(&mut self, inspector: &mut Inspector<T>);
}

/// Direction-bound façade over a backend, holding the sticky error latch.
///
/// Every operation first checks the latch. Once an operation fails, the
/// failure is kept and every later operation becomes a no-op returning an
/// empty result, so traversal routines never check errors themselves: the
/// caller inspects [`error`](Inspector::error) or calls
/// [`finish`](Inspector::finish) once the traversal returns.
#[derive(Debug)]
pub struct Inspector<T> {
    traversal: T,
    error: Option<Error>,
}

macro_rules! primitive {
    ($(#[$meta:meta])* $name:ident: $ty:ty) => {
        $(#[$meta])*
        #[inline]
        pub fn $name(&mut self, value: &mut $ty) {
            self.guard(|t| t.$name(value))
        }
    };
}

impl<T: Traversal> Inspector<T> {
    pub fn new(traversal: T) -> Inspector<T> {
        Inspector {
            traversal,
            error: None,
        }
    }

    /// Bind a fresh backend and clear the latch, returning the previous backend.
    pub fn reset(&mut self, traversal: T) -> T {
        self.error = None;
        std::mem::replace(&mut self.traversal, traversal)
    }

    #[inline]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    /// The backend, or the first error latched during the traversal.
    pub fn finish(self) -> Result<T> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.traversal),
        }
    }

    pub fn into_inner(self) -> T {
        self.traversal
    }

    pub fn get_ref(&self) -> &T {
        &self.traversal
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.traversal
    }

    #[inline(always)]
    pub fn is_reading(&self) -> bool {
        self.traversal.is_reading()
    }

    #[inline]
    fn guard<V: Default>(&mut self, op: impl FnOnce(&mut T) -> Result<V>) -> V {
        if self.error.is_some() {
            return V::default();
        }

        match op(&mut self.traversal) {
            Ok(v) => v,
            Err(e) => {
                self.latch(e);
                V::default()
            }
        }
    }

    fn latch(&mut self, error: Error) {
        tracing::debug!(kind = %error.kind(), %error, "inspector latched error");
        self.error = Some(error);
    }

    primitive!(i32: i32);
    primitive!(i64: i64);
    primitive!(
        /// Platform-width integer; 64-bit on 64-bit targets, 32-bit otherwise.
        isize: isize
    );
    primitive!(string: String);
    primitive!(
        /// Raw bytes. Text formats carry them as unpadded URL-safe base64.
        bytes: Vec<u8>
    );
    primitive!(
        /// Bytes known to be printable, carried verbatim by text formats.
        byte_string: Vec<u8>
    );

    #[inline]
    pub fn f32(&mut self, value: &mut f32, format: FloatFormat) {
        self.guard(|t| t.f32(value, format))
    }

    #[inline]
    pub fn f64(&mut self, value: &mut f64, format: FloatFormat) {
        self.guard(|t| t.f64(value, format))
    }

    #[inline]
    pub fn value(&mut self, value: &mut dyn RawValue) {
        self.guard(|t| t.value(value))
    }

    /// Traverse any [`Inspect`] value at the current position.
    #[inline]
    pub fn inspect<V: Inspect>(&mut self, value: &mut V) {
        value.inspect(self)
    }

    pub fn begin_object(&mut self, _name: &str, _description: &str) -> ObjectInspector<'_, T> {
        self.guard(|t| t.begin_object());
        ObjectInspector::new(self)
    }

    /// Advance to the field `name` of the current object.
    ///
    /// Returns false when the field is absent. A missing field only latches
    /// an error when it is `mandatory`.
    pub(crate) fn property(&mut self, name: &str, mandatory: bool) -> bool {
        if self.error.is_some() {
            return false;
        }

        match self.traversal.property(name) {
            Ok(()) => true,
            Err(Error::NoField(_)) if !mandatory => {
                tracing::trace!(name, "optional field absent");
                false
            }
            Err(e) => {
                self.latch(e);
                false
            }
        }
    }

    pub(crate) fn end_object(&mut self) {
        self.guard(|t| t.end_object())
    }

    pub fn read_array(&mut self) -> Length {
        self.guard(|t| t.read_array())
    }

    pub fn write_array(
        &mut self,
        _name: &str,
        _element_name: &str,
        length: usize,
        _description: &str,
    ) {
        self.guard(|t| t.write_array(length))
    }

    /// Whether an indeterminate array has another element, consuming the
    /// separator or terminator.
    pub fn have_next(&mut self) -> bool {
        self.guard(|t| t.have_next())
    }

    pub fn end_array(&mut self) {
        self.guard(|t| t.end_array())
    }

    pub fn read_map(&mut self) -> Length {
        self.guard(|t| t.read_map())
    }

    pub fn write_map(
        &mut self,
        _name: &str,
        _element_name: &str,
        length: usize,
        _description: &str,
    ) {
        self.guard(|t| t.write_map(length))
    }

    /// The next key of a map being read, or `None` once it is exhausted.
    pub fn read_next_key(&mut self) -> Option<String> {
        self.guard(|t| t.read_next_key())
    }

    pub fn write_next_key(&mut self, key: &str) {
        self.guard(|t| t.write_next_key(key))
    }

    pub fn end_map(&mut self) {
        self.guard(|t| t.end_map())
    }

    pub fn flush(&mut self) {
        self.guard(|t| t.flush())
    }
}

macro_rules! inspect_primitive {
    ($($ty:ty => $method:ident),* $(,)?) => {
        $(
            impl Inspect for $ty {
                #[inline]
                fn inspect<T: Traversal>(&mut self, inspector: &mut Inspector<T>) {
                    inspector.$method(self)
                }
            }
        )*
    };
}

inspect_primitive!(i32 => i32, i64 => i64, isize => isize, String => string);

impl Inspect for f32 {
    #[inline]
    fn inspect<T: Traversal>(&mut self, inspector: &mut Inspector<T>) {
        inspector.f32(self, FloatFormat::Shortest)
    }
}

impl Inspect for f64 {
    #[inline]
    fn inspect<T: Traversal>(&mut self, inspector: &mut Inspector<T>) {
        inspector.f64(self, FloatFormat::Shortest)
    }
}

impl<V: Inspect> Inspect for Box<V> {
    fn inspect<T: Traversal>(&mut self, inspector: &mut Inspector<T>) {
        (**self).inspect(inspector)
    }
}

impl<V: Inspect + Default> Inspect for Vec<V> {
    fn inspect<T: Traversal>(&mut self, inspector: &mut Inspector<T>) {
        containers::array(self, inspector, "", "", "")
    }
}

impl<V: Inspect + Default> Inspect for HashMap<String, V> {
    fn inspect<T: Traversal>(&mut self, inspector: &mut Inspector<T>) {
        containers::string_map(self, inspector, "", "", "")
    }
}
