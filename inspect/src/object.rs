use crate::{FloatFormat, Inspect, Inspector, RawValue, Traversal};

/// A view of an [`Inspector`] that is valid between `begin_object` and
/// [`end`](ObjectInspector::end), giving named access to fields.
///
/// Fields must be visited in the order they appear on the wire.
#[must_use = "objects must be closed with `end`"]
pub struct ObjectInspector<'a, T> {
    inspector: &'a mut Inspector<T>,
}

macro_rules! field {
    ($(#[$meta:meta])* $name:ident: $ty:ty) => {
        $(#[$meta])*
        pub fn $name(&mut self, name: &str, value: &mut $ty, mandatory: bool, description: &str) {
            if let Some(inspector) = self.property(name, mandatory, description) {
                inspector.$name(value);
            }
        }
    };
}

impl<'a, T: Traversal> ObjectInspector<'a, T> {
    pub(crate) fn new(inspector: &'a mut Inspector<T>) -> ObjectInspector<'a, T> {
        ObjectInspector { inspector }
    }

    #[inline(always)]
    pub fn is_reading(&self) -> bool {
        self.inspector.is_reading()
    }

    pub fn flush(&mut self) {
        self.inspector.flush()
    }

    /// Position the inspector on the field `name`.
    ///
    /// Writing always yields the inspector. Reading yields `None` when the
    /// field is absent, in which case the caller leaves its destination
    /// untouched; the absence is only an error if the field is `mandatory`.
    /// `None` is also returned once the inspector has latched an error.
    pub fn property(
        &mut self,
        name: &str,
        mandatory: bool,
        _description: &str,
    ) -> Option<&mut Inspector<T>> {
        if self.inspector.property(name, mandatory) {
            Some(&mut *self.inspector)
        } else {
            None
        }
    }

    /// Traverse the field `name` with its own [`Inspect`] routine.
    pub fn field<V: Inspect>(
        &mut self,
        name: &str,
        value: &mut V,
        mandatory: bool,
        description: &str,
    ) {
        if let Some(inspector) = self.property(name, mandatory, description) {
            value.inspect(inspector);
        }
    }

    field!(i32: i32);
    field!(i64: i64);
    field!(isize: isize);
    field!(string: String);
    field!(bytes: Vec<u8>);
    field!(byte_string: Vec<u8>);

    pub fn f32(
        &mut self,
        name: &str,
        value: &mut f32,
        format: FloatFormat,
        mandatory: bool,
        description: &str,
    ) {
        if let Some(inspector) = self.property(name, mandatory, description) {
            inspector.f32(value, format);
        }
    }

    pub fn f64(
        &mut self,
        name: &str,
        value: &mut f64,
        format: FloatFormat,
        mandatory: bool,
        description: &str,
    ) {
        if let Some(inspector) = self.property(name, mandatory, description) {
            inspector.f64(value, format);
        }
    }

    pub fn value(
        &mut self,
        name: &str,
        value: &mut dyn RawValue,
        mandatory: bool,
        description: &str,
    ) {
        if let Some(inspector) = self.property(name, mandatory, description) {
            inspector.value(value);
        }
    }

    /// Close the object, returning the underlying inspector.
    pub fn end(self) -> &'a mut Inspector<T> {
        self.inspector.end_object();
        self.inspector
    }
}
