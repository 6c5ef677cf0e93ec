//! One traversal routine per type, driving both encoding and decoding.
//!
//! A type implements [`Inspect`] once, issuing the same sequence of
//! [`Inspector`] calls whichever direction the inspector is bound to. The
//! inspector forwards each call to a backend: the compact [`binary`]
//! format, or the streaming text backend with its bundled [`json`]
//! tokenizer. Failures latch inside the inspector, so traversal routines
//! never check errors themselves.

pub mod binary;
pub mod containers;
mod contract;
mod counting;
mod error;
mod inspector;
#[cfg(feature = "json")]
pub mod json;
mod object;
#[cfg(feature = "text")]
pub mod text;
mod traversal;
mod value;

pub use contract::{FloatFormat, Length, Reader, Writer};
pub use error::{Error, ErrorKind, Result, ValueError};
pub use inspector::{Inspect, Inspector};
pub use object::ObjectInspector;
pub use traversal::{Reading, Traversal, Writing};
pub use value::RawValue;
