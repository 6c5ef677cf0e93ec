//! Compact, positional binary format.
//!
//! Integers are zigzag varints, floats are their IEEE-754 bit pattern as an
//! unsigned varint, and strings, byte sequences and collection lengths carry
//! a signed varint length prefix. Objects leave nothing on the wire: reader
//! and writer must traverse fields in the same order.

mod reader;
pub mod varint;
mod writer;

use std::io::{Read, Write};

pub use reader::BinaryReader;
pub use writer::BinaryWriter;

use crate::{Inspect, Inspector, Reading, Result, Writing};

/// Default read buffer capacity of a [`BinaryReader`].
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// Default largest array or map length a [`BinaryReader`] accepts.
pub const DEFAULT_COLLECTION_LIMIT: usize = 1 << 24;

pub type BinaryReadInspector<R> = Inspector<Reading<BinaryReader<R>>>;
pub type BinaryWriteInspector<W> = Inspector<Writing<BinaryWriter<W>>>;

pub fn reader<R: Read>(reader: R) -> BinaryReadInspector<R> {
    Inspector::new(Reading::new(BinaryReader::new(reader)))
}

pub fn writer<W: Write>(writer: W) -> BinaryWriteInspector<W> {
    Inspector::new(Writing::new(BinaryWriter::new(writer)))
}

/// Encode `value` into `writer`, returning the writer once flushed.
pub fn to_writer<V: Inspect, W: Write>(value: &mut V, writer: W) -> Result<W> {
    let mut inspector = self::writer(writer);
    value.inspect(&mut inspector);
    inspector.flush();
    Ok(inspector.finish()?.into_inner().into_inner())
}

pub fn to_vec<V: Inspect>(value: &mut V) -> Result<Vec<u8>> {
    to_writer(value, Vec::new())
}

pub fn from_reader<V: Inspect + Default, R: Read>(reader: R) -> Result<V> {
    let mut value = V::default();
    let mut inspector = self::reader(reader);
    value.inspect(&mut inspector);
    inspector.finish()?;
    Ok(value)
}

pub fn from_slice<V: Inspect + Default>(data: &[u8]) -> Result<V> {
    from_reader(data)
}
