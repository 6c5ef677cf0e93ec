//! Sequence and map traversal built purely on [`Inspector`] operations.
//!
//! Nothing here knows which format is underneath. Reading handles all three
//! [`Length`] outcomes; writing always announces the exact count. When a
//! read fails partway, a sequence keeps only the elements read in full.
//!
//! Values behind a `Box` traverse like the values themselves, so
//! `HashMap<K, Box<V>>` works with [`map`] and [`string_map`].

use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use crate::{Inspect, Inspector, Length, Traversal};

/// Upper bound on capacity reserved from a declared length before any
/// element has actually been read.
const PREALLOCATE_LIMIT: usize = 4096;

/// How a sequence owns its elements.
pub trait Ownership<V> {
    type Slot;

    fn allocate() -> Self::Slot;

    /// Reset an existing slot for reuse, keeping any allocation it owns.
    fn reuse(slot: &mut Self::Slot);

    fn get(slot: &mut Self::Slot) -> &mut V;
}

/// Elements stored inline: `Vec<V>`.
pub enum ByValue {}

/// Elements stored behind a pointer: `Vec<Box<V>>`.
pub enum Boxed {}

impl<V: Default> Ownership<V> for ByValue {
    type Slot = V;

    #[inline(always)]
    fn allocate() -> V {
        V::default()
    }

    #[inline(always)]
    fn reuse(slot: &mut V) {
        *slot = V::default();
    }

    #[inline(always)]
    fn get(slot: &mut V) -> &mut V {
        slot
    }
}

impl<V: Default> Ownership<V> for Boxed {
    type Slot = Box<V>;

    #[inline(always)]
    fn allocate() -> Box<V> {
        Box::default()
    }

    #[inline(always)]
    fn reuse(slot: &mut Box<V>) {
        **slot = V::default();
    }

    #[inline(always)]
    fn get(slot: &mut Box<V>) -> &mut V {
        slot
    }
}

/// Traverse a homogeneous sequence of inline elements.
pub fn array<V, T>(
    array: &mut Vec<V>,
    inspector: &mut Inspector<T>,
    name: &str,
    element_name: &str,
    description: &str,
) where
    V: Inspect + Default,
    T: Traversal,
{
    sequence::<ByValue, V, T>(array, inspector, name, element_name, description)
}

/// Traverse a homogeneous sequence of boxed elements. The wire form is the
/// same as [`array`].
pub fn array_boxed<V, T>(
    array: &mut Vec<Box<V>>,
    inspector: &mut Inspector<T>,
    name: &str,
    element_name: &str,
    description: &str,
) where
    V: Inspect + Default,
    T: Traversal,
{
    sequence::<Boxed, V, T>(array, inspector, name, element_name, description)
}

pub fn sequence<O, V, T>(
    array: &mut Vec<O::Slot>,
    inspector: &mut Inspector<T>,
    name: &str,
    element_name: &str,
    description: &str,
) where
    O: Ownership<V>,
    V: Inspect,
    T: Traversal,
{
    if inspector.error().is_some() {
        return;
    }

    if !inspector.is_reading() {
        inspector.write_array(name, element_name, array.len(), description);
        for slot in array.iter_mut() {
            O::get(slot).inspect(inspector);
        }
        inspector.end_array();
        return;
    }

    match inspector.read_array() {
        Length::Determinate(length) => {
            array.truncate(length);
            array.reserve(length.min(PREALLOCATE_LIMIT).saturating_sub(array.len()));
            for index in 0..length {
                read_slot::<O, V, T>(array, index, inspector);
                if inspector.error().is_some() {
                    array.truncate(index);
                    return;
                }
            }
        }
        Length::Indeterminate => {
            let mut read = 0;
            loop {
                read_slot::<O, V, T>(array, read, inspector);
                if inspector.error().is_some() {
                    break;
                }
                read += 1;
                if !inspector.have_next() {
                    break;
                }
            }
            array.truncate(read);
            inspector.end_array();
        }
    }
}

#[inline]
fn read_slot<O, V, T>(array: &mut Vec<O::Slot>, index: usize, inspector: &mut Inspector<T>)
where
    O: Ownership<V>,
    V: Inspect,
    T: Traversal,
{
    if index < array.len() {
        O::reuse(&mut array[index]);
    } else {
        array.push(O::allocate());
    }
    O::get(&mut array[index]).inspect(inspector);
}

/// Traverse a map keyed by strings using the format's native map tokens.
pub fn string_map<V, S, T>(
    map: &mut HashMap<String, V, S>,
    inspector: &mut Inspector<T>,
    name: &str,
    element_name: &str,
    description: &str,
) where
    V: Inspect + Default,
    S: BuildHasher,
    T: Traversal,
{
    if inspector.error().is_some() {
        return;
    }

    if !inspector.is_reading() {
        inspector.write_map(name, element_name, map.len(), description);
        for (key, item) in map.iter_mut() {
            inspector.write_next_key(key);
            item.inspect(inspector);
        }
        inspector.end_map();
        return;
    }

    match inspector.read_map() {
        Length::Determinate(length) => {
            map.clear();
            map.reserve(length.min(PREALLOCATE_LIMIT));
            for _ in 0..length {
                let key = match inspector.read_next_key() {
                    Some(key) => key,
                    None => break,
                };
                let mut item = V::default();
                item.inspect(inspector);
                if inspector.error().is_some() {
                    break;
                }
                map.insert(key, item);
            }
        }
        Length::Indeterminate => {
            map.clear();
            while let Some(key) = inspector.read_next_key() {
                let mut item = V::default();
                item.inspect(inspector);
                if inspector.error().is_some() {
                    break;
                }
                map.insert(key, item);
            }
            inspector.end_map();
        }
    }
}

/// Traverse a map with arbitrary keys.
///
/// Keys are not necessarily strings, so the map travels as an array of
/// `{"k": key, "v": value}` objects instead of native map tokens.
pub fn map<K, V, S, T>(
    map: &mut HashMap<K, V, S>,
    inspector: &mut Inspector<T>,
    name: &str,
    _key_name: &str,
    _element_name: &str,
    description: &str,
) where
    K: Inspect + Default + Clone + Eq + Hash,
    V: Inspect + Default,
    S: BuildHasher,
    T: Traversal,
{
    if inspector.error().is_some() {
        return;
    }

    let item_name = format!("{}.item", name);

    if !inspector.is_reading() {
        inspector.write_array(name, &item_name, map.len(), description);
        for (key, item) in map.iter_mut() {
            let mut key = key.clone();
            entry(&mut key, item, inspector, &item_name);
        }
        inspector.end_array();
        return;
    }

    match inspector.read_array() {
        Length::Determinate(length) => {
            map.clear();
            map.reserve(length.min(PREALLOCATE_LIMIT));
            for _ in 0..length {
                if !read_entry(map, inspector, &item_name) {
                    break;
                }
            }
        }
        Length::Indeterminate => {
            map.clear();
            read_entry(map, inspector, &item_name);
            while inspector.have_next() {
                read_entry(map, inspector, &item_name);
            }
            inspector.end_array();
        }
    }
}

fn entry<K, V, T>(key: &mut K, item: &mut V, inspector: &mut Inspector<T>, item_name: &str)
where
    K: Inspect,
    V: Inspect,
    T: Traversal,
{
    let mut object = inspector.begin_object(item_name, "key value pair");
    object.field("k", key, true, "key");
    object.field("v", item, true, "value");
    object.end();
}

fn read_entry<K, V, S, T>(
    map: &mut HashMap<K, V, S>,
    inspector: &mut Inspector<T>,
    item_name: &str,
) -> bool
where
    K: Inspect + Default + Eq + Hash,
    V: Inspect + Default,
    S: BuildHasher,
    T: Traversal,
{
    let mut key = K::default();
    let mut item = V::default();
    entry(&mut key, &mut item, inspector, item_name);
    if inspector.error().is_some() {
        return false;
    }
    map.insert(key, item);
    true
}
