//! Projection of a [`Value`] tree onto virtual paths.
//!
//! Each child of a compound becomes a segment made of its key followed by a
//! suffix naming its type, for example `Health.int16.txt`. Elements of lists
//! and arrays are named the same way by their index: `0.compound`,
//! `3.int8.txt`. A path is a `/` separated list of segments walked from the
//! root compound.
//!
//! | Tag       | Suffix        |
//! |-----------|---------------|
//! | Byte      | `.int8.txt`   |
//! | Short     | `.int16.txt`  |
//! | Int       | `.int32.txt`  |
//! | Long      | `.int64.txt`  |
//! | Float     | `.float.txt`  |
//! | Double    | `.double.txt` |
//! | String    | `.string.txt` |
//! | ByteArray | `.list_int8`  |
//! | IntArray  | `.list_int32` |
//! | List      | `.list_any`   |
//! | Compound  | `.compound`   |
//!
//! Only one suffix is ever stripped from a segment, so any key survives the
//! trip through [`segment_name`] and [`split_segment`], even one that itself
//! ends in a suffix.

use std::borrow::Cow;

use log::debug;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::{Tag, Value};

const SUFFIXED_TAGS: [Tag; 11] = [
    Tag::Byte,
    Tag::Short,
    Tag::Int,
    Tag::Long,
    Tag::Float,
    Tag::Double,
    Tag::String,
    Tag::ByteArray,
    Tag::IntArray,
    Tag::List,
    Tag::Compound,
];

impl Tag {
    /// The path suffix for values of this tag. End has no values and so no
    /// suffix.
    pub fn suffix(self) -> Option<&'static str> {
        Some(match self {
            Tag::End => return None,
            Tag::Byte => ".int8.txt",
            Tag::Short => ".int16.txt",
            Tag::Int => ".int32.txt",
            Tag::Long => ".int64.txt",
            Tag::Float => ".float.txt",
            Tag::Double => ".double.txt",
            Tag::String => ".string.txt",
            Tag::ByteArray => ".list_int8",
            Tag::IntArray => ".list_int32",
            Tag::List => ".list_any",
            Tag::Compound => ".compound",
        })
    }

    /// Whether values of this tag are shown as directories.
    pub fn is_directory(self) -> bool {
        matches!(
            self,
            Tag::ByteArray | Tag::IntArray | Tag::List | Tag::Compound
        )
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One child in a directory listing.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

impl Entry {
    fn new(key: &str, value: &Value) -> Self {
        Self {
            name: segment_name(key, value),
            kind: kind_of(value),
        }
    }
}

pub fn kind_of(value: &Value) -> EntryKind {
    if value.tag().is_directory() {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

/// The segment naming `value` under `key`.
pub fn segment_name(key: &str, value: &Value) -> String {
    // Values never have the End tag, so there is always a suffix.
    let suffix = value.tag().suffix().unwrap_or_default();
    format!("{}{}", key, suffix)
}

/// Split a segment into its key and the tag its suffix names. Returns `None`
/// if the segment has no known suffix.
pub fn split_segment(segment: &str) -> Option<(&str, Tag)> {
    SUFFIXED_TAGS.iter().find_map(|tag| {
        let key = segment.strip_suffix(tag.suffix()?)?;
        Some((key, *tag))
    })
}

/// The non-empty segments of `path`. `""`, `"/"` and `"//"` all name the
/// root.
pub fn components(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|c| !c.is_empty())
}

/// `path` with redundant slashes removed, e.g. `a//b/` becomes `/a/b`.
pub fn normalise(path: &str) -> String {
    let mut normal = String::with_capacity(path.len() + 1);
    for component in components(path) {
        normal.push('/');
        normal.push_str(component);
    }
    if normal.is_empty() {
        normal.push('/');
    }
    normal
}

/// Walk `path` down from `root`.
///
/// Tree nodes are borrowed. Elements of byte and int arrays are not stored
/// as values so they come back owned.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Result<Cow<'a, Value>> {
    let mut current = Cow::Borrowed(root);

    for component in components(path) {
        let (key, expected) = split_segment(component).ok_or_else(|| Error::not_found(path))?;

        let next = match current {
            Cow::Borrowed(node) => child(node, key),
            // array elements are leaves.
            Cow::Owned(_) => None,
        };

        current = next
            .filter(|next| next.tag() == expected)
            .ok_or_else(|| Error::not_found(path))?;
    }

    Ok(current)
}

fn child<'a>(node: &'a Value, key: &str) -> Option<Cow<'a, Value>> {
    match node {
        Value::Compound(c) => c.get(key).map(Cow::Borrowed),
        Value::List(_, elements) => elements.get(index(key)?).map(Cow::Borrowed),
        Value::ByteArray(bs) => bs.get(index(key)?).map(|b| Cow::Owned(Value::Byte(*b))),
        Value::IntArray(is) => is.get(index(key)?).map(|i| Cow::Owned(Value::Int(*i))),
        _ => None,
    }
}

// Only the canonical form produced by listings, so "01" or "+1" are not
// another name for element 1.
fn index(key: &str) -> Option<usize> {
    let canonical = !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'));

    if canonical {
        key.parse().ok()
    } else {
        None
    }
}

/// The entries of a directory node, or `None` for a leaf.
///
/// Compound entries follow the map's order with the `preserve-order`
/// feature and are sorted by name without it. Keys containing `/` cannot be
/// named by any path, so they are left out.
pub fn children(node: &Value) -> Option<Vec<Entry>> {
    Some(match node {
        Value::Compound(c) => {
            let mut entries: Vec<_> = c
                .iter()
                .filter(|(k, _)| {
                    let addressable = !k.contains('/');
                    if !addressable {
                        debug!("not listing key {:?}", k);
                    }
                    addressable
                })
                .map(|(k, v)| Entry::new(k, v))
                .collect();
            if cfg!(not(feature = "preserve-order")) {
                entries.sort_by(|a, b| a.name.cmp(&b.name));
            }
            entries
        }
        Value::List(_, elements) => elements
            .iter()
            .enumerate()
            .map(|(i, v)| Entry::new(&i.to_string(), v))
            .collect(),
        Value::ByteArray(bs) => indexed(bs.len(), Tag::Byte),
        Value::IntArray(is) => indexed(is.len(), Tag::Int),
        _ => return None,
    })
}

fn indexed(len: usize, tag: Tag) -> Vec<Entry> {
    let suffix = tag.suffix().unwrap_or_default();
    (0..len)
        .map(|i| Entry {
            name: format!("{}{}", i, suffix),
            kind: EntryKind::File,
        })
        .collect()
}

/// The text content of a leaf, or `None` for a directory node.
pub fn render(node: &Value) -> Option<String> {
    Some(match node {
        Value::Byte(v) => v.to_string(),
        Value::Short(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::Long(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Double(v) => v.to_string(),
        Value::String(s) => s.clone(),
        Value::ByteArray(_) | Value::IntArray(_) | Value::List(_, _) | Value::Compound(_) => {
            return None
        }
    })
}
