//! nbtfs reads and writes NBT data from *Minecraft: Java Edition* and lets
//! you browse the decoded tree as if it were a directory hierarchy.
//!
//! * For the in-memory tree see [`Value`].
//! * For the binary codec see [`de`] and [`ser`].
//! * For the path view see [`path`] and [`Document`].
//!
//! # Virtual paths
//!
//! Every child of a compound or list becomes one path segment made of its
//! key (or list index) and a suffix naming its type, so a player file shows
//! up as
//!
//! ```text
//! /Name.string.txt
//! /Health.int16.txt
//! /Inventory.list_any/0.compound/id.int32.txt
//! ```
//!
//! Compounds, lists and arrays are directories, everything else is a
//! readable text leaf.
//!
//! # Quick example
//!
//!```no_run
//! use nbtfs::{error::Result, Document};
//!
//! fn main() -> Result<()> {
//!     // level.dat files are gzip compressed, this is detected automatically.
//!     let doc = Document::load("level.dat")?;
//!
//!     for entry in doc.list_children("/Data.compound")? {
//!         println!("{}", entry.name);
//!     }
//!
//!     println!("{}", doc.read_leaf("/Data.compound/LevelName.string.txt")?);
//!     Ok(())
//! }
//! ```

use serde::Serialize;

pub mod cache;
pub mod cursor;
pub mod de;
pub mod error;
pub mod gzip;
pub mod path;
pub mod ser;

mod document;
mod value;

pub use document::*;
pub use value::*;

#[cfg(test)]
mod test;

use std::convert::TryFrom;

/// An NBT tag. This does not carry the value or the name of the data.
#[derive(Serialize, Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a UTF-8 string.
    String = 8,
    /// Represents a list of other objects, all of the same declared type.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
}

// Written out by hand, the tags will very rarely change.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::End => 0,
            Tag::Byte => 1,
            Tag::Short => 2,
            Tag::Int => 3,
            Tag::Long => 4,
            Tag::Float => 5,
            Tag::Double => 6,
            Tag::ByteArray => 7,
            Tag::String => 8,
            Tag::List => 9,
            Tag::Compound => 10,
            Tag::IntArray => 11,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
