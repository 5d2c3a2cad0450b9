//! Decoding of binary NBT into [`Value`].
//!
//! Decoding is strict: any structural problem aborts the whole document.
//! Input must already be decompressed, see [`gzip`][`crate::gzip`].
//!
//! ```
//! # use nbtfs::{de::from_bytes, Value};
//! // An empty compound named "hello".
//! let input = [10, 0, 5, b'h', b'e', b'l', b'l', b'o', 0];
//! let (name, value) = from_bytes(&input).unwrap();
//!
//! assert_eq!(name, "hello");
//! assert!(matches!(value, Value::Compound(c) if c.is_empty()));
//! ```

use crate::cursor::Reader;
use crate::error::{Error, Result};
use crate::{Compound, Tag, Value};

/// How many compounds and lists may be nested inside each other.
pub const MAX_DEPTH: usize = 512;

/// Decodes named tags one after the other from a byte slice.
pub struct Decoder<'a> {
    input: Reader<'a>,
}

/// Decode the single named tag at the start of `input`. Usually this is the
/// root compound of a file. Trailing bytes are ignored.
pub fn from_bytes(input: &[u8]) -> Result<(String, Value)> {
    Decoder::new(input)
        .next_named()?
        .ok_or_else(|| Error::bespoke("invalid nbt: no root tag"))
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input: Reader::new(input),
        }
    }

    /// Bytes left after the tags decoded so far.
    pub fn remaining(&self) -> usize {
        self.input.remaining()
    }

    /// Decode the next tag along with its name. Returns `None` when an End
    /// tag is read, which closes the enclosing compound.
    pub fn next_named(&mut self) -> Result<Option<(String, Value)>> {
        self.named()
    }

    fn named(&mut self) -> Result<Option<(String, Value)>> {
        let tag = self.input.read_tag()?;
        if tag == Tag::End {
            return Ok(None);
        }

        let name = self.input.read_str()?;
        let value = self.payload(tag)?;
        Ok(Some((name, value)))
    }

    // Open containers are kept on an explicit stack, not the call stack.
    fn payload(&mut self, tag: Tag) -> Result<Value> {
        let mut open: Vec<Frame> = Vec::new();
        let mut next = Some(tag);
        let mut finished = None;

        loop {
            if let Some(tag) = next.take() {
                match tag {
                    Tag::List | Tag::Compound => {
                        if open.len() >= MAX_DEPTH {
                            return Err(Error::too_deep(MAX_DEPTH));
                        }
                        open.push(self.open(tag)?);
                    }
                    _ => finished = Some(self.scalar(tag)?),
                }
            }

            let top = match open.last_mut() {
                Some(top) => top,
                None => return finished.ok_or_else(|| Error::bespoke("invalid nbt: no value")),
            };

            if let Some(value) = finished.take() {
                top.push(value);
            }

            match top.next_child(&mut self.input)? {
                Some(tag) => next = Some(tag),
                None => finished = open.pop().map(Frame::finish),
            }
        }
    }

    fn open(&mut self, tag: Tag) -> Result<Frame> {
        if tag == Tag::Compound {
            return Ok(Frame::Compound {
                entries: Compound::new(),
                key: String::new(),
            });
        }

        let element_tag = self.input.read_tag()?;
        // every element takes up at least one byte.
        let len = self.input.read_len(1)?;

        if element_tag == Tag::End && len > 0 {
            return Err(Error::invalid_tag(Tag::End.into()));
        }

        Ok(Frame::List {
            tag: element_tag,
            len,
            elements: Vec::with_capacity(len),
        })
    }

    fn scalar(&mut self, tag: Tag) -> Result<Value> {
        Ok(match tag {
            Tag::Byte => Value::Byte(self.input.read_u8()? as i8),
            Tag::Short => Value::Short(self.input.read_u16()? as i16),
            Tag::Int => Value::Int(self.input.read_u32()? as i32),
            Tag::Long => Value::Long(self.input.read_u64()? as i64),
            Tag::Float => Value::Float(f32::from_bits(self.input.read_u32()?)),
            Tag::Double => Value::Double(f64::from_bits(self.input.read_u64()?)),
            Tag::ByteArray => {
                let len = self.input.read_len(1)?;
                let bs = self.input.read_bytes(len)?;
                Value::ByteArray(bs.iter().map(|b| *b as i8).collect())
            }
            Tag::String => Value::String(self.input.read_str()?),
            Tag::IntArray => {
                let len = self.input.read_len(std::mem::size_of::<i32>())?;
                let mut ints = Vec::with_capacity(len);
                for _ in 0..len {
                    ints.push(self.input.read_u32()? as i32);
                }
                Value::IntArray(ints)
            }
            Tag::End | Tag::List | Tag::Compound => return Err(Error::invalid_tag(tag.into())),
        })
    }
}

/// A compound or list still being filled in.
enum Frame {
    /// `key` is the name of the child currently being decoded.
    Compound { entries: Compound, key: String },
    List {
        tag: Tag,
        len: usize,
        elements: Vec<Value>,
    },
}

impl Frame {
    fn push(&mut self, value: Value) {
        match self {
            Frame::Compound { entries, key } => {
                entries.insert(std::mem::take(key), value);
            }
            Frame::List { elements, .. } => elements.push(value),
        }
    }

    /// The tag of the next child, or `None` once the container is complete.
    /// List elements have no tag or name on the wire, so only compounds read
    /// anything here.
    fn next_child(&mut self, input: &mut Reader) -> Result<Option<Tag>> {
        match self {
            Frame::Compound { key, .. } => {
                let tag = input.read_tag()?;
                if tag == Tag::End {
                    return Ok(None);
                }
                *key = input.read_str()?;
                Ok(Some(tag))
            }
            Frame::List { tag, len, elements } => {
                Ok(if elements.len() < *len { Some(*tag) } else { None })
            }
        }
    }

    fn finish(self) -> Value {
        match self {
            Frame::Compound { entries, .. } => Value::Compound(entries),
            Frame::List { tag, elements, .. } => Value::List(tag, elements),
        }
    }
}
