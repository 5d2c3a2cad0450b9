//! Forward-only byte cursor used by the codec.
//!
//! [`Reader`] hands out big-endian integers and raw slices from the front of
//! a buffer. There is no seeking: once consumed, bytes are gone. The write
//! side is [`WriteNbt`], available on anything implementing
//! [`Write`][`std::io::Write`].

use std::convert::TryInto;
use std::io::Write;
use std::ops::Range;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{Error, Result};
use crate::Tag;

/// Reads big-endian values from the front of a byte slice.
pub struct Reader<'a> {
    data: &'a [u8],
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Nothing is consumed if the range runs past the end.
    fn consume(&mut self, r: Range<usize>) -> Result<&'a [u8]> {
        if r.end <= self.data.len() {
            let ret = &self.data[r.start..r.end];
            self.data = &self.data[r.end..];
            Ok(ret)
        } else {
            Err(Error::unexpected_eof())
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.consume(0..1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let mut bs = self.consume(0..std::mem::size_of::<u16>())?;
        Ok(bs.read_u16::<BigEndian>()?)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let mut bs = self.consume(0..std::mem::size_of::<u32>())?;
        Ok(bs.read_u32::<BigEndian>()?)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let mut bs = self.consume(0..std::mem::size_of::<u64>())?;
        Ok(bs.read_u64::<BigEndian>()?)
    }

    /// Takes the next `n` bytes as they are.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.consume(0..n)
    }

    pub(crate) fn read_tag(&mut self) -> Result<Tag> {
        let tag = self.read_u8()?;
        Tag::try_from(tag).map_err(|_| Error::invalid_tag(tag))
    }

    /// Reads a 2-byte length then that many bytes of UTF-8.
    pub(crate) fn read_str(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let bs = self.read_bytes(len)?;
        std::str::from_utf8(bs)
            .map(str::to_owned)
            .map_err(|_| Error::nonunicode(bs))
    }

    /// Reads a 4-byte element count, checking that `width` bytes per element
    /// are actually available.
    pub(crate) fn read_len(&mut self, width: usize) -> Result<usize> {
        let len = self.read_u32()? as usize;
        match len.checked_mul(width) {
            Some(size) if size <= self.remaining() => Ok(len),
            _ => Err(Error::unexpected_eof()),
        }
    }
}

/// NBT specific writes on top of byteorder's `WriteBytesExt`.
pub trait WriteNbt: Write {
    fn write_tag(&mut self, tag: Tag) -> Result<()> {
        self.write_u8(tag.into())?;
        Ok(())
    }

    /// Writes a 2-byte byte length followed by the UTF-8 bytes.
    fn write_name(&mut self, name: &str) -> Result<()> {
        let len: u16 = name
            .len()
            .try_into()
            .map_err(|_| Error::too_long("string", name.len()))?;
        self.write_u16::<BigEndian>(len)?;
        self.write_all(name.as_bytes())?;
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        self.write_u32::<BigEndian>(len.try_into().map_err(|_| Error::too_long("array", len))?)?;
        Ok(())
    }
}

impl<T> WriteNbt for T where T: Write {}
