//! Encoding of [`Value`] into binary NBT. Use [`to_bytes`] or
//! [`to_writer`]. Output is uncompressed, see [`gzip`][`crate::gzip`].
//!
//! Values that cannot be represented, such as a list holding elements of
//! different types or a string longer than 65535 bytes, result in an error
//! (not a panic) and nothing sensible should be assumed about what was
//! already written.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::cursor::WriteNbt;
use crate::error::{Error, Result};
use crate::{Tag, Value};

/// Encode `value` as a named tag.
pub fn to_bytes(name: &str, value: &Value) -> Result<Vec<u8>> {
    let mut result = vec![];
    to_writer(&mut result, name, value)?;
    Ok(result)
}

/// Encode `value` as a named tag into `writer`.
pub fn to_writer<W: Write>(mut writer: W, name: &str, value: &Value) -> Result<()> {
    write_named(&mut writer, name, value)
}

fn write_named<W: Write>(writer: &mut W, name: &str, value: &Value) -> Result<()> {
    writer.write_tag(value.tag())?;
    writer.write_name(name)?;
    write_payload(writer, value)
}

fn write_payload<W: Write>(writer: &mut W, value: &Value) -> Result<()> {
    match value {
        Value::Byte(v) => writer.write_i8(*v)?,
        Value::Short(v) => writer.write_i16::<BigEndian>(*v)?,
        Value::Int(v) => writer.write_i32::<BigEndian>(*v)?,
        Value::Long(v) => writer.write_i64::<BigEndian>(*v)?,
        Value::Float(v) => writer.write_u32::<BigEndian>(v.to_bits())?,
        Value::Double(v) => writer.write_u64::<BigEndian>(v.to_bits())?,
        Value::ByteArray(bs) => {
            writer.write_len(bs.len())?;
            for b in bs {
                writer.write_i8(*b)?;
            }
        }
        Value::String(s) => writer.write_name(s)?,
        Value::IntArray(is) => {
            writer.write_len(is.len())?;
            for i in is {
                writer.write_i32::<BigEndian>(*i)?;
            }
        }
        Value::List(element_tag, elements) => {
            // Elements are checked up front so a bad list writes no payload.
            for element in elements {
                if element.tag() != *element_tag {
                    return Err(Error::heterogeneous_list(*element_tag, element.tag()));
                }
            }

            writer.write_tag(*element_tag)?;
            writer.write_len(elements.len())?;
            for element in elements {
                write_payload(writer, element)?;
            }
        }
        Value::Compound(compound) => {
            for (name, child) in compound {
                write_named(writer, name, child)?;
            }
            writer.write_tag(Tag::End)?;
        }
    }

    Ok(())
}
