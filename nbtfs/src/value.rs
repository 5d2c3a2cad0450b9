use serde::Serialize;

use crate::Tag;

/// The map type backing [`Value::Compound`].
///
/// With the `preserve-order` feature this keeps the order keys appeared in
/// the file, otherwise the order is unspecified.
#[cfg(not(feature = "preserve-order"))]
pub type Compound = std::collections::HashMap<String, Value>;

/// The map type backing [`Value::Compound`].
///
/// With the `preserve-order` feature this keeps the order keys appeared in
/// the file, otherwise the order is unspecified.
#[cfg(feature = "preserve-order")]
pub type Compound = indexmap::IndexMap<String, Value>;

/// Value is a complete NBT value. It owns its data. Compounds and Lists are
/// recursively decoded. The name of the root compound is kept alongside the
/// value by [`Document`][`crate::Document`], not in here.
///
/// ```
/// # use nbtfs::{Compound, Tag, Value};
/// let mut player = Compound::new();
/// player.insert("Health".to_owned(), Value::Short(20));
/// player.insert(
///     "Pos".to_owned(),
///     Value::List(Tag::Double, vec![0.5f64.into(), 64f64.into(), 0.5f64.into()]),
/// );
///
/// let player = Value::Compound(player);
/// assert_eq!(player.tag(), Tag::Compound);
/// ```
#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    /// A list and the declared type of its elements. Empty lists still
    /// carry a declared type, which is often [`Tag::End`].
    List(Tag, Vec<Value>),
    Compound(Compound),
    IntArray(Vec<i32>),
}

impl Value {
    /// The wire tag of this value.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::String(_) => Tag::String,
            Value::List(_, _) => Tag::List,
            Value::Compound(_) => Tag::Compound,
            Value::IntArray(_) => Tag::IntArray,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Byte(v) => Some(v as i64),
            Value::Short(v) => Some(v as i64),
            Value::Int(v) => Some(v as i64),
            Value::Long(v) => Some(v),
            Value::Float(v) => Some(v as i64),
            Value::Double(v) => Some(v as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Byte(v) => Some(v as f64),
            Value::Short(v) => Some(v as f64),
            Value::Int(v) => Some(v as f64),
            Value::Long(v) => Some(v as f64),
            Value::Float(v) => Some(v as f64),
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(v) => Some(v),
            _ => None,
        }
    }

    /// The elements of a list, without its declared type.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(_, v) => Some(v),
            _ => None,
        }
    }
}

// ------------- From<T> impls -------------

// There is no From<isize> on purpose, callers pick Int or Long themselves.
macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for Value {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
        impl From<&$type> for Value {
            fn from(val: &$type) -> Self {
                Self::$variant(val.to_owned()$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(u8, Byte, as i8);
from!(i16, Short);
from!(u16, Short, as i16);
from!(i32, Int);
from!(u32, Int, as i32);
from!(i64, Long);
from!(u64, Long, as i64);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(Compound, Compound);

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Self::Byte(i8::from(val))
    }
}

impl From<Vec<i8>> for Value {
    fn from(val: Vec<i8>) -> Self {
        Self::ByteArray(val)
    }
}

impl From<Vec<i32>> for Value {
    fn from(val: Vec<i32>) -> Self {
        Self::IntArray(val)
    }
}
