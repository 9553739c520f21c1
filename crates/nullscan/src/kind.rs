//! Structural classification of scan destinations.
//!
//! A destination is classified by the representation it is built from, never
//! by its declared name: a `named_scalar!` newtype over `bool` resolves exactly
//! like `bool` itself.

use std::any::TypeId;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::{Result, ScanError};
use crate::reflect::Slot;

/// The eight value categories a destination can be scanned as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Byte,
    Int16,
    Int32,
    Int64,
    Text,
    Float,
    Timestamp,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 8] = [
        ScalarKind::Bool,
        ScalarKind::Byte,
        ScalarKind::Int16,
        ScalarKind::Int32,
        ScalarKind::Int64,
        ScalarKind::Text,
        ScalarKind::Float,
        ScalarKind::Timestamp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Byte => "byte",
            ScalarKind::Int16 => "int16",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::Text => "text",
            ScalarKind::Float => "float",
            ScalarKind::Timestamp => "timestamp",
        }
    }

    /// Maps an underlying representation to its scalar kind.
    ///
    /// Returns `None` for pointers, byte strings and every record other than
    /// the timestamp.
    pub fn of(shape: &Shape) -> Option<ScalarKind> {
        let kind = match shape {
            Shape::Bool => ScalarKind::Bool,
            Shape::U8 => ScalarKind::Byte,
            Shape::I8 | Shape::I16 | Shape::U16 => ScalarKind::Int16,
            Shape::I32 | Shape::U32 => ScalarKind::Int32,
            Shape::I64 | Shape::U64 | Shape::Isize | Shape::Usize => ScalarKind::Int64,
            Shape::Text => ScalarKind::Text,
            Shape::F32 | Shape::F64 => ScalarKind::Float,
            Shape::Struct(tag) if tag.is::<DateTime<Utc>>() => ScalarKind::Timestamp,
            Shape::Struct(_) | Shape::Bytes | Shape::Pointer(_) => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of a record type, kept so the timestamp can be told apart from
/// every other record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructTag {
    pub name: &'static str,
    id: TypeId,
}

impl StructTag {
    pub fn of<T: 'static>() -> Self {
        Self {
            name: std::any::type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

/// Underlying representation of a type, as reported by [`crate::Reflect`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Bool,
    U8,
    I8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    Isize,
    Usize,
    Text,
    F32,
    F64,
    /// Opaque byte string (`Vec<u8>`).
    Bytes,
    Struct(StructTag),
    /// One level of indirection: `&mut T` or the nullable `Option<T>`.
    Pointer(Box<Shape>),
}

impl Shape {
    pub fn record<T: 'static>() -> Self {
        Shape::Struct(StructTag::of::<T>())
    }

    pub fn pointer(inner: Shape) -> Self {
        Shape::Pointer(Box::new(inner))
    }

    /// Number of `Pointer` levels above the innermost shape.
    pub fn depth(&self) -> usize {
        match self {
            Shape::Pointer(inner) => 1 + inner.depth(),
            _ => 0,
        }
    }
}

/// Classifies a full destination shape, which must be exactly
/// pointer → pointer → scalar.
pub fn classify(shape: &Shape) -> Option<ScalarKind> {
    match shape {
        Shape::Pointer(outer) => match outer.as_ref() {
            Shape::Pointer(leaf) => ScalarKind::of(leaf),
            _ => None,
        },
        _ => None,
    }
}

/// Resolves the scalar kind a destination is scanned as.
///
/// Pure: repeated calls for the same destination type give the same answer.
pub fn resolve(dest: &dyn Slot) -> Result<ScalarKind> {
    classify(&dest.shape()).ok_or(ScanError::UnsupportedDestination {
        type_name: dest.type_name(),
    })
}
