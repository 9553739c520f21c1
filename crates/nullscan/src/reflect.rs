//! Type introspection and the owner-slot abstraction.
//!
//! [`Reflect`] describes a type's underlying representation and how a value
//! of that type is built, either from the engine's native value for a scalar
//! kind or straight from a raw column. [`Slot`] is the object-safe view of a
//! destination that the scanner writes through.

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, ValueRef};

use crate::error::{Result, ScanError};
use crate::holder::Native;
use crate::kind::{ScalarKind, Shape};

pub trait Reflect: Sized {
    fn shape() -> Shape;

    /// Converts a parsed native value into this type.
    fn from_native(_value: Native) -> Result<Self> {
        Err(ScanError::unsupported::<Self>())
    }

    /// The engine's own decoding of a raw column into this type, used for
    /// destinations the scanner does not wrap.
    fn from_raw(_raw: ValueRef<'_>) -> Result<Self> {
        Err(ScanError::native_unsupported::<Self>())
    }

    /// The empty state, for nullable types.
    fn empty() -> Option<Self> {
        None
    }
}

/// A caller-declared type over one of the scalar representations.
///
/// Classification follows `Repr`, so a named type scans exactly like its
/// representation. See [`named_scalar!`](crate::named_scalar) for tuple newtypes.
pub trait NamedScalar: Sized {
    type Repr: Reflect;

    fn from_repr(repr: Self::Repr) -> Self;
}

impl<T: NamedScalar> Reflect for T {
    fn shape() -> Shape {
        <T::Repr as Reflect>::shape()
    }

    fn from_native(value: Native) -> Result<Self> {
        T::Repr::from_native(value).map(T::from_repr)
    }

    fn from_raw(raw: ValueRef<'_>) -> Result<Self> {
        T::Repr::from_raw(raw).map(T::from_repr)
    }

    fn empty() -> Option<Self> {
        T::Repr::empty().map(T::from_repr)
    }
}

/// Implements [`NamedScalar`] for tuple newtypes: `named_scalar!(Flag => bool)`.
#[macro_export]
macro_rules! named_scalar {
    ($($name:ident => $repr:ty),+ $(,)?) => {$(
        impl $crate::NamedScalar for $name {
            type Repr = $repr;

            fn from_repr(repr: $repr) -> Self {
                $name(repr)
            }
        }
    )+};
}

impl<T: Reflect> Reflect for Option<T> {
    fn shape() -> Shape {
        Shape::pointer(<T as Reflect>::shape())
    }

    fn from_native(value: Native) -> Result<Self> {
        T::from_native(value).map(Some)
    }

    fn from_raw(raw: ValueRef<'_>) -> Result<Self> {
        match raw {
            ValueRef::Null => Ok(None),
            raw => T::from_raw(raw).map(Some),
        }
    }

    fn empty() -> Option<Self> {
        Some(None)
    }
}

fn mismatch(kind: ScalarKind) -> ScanError {
    ScanError::conversion(kind, FromSqlError::InvalidType)
}

fn native_raw<T: FromSql>(kind: ScalarKind, raw: ValueRef<'_>) -> Result<T> {
    T::column_result(raw).map_err(|source| ScanError::conversion(kind, source))
}

fn native_record<T: FromSql>(raw: ValueRef<'_>) -> Result<T> {
    T::column_result(raw).map_err(ScanError::native_decode::<T>)
}

macro_rules! reflect_integer {
    ($($ty:ty => $shape:ident, $kind:ident;)+) => {$(
        impl Reflect for $ty {
            fn shape() -> Shape {
                Shape::$shape
            }

            fn from_native(value: Native) -> Result<Self> {
                let wide = value
                    .as_integer()
                    .ok_or_else(|| mismatch(ScalarKind::$kind))?;
                <$ty>::try_from(wide).map_err(|_| {
                    ScanError::conversion(ScalarKind::$kind, FromSqlError::OutOfRange(wide))
                })
            }

            fn from_raw(raw: ValueRef<'_>) -> Result<Self> {
                native_raw(ScalarKind::$kind, raw)
            }
        }
    )+};
}

reflect_integer! {
    u8 => U8, Byte;
    i8 => I8, Int16;
    i16 => I16, Int16;
    u16 => U16, Int16;
    i32 => I32, Int32;
    u32 => U32, Int32;
    i64 => I64, Int64;
    u64 => U64, Int64;
    isize => Isize, Int64;
    usize => Usize, Int64;
}

impl Reflect for bool {
    fn shape() -> Shape {
        Shape::Bool
    }

    fn from_native(value: Native) -> Result<Self> {
        match value {
            Native::Bool(v) => Ok(v),
            _ => Err(mismatch(ScalarKind::Bool)),
        }
    }

    fn from_raw(raw: ValueRef<'_>) -> Result<Self> {
        native_raw(ScalarKind::Bool, raw)
    }
}

impl Reflect for String {
    fn shape() -> Shape {
        Shape::Text
    }

    fn from_native(value: Native) -> Result<Self> {
        match value {
            Native::Text(v) => Ok(v),
            _ => Err(mismatch(ScalarKind::Text)),
        }
    }

    fn from_raw(raw: ValueRef<'_>) -> Result<Self> {
        native_raw(ScalarKind::Text, raw)
    }
}

impl Reflect for f64 {
    fn shape() -> Shape {
        Shape::F64
    }

    fn from_native(value: Native) -> Result<Self> {
        match value {
            Native::Float(v) => Ok(v),
            _ => Err(mismatch(ScalarKind::Float)),
        }
    }

    fn from_raw(raw: ValueRef<'_>) -> Result<Self> {
        native_raw(ScalarKind::Float, raw)
    }
}

/// Doubles outside `f32` range saturate to infinity rather than failing, the
/// same as any `f64 as f32` cast.
impl Reflect for f32 {
    fn shape() -> Shape {
        Shape::F32
    }

    fn from_native(value: Native) -> Result<Self> {
        match value {
            Native::Float(v) => Ok(v as f32),
            _ => Err(mismatch(ScalarKind::Float)),
        }
    }

    fn from_raw(raw: ValueRef<'_>) -> Result<Self> {
        native_raw::<f64>(ScalarKind::Float, raw).map(|v| v as f32)
    }
}

impl Reflect for DateTime<Utc> {
    fn shape() -> Shape {
        Shape::record::<DateTime<Utc>>()
    }

    fn from_native(value: Native) -> Result<Self> {
        match value {
            Native::Timestamp(v) => Ok(v),
            _ => Err(mismatch(ScalarKind::Timestamp)),
        }
    }

    fn from_raw(raw: ValueRef<'_>) -> Result<Self> {
        native_raw(ScalarKind::Timestamp, raw)
    }
}

// Not a scalar kind, but the engine decodes both natively, so they scan
// through a pass-through target.
impl Reflect for NaiveDateTime {
    fn shape() -> Shape {
        Shape::record::<NaiveDateTime>()
    }

    fn from_raw(raw: ValueRef<'_>) -> Result<Self> {
        native_record(raw)
    }
}

impl Reflect for Vec<u8> {
    fn shape() -> Shape {
        Shape::Bytes
    }

    fn from_raw(raw: ValueRef<'_>) -> Result<Self> {
        native_record(raw)
    }
}

/// Object-safe view of a scan destination `&mut T`.
///
/// Every [`Reflect`] type is a slot; the scanner only ever sees `&mut dyn Slot`.
pub trait Slot {
    /// Shape of the destination reference, one `Pointer` above the target type.
    fn shape(&self) -> Shape;

    fn type_name(&self) -> &'static str;

    /// Resets the destination to its empty state.
    fn clear(&mut self) -> Result<()>;

    /// Replaces the destination with `value` converted to its declared type.
    fn store(&mut self, value: Native) -> Result<()>;

    /// Decodes `raw` with the engine's native handling for the destination.
    fn scan_raw(&mut self, raw: ValueRef<'_>) -> Result<()>;
}

impl<T: Reflect> Slot for T {
    fn shape(&self) -> Shape {
        Shape::pointer(<T as Reflect>::shape())
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<&mut T>()
    }

    fn clear(&mut self) -> Result<()> {
        *self = T::empty().ok_or_else(ScanError::unsupported::<&mut T>)?;
        Ok(())
    }

    fn store(&mut self, value: Native) -> Result<()> {
        *self = T::from_native(value)?;
        Ok(())
    }

    fn scan_raw(&mut self, raw: ValueRef<'_>) -> Result<()> {
        *self = T::from_raw(raw)?;
        Ok(())
    }
}
