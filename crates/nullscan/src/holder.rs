use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, ValueRef};

use crate::error::{Result, ScanError};
use crate::kind::ScalarKind;

/// A present column value in the engine's native representation for its kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Native {
    Bool(bool),
    Byte(u8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Text(String),
    Float(f64),
    Timestamp(DateTime<Utc>),
}

impl Native {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Native::Bool(_) => ScalarKind::Bool,
            Native::Byte(_) => ScalarKind::Byte,
            Native::Int16(_) => ScalarKind::Int16,
            Native::Int32(_) => ScalarKind::Int32,
            Native::Int64(_) => ScalarKind::Int64,
            Native::Text(_) => ScalarKind::Text,
            Native::Float(_) => ScalarKind::Float,
            Native::Timestamp(_) => ScalarKind::Timestamp,
        }
    }

    /// Widens any integer kind to `i64`.
    pub(crate) fn as_integer(&self) -> Option<i64> {
        match *self {
            Native::Byte(v) => Some(i64::from(v)),
            Native::Int16(v) => Some(i64::from(v)),
            Native::Int32(v) => Some(i64::from(v)),
            Native::Int64(v) => Some(v),
            _ => None,
        }
    }
}

/// The engine's two-state holder for one scalar kind: absent, or present with
/// a native value.
///
/// Parsing is delegated to rusqlite's `FromSql` for `Option<T>`, so `NULL`
/// becomes absent and anything else goes through the native rule for `T`.
#[derive(Clone, Debug, PartialEq)]
pub enum NullHolder {
    Bool(Option<bool>),
    Byte(Option<u8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Text(Option<String>),
    Float(Option<f64>),
    Timestamp(Option<DateTime<Utc>>),
}

impl NullHolder {
    /// An absent holder for `kind`.
    pub fn new(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Bool => NullHolder::Bool(None),
            ScalarKind::Byte => NullHolder::Byte(None),
            ScalarKind::Int16 => NullHolder::Int16(None),
            ScalarKind::Int32 => NullHolder::Int32(None),
            ScalarKind::Int64 => NullHolder::Int64(None),
            ScalarKind::Text => NullHolder::Text(None),
            ScalarKind::Float => NullHolder::Float(None),
            ScalarKind::Timestamp => NullHolder::Timestamp(None),
        }
    }

    pub fn kind(&self) -> ScalarKind {
        match self {
            NullHolder::Bool(_) => ScalarKind::Bool,
            NullHolder::Byte(_) => ScalarKind::Byte,
            NullHolder::Int16(_) => ScalarKind::Int16,
            NullHolder::Int32(_) => ScalarKind::Int32,
            NullHolder::Int64(_) => ScalarKind::Int64,
            NullHolder::Text(_) => ScalarKind::Text,
            NullHolder::Float(_) => ScalarKind::Float,
            NullHolder::Timestamp(_) => ScalarKind::Timestamp,
        }
    }

    /// Parses `raw` with the native rule for this holder's kind. On error the
    /// holder keeps its previous state.
    pub fn scan(&mut self, raw: ValueRef<'_>) -> Result<()> {
        let kind = self.kind();
        match self {
            NullHolder::Bool(slot) => *slot = parse(kind, raw)?,
            NullHolder::Byte(slot) => *slot = parse(kind, raw)?,
            NullHolder::Int16(slot) => *slot = parse(kind, raw)?,
            NullHolder::Int32(slot) => *slot = parse(kind, raw)?,
            NullHolder::Int64(slot) => *slot = parse(kind, raw)?,
            NullHolder::Text(slot) => *slot = parse(kind, raw)?,
            NullHolder::Float(slot) => *slot = parse(kind, raw)?,
            NullHolder::Timestamp(slot) => *slot = parse(kind, raw)?,
        }
        Ok(())
    }

    pub fn is_absent(&self) -> bool {
        match self {
            NullHolder::Bool(v) => v.is_none(),
            NullHolder::Byte(v) => v.is_none(),
            NullHolder::Int16(v) => v.is_none(),
            NullHolder::Int32(v) => v.is_none(),
            NullHolder::Int64(v) => v.is_none(),
            NullHolder::Text(v) => v.is_none(),
            NullHolder::Float(v) => v.is_none(),
            NullHolder::Timestamp(v) => v.is_none(),
        }
    }

    /// `None` when absent, otherwise the native value.
    pub fn into_value(self) -> Option<Native> {
        match self {
            NullHolder::Bool(v) => v.map(Native::Bool),
            NullHolder::Byte(v) => v.map(Native::Byte),
            NullHolder::Int16(v) => v.map(Native::Int16),
            NullHolder::Int32(v) => v.map(Native::Int32),
            NullHolder::Int64(v) => v.map(Native::Int64),
            NullHolder::Text(v) => v.map(Native::Text),
            NullHolder::Float(v) => v.map(Native::Float),
            NullHolder::Timestamp(v) => v.map(Native::Timestamp),
        }
    }
}

fn parse<T: FromSql>(kind: ScalarKind, raw: ValueRef<'_>) -> Result<Option<T>> {
    Option::<T>::column_result(raw).map_err(|source| ScanError::conversion(kind, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::types::FromSqlError;

    #[test]
    fn null_is_absent_for_every_kind() {
        for kind in ScalarKind::ALL {
            let mut holder = NullHolder::new(kind);
            holder.scan(ValueRef::Null).expect("scan null");
            assert!(holder.is_absent(), "{kind}");
            assert_eq!(holder.kind(), kind);
            assert_eq!(holder.into_value(), None);
        }
    }

    #[test]
    fn integers_parse_natively() {
        let mut holder = NullHolder::new(ScalarKind::Byte);
        holder.scan(ValueRef::Integer(99)).expect("scan byte");
        assert_eq!(holder.into_value(), Some(Native::Byte(99)));

        let mut holder = NullHolder::new(ScalarKind::Float);
        holder.scan(ValueRef::Integer(3)).expect("scan float from integer");
        assert_eq!(holder.into_value(), Some(Native::Float(3.0)));
    }

    #[test]
    fn out_of_range_byte_is_a_conversion_error() {
        let mut holder = NullHolder::new(ScalarKind::Byte);
        let err = holder.scan(ValueRef::Integer(300)).unwrap_err();
        assert!(matches!(
            err,
            ScanError::Conversion {
                kind: ScalarKind::Byte,
                source: FromSqlError::OutOfRange(300)
            }
        ));
        assert!(holder.is_absent());
    }

    #[test]
    fn text_into_integer_holder_is_rejected() {
        let mut holder = NullHolder::new(ScalarKind::Int64);
        holder.scan(ValueRef::Integer(7)).expect("scan int");
        let err = holder.scan(ValueRef::Text(b"seven")).unwrap_err();
        assert!(err.is_conversion());
        assert_eq!(holder, NullHolder::Int64(Some(7)));
    }
}
