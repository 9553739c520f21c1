use rusqlite::types::FromSqlError;
use thiserror::Error;

use crate::kind::ScalarKind;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The destination is not `&mut Option<T>` over one of the eight scalar kinds.
    #[error("unsupported scan destination: {type_name}")]
    UnsupportedDestination { type_name: &'static str },
    /// The engine's parse rule for `kind` rejected the column value, or the
    /// parsed value does not fit the destination's declared type.
    #[error("cannot convert column value to {kind}: {source}")]
    Conversion {
        kind: ScalarKind,
        #[source]
        source: FromSqlError,
    },
    /// A passed-through destination has no native decoding in the engine.
    #[error("unsupported scan, cannot store column value into {type_name}")]
    NativeUnsupported { type_name: &'static str },
    /// The engine's native decoding for a passed-through destination rejected
    /// the column value.
    #[error("cannot decode column value into {type_name}: {source}")]
    NativeDecode {
        type_name: &'static str,
        #[source]
        source: FromSqlError,
    },
    #[error("expected {expected} destination arguments in scan, not {actual}")]
    TargetCount { expected: usize, actual: usize },
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl ScanError {
    pub(crate) fn unsupported<T: ?Sized>() -> Self {
        Self::UnsupportedDestination {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub(crate) fn native_unsupported<T: ?Sized>() -> Self {
        Self::NativeUnsupported {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub(crate) fn native_decode<T: ?Sized>(source: FromSqlError) -> Self {
        Self::NativeDecode {
            type_name: std::any::type_name::<T>(),
            source,
        }
    }

    pub(crate) fn conversion(kind: ScalarKind, source: FromSqlError) -> Self {
        Self::Conversion { kind, source }
    }

    pub fn is_unsupported_destination(&self) -> bool {
        matches!(self, Self::UnsupportedDestination { .. })
    }

    pub fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
