//! Scan nullable SQLite columns into plain `Option<T>` fields.
//!
//! Destinations are ordinary `&mut Option<T>` references where `T` is one of
//! eight scalar kinds (bool, byte, int16, int32, int64, text, float,
//! timestamp) or a caller-declared newtype over one of them. A `NULL` column
//! leaves the destination `None`; any other value is parsed with rusqlite's
//! native rule for the kind and converted into the declared type.
//!
//! ```no_run
//! use nullscan::{named_scalar, query_row_into, Slot};
//! use rusqlite::Connection;
//!
//! struct Username(String);
//! named_scalar!(Username => String);
//!
//! # fn main() -> Result<(), nullscan::ScanError> {
//! let conn = Connection::open_in_memory()?;
//! let mut id: Option<i64> = None;
//! let mut name: Option<Username> = None;
//! let mut phone: Option<String> = None;
//!
//! let mut targets = nullscan::targets([
//!     Some(&mut id as &mut dyn Slot),
//!     Some(&mut name as &mut dyn Slot),
//!     Some(&mut phone as &mut dyn Slot),
//!     None,
//! ]);
//! query_row_into(
//!     &conn,
//!     "SELECT id, username, phone, verified_at FROM users WHERE id = ?1",
//!     [1],
//!     &mut targets,
//! )?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod holder;
mod kind;
mod reflect;
mod row;
mod scanner;
mod target;

pub use crate::error::{Result, ScanError};
pub use crate::holder::{Native, NullHolder};
pub use crate::kind::{classify, resolve, ScalarKind, Shape, StructTag};
pub use crate::reflect::{NamedScalar, Reflect, Slot};
pub use crate::row::{query_row_into, scan_row, RowExt};
pub use crate::scanner::{NullScanner, Scan};
pub use crate::target::{targets, Target};
