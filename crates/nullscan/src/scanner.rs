use rusqlite::types::ValueRef;

use crate::error::Result;
use crate::holder::NullHolder;
use crate::kind::{resolve, ScalarKind};
use crate::reflect::Slot;

/// Accepts one raw column value. The row-fetch glue calls this once per
/// column, in column order.
pub trait Scan {
    fn scan(&mut self, raw: ValueRef<'_>) -> Result<()>;
}

/// Scans a nullable column into a plain `&mut Option<T>` destination.
///
/// `NULL` clears the destination. Any other value is parsed with the engine's
/// rule for the destination's scalar kind, converted to the declared type, and
/// replaces whatever the destination held before.
pub struct NullScanner<'a> {
    dest: &'a mut dyn Slot,
}

impl<'a> NullScanner<'a> {
    pub fn new(dest: &'a mut dyn Slot) -> Self {
        Self { dest }
    }

    pub fn kind(&self) -> Result<ScalarKind> {
        resolve(&*self.dest)
    }
}

impl Scan for NullScanner<'_> {
    fn scan(&mut self, raw: ValueRef<'_>) -> Result<()> {
        let kind = resolve(&*self.dest)?;

        let mut holder = NullHolder::new(kind);
        holder.scan(raw)?;

        match holder.into_value() {
            None => self.dest.clear(),
            Some(value) => self.dest.store(value),
        }
    }
}

impl std::fmt::Debug for NullScanner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NullScanner")
            .field("dest", &self.dest.type_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    #[test]
    fn null_clears_a_populated_destination() {
        let mut dest = Some("stale".to_string());
        NullScanner::new(&mut dest)
            .scan(ValueRef::Null)
            .expect("scan null");
        assert_eq!(dest, None);
    }

    #[test]
    fn present_value_replaces_prior_row() {
        let mut dest: Option<i32> = Some(1);
        NullScanner::new(&mut dest)
            .scan(ValueRef::Integer(42))
            .expect("scan int");
        assert_eq!(dest, Some(42));
    }

    #[test]
    fn timestamps_parse_from_text() {
        let mut dest: Option<DateTime<Utc>> = None;
        NullScanner::new(&mut dest)
            .scan(ValueRef::Text(b"2024-03-05 10:11:12+00:00"))
            .expect("scan timestamp");
        assert_eq!(dest, Some(Utc.with_ymd_and_hms(2024, 3, 5, 10, 11, 12).unwrap()));
    }

    #[test]
    fn unsupported_destination_is_detected_before_parsing() {
        let mut dest: Option<Option<bool>> = Some(Some(true));
        let mut scanner = NullScanner::new(&mut dest);
        assert!(scanner.kind().unwrap_err().is_unsupported_destination());
        // A value the bool parser would reject still reports the shape error.
        let err = scanner.scan(ValueRef::Text(b"nope")).unwrap_err();
        assert!(err.is_unsupported_destination());
        assert_eq!(dest, Some(Some(true)));
    }

    #[test]
    fn conversion_error_leaves_destination_untouched() {
        let mut dest: Option<u8> = Some(7);
        let err = NullScanner::new(&mut dest)
            .scan(ValueRef::Integer(-1))
            .unwrap_err();
        assert!(err.is_conversion());
        assert_eq!(dest, Some(7));
    }
}
