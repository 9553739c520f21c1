use rusqlite::types::ValueRef;

use crate::error::Result;
use crate::kind::resolve;
use crate::reflect::{Reflect, Slot};
use crate::scanner::{NullScanner, Scan};

/// What a destination turns into before a row is scanned.
pub enum Target<'a> {
    /// A supported destination, scanned with `NULL` handling.
    Wrapped(NullScanner<'a>),
    /// No destination: the column is read and dropped.
    Discard,
    /// A destination the scanner does not support, left to the engine's own
    /// decoding (which may succeed or fail on its own terms).
    PassThrough(&'a mut dyn Slot),
}

impl<'a> Target<'a> {
    /// Wraps one destination. Never fails: unsupported destinations pass
    /// through and `None` discards the column.
    pub fn new(dest: Option<&'a mut dyn Slot>) -> Self {
        let Some(dest) = dest else {
            return Target::Discard;
        };

        let resolved = resolve(&*dest);
        match resolved {
            Ok(_) => Target::Wrapped(NullScanner::new(dest)),
            Err(err) => {
                log::debug!("passing scan destination through unchanged: {err}");
                Target::PassThrough(dest)
            }
        }
    }

    pub fn is_wrapped(&self) -> bool {
        matches!(self, Target::Wrapped(_))
    }

    pub fn is_discard(&self) -> bool {
        matches!(self, Target::Discard)
    }

    pub fn is_pass_through(&self) -> bool {
        matches!(self, Target::PassThrough(_))
    }
}

impl<'a, T: Reflect> From<&'a mut T> for Target<'a> {
    fn from(dest: &'a mut T) -> Self {
        let dest: &'a mut dyn Slot = dest;
        Target::new(Some(dest))
    }
}

impl std::fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Wrapped(scanner) => f.debug_tuple("Wrapped").field(scanner).finish(),
            Target::Discard => f.write_str("Discard"),
            Target::PassThrough(dest) => f.debug_tuple("PassThrough").field(&dest.type_name()).finish(),
        }
    }
}

impl Scan for Target<'_> {
    fn scan(&mut self, raw: ValueRef<'_>) -> Result<()> {
        match self {
            Target::Wrapped(scanner) => scanner.scan(raw),
            Target::Discard => Ok(()),
            Target::PassThrough(dest) => dest.scan_raw(raw),
        }
    }
}

/// Wraps a list of destinations positionally, one [`Target`] per entry.
pub fn targets<'a, I>(dests: I) -> Vec<Target<'a>>
where
    I: IntoIterator<Item = Option<&'a mut dyn Slot>>,
{
    dests.into_iter().map(Target::new).collect()
}
