//! Shell-style splitting of text into fields.
//!
//! [`split()`] and [`split_with`] break a line into fields at runes accepted by
//! a separator predicate, keeping `"..."` and `'...'` spans together and
//! stripping the quotes of fully quoted fields. Backslash escapes are kept
//! verbatim. The [`bootconfig`] module builds on this to normalize
//! `key = "v1", "v2"` lines into `key=v1,v2`.

pub mod bootconfig;
pub mod split;

pub use self::split::{split, split_bytes_with, split_with, ScanPhase, SplitError, SplitQuoted};
