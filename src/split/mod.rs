//! Quote-aware splitting of a line into fields.
//!
//! Fields are separated by runs of runes accepted by a separator predicate.
//! A `"` or `'` that is not preceded by a backslash opens a quoted span that
//! lasts until the next unescaped occurrence of the same quote character;
//! separators inside such a span don't end the field. A field that starts
//! and ends with the same quote character is returned without them. No
//! un-escaping is done, so `\"` stays `\"` in the output.
//!
//! ```
//! let fields = shell_split::split(r#"test me "here and there" ok"#).unwrap();
//! assert_eq!(fields, ["test", "me", "here and there", "ok"]);
//! ```
mod error;
mod scanner;

pub use self::error::*;

use self::scanner::Scanner;

use log::trace;

/// Lazily yields the fields of its input, one per call to `next()`.
///
/// After an error has been yielded the iterator is exhausted.
pub struct SplitQuoted<'a, F> {
    scanner: Scanner<'a>,
    pos: usize,
    is_separator: F,
}

impl<'a, F> SplitQuoted<'a, F>
where
    F: FnMut(char) -> bool,
{
    pub fn new(src: &'a str, is_separator: F) -> Self {
        Self::from_bytes(src.as_bytes(), is_separator)
    }

    pub fn from_bytes(src: &'a [u8], is_separator: F) -> Self {
        Self {
            scanner: Scanner::new(src),
            pos: 0,
            is_separator,
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.scanner.len()
    }

    fn next_field(&mut self) -> Option<Result<&'a str, SplitError>> {
        while !self.eof() {
            let span = self
                .scanner
                .skip_separators(self.pos, &mut self.is_separator)
                .and_then(|start| {
                    self.scanner
                        .find_separator(start, &mut self.is_separator)
                        .map(|end| (start, end))
                });

            match span {
                Ok((start, end)) => {
                    self.pos = end;
                    if start < end {
                        return Some(Ok(self.scanner.field(start, end)));
                    }
                }
                Err(e) => {
                    self.pos = self.scanner.len();
                    return Some(Err(e));
                }
            }
        }

        None
    }
}

impl<'a, F> Iterator for SplitQuoted<'a, F>
where
    F: FnMut(char) -> bool,
{
    type Item = Result<&'a str, SplitError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_field()
    }
}

/// Split `src` at whitespace.
pub fn split(src: &str) -> Result<Vec<&str>, SplitError> {
    split_with(src, char::is_whitespace)
}

/// Split `src` at every rune for which `is_separator` returns `true`.
pub fn split_with<F>(src: &str, is_separator: F) -> Result<Vec<&str>, SplitError>
where
    F: FnMut(char) -> bool,
{
    split_bytes_with(src.as_bytes(), is_separator)
}

/// Like [`split_with`], but for input that may not be valid UTF-8.
///
/// Fails with [`SplitError::InvalidEncoding`] as soon as the scan reaches a
/// malformed byte sequence; no fields are returned in that case.
pub fn split_bytes_with<F>(src: &[u8], is_separator: F) -> Result<Vec<&str>, SplitError>
where
    F: FnMut(char) -> bool,
{
    let fields = SplitQuoted::from_bytes(src, is_separator).collect::<Result<Vec<_>, _>>()?;
    trace!("split {} bytes into {} fields", src.len(), fields.len());

    Ok(fields)
}
