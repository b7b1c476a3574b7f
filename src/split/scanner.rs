use super::{ScanPhase, SplitError};

const ESCAPE: char = '\\';

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Cursor-free view over the input. Every scan takes the position to start
/// from and returns the position it stopped at, so the caller owns the cursor.
#[derive(Debug)]
pub(crate) struct Scanner<'a> {
    src: &'a [u8],
    // longest valid UTF-8 prefix of `src`
    text: &'a str,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(src: &'a [u8]) -> Self {
        let text = match std::str::from_utf8(src) {
            Ok(s) => s,
            Err(e) => std::str::from_utf8(&src[..e.valid_up_to()]).unwrap_or_default(),
        };

        Self { src, text }
    }

    pub(crate) fn len(&self) -> usize {
        self.src.len()
    }

    fn prefix(&self, end: usize) -> String {
        String::from_utf8_lossy(&self.src[..end]).into_owned()
    }

    fn decode(&self, phase: ScanPhase, at: usize) -> Result<char, SplitError> {
        match self.text.get(at..).and_then(|s| s.chars().next()) {
            Some(c) => Ok(c),
            None => Err(SplitError::InvalidEncoding {
                phase,
                byte: self.src[at],
                index: at,
                prefix: self.prefix(at),
            }),
        }
    }

    /// Advance over consecutive separators.
    pub(crate) fn skip_separators<F>(&self, from: usize, is_separator: &mut F) -> Result<usize, SplitError>
    where
        F: FnMut(char) -> bool,
    {
        let mut at = from;
        while at < self.len() {
            let c = self.decode(ScanPhase::SkipSeparators, at)?;
            if !is_separator(c) {
                break;
            }
            at += c.len_utf8();
        }

        Ok(at)
    }

    /// Advance to the next separator outside of a quoted span, or to the end
    /// of input. The returned position is *before* the separator.
    pub(crate) fn find_separator<F>(&self, from: usize, is_separator: &mut F) -> Result<usize, SplitError>
    where
        F: FnMut(char) -> bool,
    {
        let mut at = from;
        let mut prev: Option<char> = None;
        while at < self.len() {
            let c = self.decode(ScanPhase::FindSeparator, at)?;
            if is_separator(c) {
                break;
            }

            if is_quote(c) && prev != Some(ESCAPE) {
                let start = at;
                at = self
                    .find_end_quote(start, c)
                    .map_err(|e| SplitError::InQuotedSpan {
                        start,
                        prefix: self.prefix(start),
                        source: Box::new(e),
                    })?;
            } else {
                at += c.len_utf8();
            }
            prev = Some(c);
        }

        Ok(at)
    }

    /// Find the unescaped `quote` closing the one at `open`. Returns the
    /// position just after the closing quote.
    pub(crate) fn find_end_quote(&self, open: usize, quote: char) -> Result<usize, SplitError> {
        let mut at = open + quote.len_utf8();
        let mut prev: Option<char> = None;
        while at < self.len() {
            let c = self.decode(ScanPhase::FindEndQuote, at)?;
            at += c.len_utf8();
            if c == quote && prev != Some(ESCAPE) {
                return Ok(at);
            }
            prev = Some(c);
        }

        Err(SplitError::UnterminatedQuote { quote, index: open })
    }

    /// The field spanning `[start, end)`, without its enclosing quotes if it
    /// begins and ends with the same quote character.
    ///
    /// Both bounds must come from a successful scan, so they lie on character
    /// boundaries inside the valid prefix.
    pub(crate) fn field(&self, start: usize, end: usize) -> &'a str {
        let text = self.text;
        let span = &text[start..end];
        match span.as_bytes() {
            [first @ (b'"' | b'\''), .., last] if first == last => &span[1..span.len() - 1],
            _ => span,
        }
    }
}
