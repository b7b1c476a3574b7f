use std::fmt::Display;

/// The sub-scan that was running when an error occurred.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScanPhase {
    SkipSeparators,
    FindSeparator,
    FindEndQuote,
}

impl Display for ScanPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanPhase::SkipSeparators => write!(f, "skip separators"),
            ScanPhase::FindSeparator => write!(f, "find next separator"),
            ScanPhase::FindEndQuote => write!(f, "find end matching quote"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SplitError {
    #[error("failed to {phase}: invalid Unicode encoding byte {byte:#04x} at index {index} ({prefix:?})")]
    InvalidEncoding {
        phase: ScanPhase,
        byte: u8,
        index: usize,
        prefix: String,
    },
    #[error("no end matching quote ({quote}) found")]
    UnterminatedQuote { quote: char, index: usize },
    #[error("failed to find the matching quote starting at index {start} ({prefix:?})")]
    InQuotedSpan {
        start: usize,
        prefix: String,
        #[source]
        source: Box<SplitError>,
    },
}

impl SplitError {
    /// Innermost error of a wrapped chain.
    pub fn root_cause(&self) -> &SplitError {
        let mut err = self;
        while let SplitError::InQuotedSpan { source, .. } = err {
            err = source;
        }
        err
    }
}
