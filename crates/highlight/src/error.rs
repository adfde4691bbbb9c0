use std::fmt;

/// Why a search string produced no pattern. Neither case is fatal: callers clear
/// highlights and stop.
#[derive(Debug)]
pub enum PatternError {
    /// Blank search text, or no tokens left after splitting.
    Empty,
    /// The escaped search text could not be compiled.
    Malformed(regex::Error),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Empty => f.write_str("nothing to match"),
            PatternError::Malformed(err) => write!(f, "search pattern rejected: {err}"),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatternError::Empty => None,
            PatternError::Malformed(err) => Some(err),
        }
    }
}

impl From<regex::Error> for PatternError {
    fn from(err: regex::Error) -> Self {
        PatternError::Malformed(err)
    }
}
