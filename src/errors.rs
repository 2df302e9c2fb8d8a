use std::error::Error as StdError;
use std::fmt;

// type alias for Result for use across the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Path data broke the grammar at the given character offset.
    Grammar { pos: usize, reason: String },
    /// Syntactically valid path data which can't form a path,
    /// e.g. not starting with a moveto.
    Structure(String),
}

impl Error {
    pub(crate) fn grammar(pos: usize, reason: impl Into<String>) -> Self {
        Error::Grammar {
            pos,
            reason: reason.into(),
        }
    }

    /// Character offset of the offending input, where known.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Grammar { pos, .. } => Some(*pos),
            Error::Structure(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Grammar { pos, reason } => write!(f, "{} (at pos {})", reason, pos),
            Error::Structure(reason) => write!(f, "{}", reason),
        }
    }
}

impl StdError for Error {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::grammar(7, "bad command 'x'");
        assert_eq!(err.to_string(), "bad command 'x' (at pos 7)");
        assert_eq!(err.position(), Some(7));

        let err = Error::Structure("path should start with `M` or `m`".to_string());
        assert_eq!(err.to_string(), "path should start with `M` or `m`");
        assert_eq!(err.position(), None);
    }
}
