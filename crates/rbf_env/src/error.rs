//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid parameters, per-index batch failures, seed derivation overflow, lost workers,
//! IO, and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("environment {index} failed: {source}")]
    Generation {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("seed overflow: base seed {base_seed} + index {index} exceeds u64")]
    SeedOverflow { base_seed: u64, index: usize },

    #[error("worker for environment {index} exited before producing a result")]
    WorkerLost { index: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Batch index this error is attached to, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Error::Generation { index, .. }
            | Error::SeedOverflow { index, .. }
            | Error::WorkerLost { index } => Some(*index),
            _ => None,
        }
    }

    pub(crate) fn at_index(index: usize, source: Error) -> Self {
        match source {
            Error::Generation { .. } | Error::SeedOverflow { .. } | Error::WorkerLost { .. } => {
                source
            }
            other => Error::Generation {
                index,
                source: Box::new(other),
            },
        }
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        matches!(err, Error::Other(_))
            .then_some(())
            .expect("expected Other variant");
    }

    #[test]
    fn from_str_allocates_owned_message() {
        let err: Error = "issue".into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "issue"));
    }

    #[test]
    fn at_index_wraps_cause_once() {
        let err = Error::at_index(3, Error::InvalidParameter("eta must be > 0".into()));
        assert_eq!(err.index(), Some(3));
        assert!(err.to_string().contains("environment 3"));
        assert!(err.to_string().contains("eta must be > 0"));

        let rewrapped = Error::at_index(5, err);
        assert_eq!(rewrapped.index(), Some(3));
    }

    #[test]
    fn seed_overflow_reports_index() {
        let err = Error::SeedOverflow {
            base_seed: u64::MAX,
            index: 1,
        };
        assert_eq!(err.index(), Some(1));
        assert_eq!(Error::Other("x".into()).index(), None);
    }
}
