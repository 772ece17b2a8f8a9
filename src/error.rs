use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The bus device failed to open, configure, write or transfer.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Probing saw no divergence within its capacity, so the number of
    /// pixels is unknown rather than zero.
    #[error("could not count pixels (no echo divergence within {capacity} pixels)")]
    CountIndeterminate { capacity: usize },
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    /// Underlying OS error code, if any.
    pub fn code(&self) -> Option<i32> {
        match self {
            Error::Io { source, .. } => source.raw_os_error(),
            Error::CountIndeterminate { .. } => None,
        }
    }

    pub fn is_count_indeterminate(&self) -> bool {
        matches!(self, Error::CountIndeterminate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_keeps_os_code() {
        let err = Error::io("writing frame", io::Error::from_raw_os_error(5));
        assert_eq!(err.code(), Some(5));
        assert!(!err.is_count_indeterminate());
        assert!(err.to_string().starts_with("writing frame: "));
    }

    #[test]
    fn test_count_indeterminate() {
        let err = Error::CountIndeterminate { capacity: 100 };
        assert_eq!(err.code(), None);
        assert!(err.is_count_indeterminate());
        assert!(err.to_string().contains("100"));
    }
}
