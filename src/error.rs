use std::path::PathBuf;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Failed to read users from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Source {0} has no user_id column")]
    MissingColumn(PathBuf),

    #[error("User {0} is not authenticated")]
    Unauthenticated(String),

    #[error("Failed to read preferences: {0}")]
    Input(#[source] std::io::Error),

    #[error("Failed to save user data to {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl AppError {
    /// True when the user is registered in memory but the durable write failed
    pub fn is_persistence(&self) -> bool {
        matches!(self, AppError::Persistence { .. })
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_input_error_keeps_io_source() {
        let err = AppError::Input(io::Error::new(io::ErrorKind::UnexpectedEof, "closed"));
        assert_eq!(err.to_string(), "Failed to read preferences: closed");
        assert!(err.source().is_some());
        assert!(!err.is_persistence());
    }

    #[test]
    fn test_persistence_error_is_flagged() {
        let err = AppError::Persistence {
            path: PathBuf::from("out.csv"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied").into(),
        };
        assert!(err.is_persistence());
        assert!(err.to_string().starts_with("Failed to save user data to out.csv"));
    }
}
