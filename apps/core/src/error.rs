use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents errors originating from the persistence gateway, typically from `sqlx`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A user profile, report or bot user that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Represents data validation errors (e.g., out-of-range health metrics).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Database(e) => AppError::Database(sqlx::Error::Protocol(e.to_string())),
            AppError::NotFound(s) => AppError::NotFound(s.clone()),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Internal(s) => AppError::Internal(s.clone()),
        }
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Database(sqlx::Error::Migrate(Box::new(err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_preserves_message() {
        let err = AppError::NotFound("user 42".to_string());
        assert_eq!(err.clone().to_string(), "Not found: user 42");

        let db = AppError::Database(sqlx::Error::RowNotFound);
        assert!(db.clone().to_string().starts_with("Database error:"));

        for err in [
            AppError::Validation("age".to_string()),
            AppError::Config("BASE_LANGUAGE".to_string()),
            AppError::Internal("corrupt".to_string()),
        ] {
            assert_eq!(err.clone().to_string(), err.to_string());
        }
    }

    #[test]
    fn test_migrate_error_is_a_database_error() {
        let err: AppError = sqlx::migrate::MigrateError::VersionMissing(1).into();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_validation_errors_convert() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("age", validator::ValidationError::new("range"));
        let err: AppError = errors.into();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
