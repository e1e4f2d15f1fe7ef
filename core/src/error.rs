//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Only failures that abort a whole operation live here. Failures scoped to a
//! single reference are [`SourceError`](crate::plugins::SourceError) values and
//! are collected instead of returned.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Wrapper for YAML (de)serialization errors.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// The bundle entrypoint could not be loaded or is not a document object.
    #[from(ignore)]
    #[display("Invalid entrypoint: {_0}")]
    InvalidEntrypoint(String),

    /// Re-hashing could not find a free unique value within the retry bound.
    #[from(ignore)]
    #[display("Could not generate a unique value for '{seed}' after {attempts} attempts")]
    CollisionDepthExceeded {
        /// The seed whose candidates all collided.
        seed: String,
        /// Number of candidates checked.
        attempts: usize,
    },

    /// A difference list does not fit the document it is applied to.
    #[from(ignore)]
    #[display("Invalid changes: {_0}")]
    InvalidChanges(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        // String must land in General, never in one of the structured variants
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_json_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));
    }

    #[test]
    fn test_collision_display() {
        let app_err = AppError::CollisionDepthExceeded {
            seed: "https://example.com/a.yaml".into(),
            attempts: 100,
        };
        assert_eq!(
            format!("{}", app_err),
            "Could not generate a unique value for 'https://example.com/a.yaml' after 100 attempts"
        );
    }

    #[test]
    fn test_invalid_entrypoint_display() {
        let app_err = AppError::InvalidEntrypoint("not an object".into());
        assert_eq!(format!("{}", app_err), "Invalid entrypoint: not an object");
    }
}
