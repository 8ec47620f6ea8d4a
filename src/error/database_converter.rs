use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting diesel errors to AppError variants.
///
/// Only the "no row" signal becomes `NotFound`; every other failure is kept
/// as a `Database` error carrying the store's own message.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::NotFound => AppError::not_found("resource", "id", "unknown"),
            DieselError::DatabaseError(kind, info) => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!(
                    "{}: {}",
                    Self::describe_kind(&kind),
                    info.message()
                )),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn describe_kind(kind: &DatabaseErrorKind) -> &'static str {
        match kind {
            DatabaseErrorKind::UniqueViolation => "Unique constraint violation",
            DatabaseErrorKind::NotNullViolation => "Not null constraint violation",
            DatabaseErrorKind::ForeignKeyViolation => "Foreign key constraint violation",
            DatabaseErrorKind::CheckViolation => "Check constraint violation",
            DatabaseErrorKind::ClosedConnection => "Connection closed",
            _ => "Database error",
        }
    }
}
