//! Translation of sqlx errors into store errors.

use crate::domain::repositories::StoreError;

/// Classifies a sqlx error: unique violations become [`StoreError::Conflict`],
/// everything else is a database failure.
pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return StoreError::Conflict {
            constraint: db.constraint().map(str::to_owned),
        };
    }

    StoreError::Database(e)
}
