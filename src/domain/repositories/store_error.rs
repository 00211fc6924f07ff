//! Errors surfaced by mapping stores.

use thiserror::Error;

/// Name of the uniqueness constraint guarding `short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "url_mappings_short_code_key";

/// Failure reported by a [`super::MappingRepository`] implementation.
///
/// Stores only classify; deciding whether a conflict means "slug taken" or
/// "retry with another code" is the caller's business.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("unique constraint violation{}", on_constraint(.constraint))]
    Conflict { constraint: Option<String> },

    /// The row addressed by id does not exist (or is no longer a placeholder).
    #[error("mapping {id} not found")]
    RowNotFound { id: i64 },

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    pub fn short_code_conflict() -> Self {
        Self::Conflict {
            constraint: Some(SHORT_CODE_CONSTRAINT.to_string()),
        }
    }

    /// True when the write collided on the short code itself.
    ///
    /// A conflict without a constraint name counts; one on any other
    /// constraint does not.
    pub fn is_short_code_conflict(&self) -> bool {
        match self {
            Self::Conflict { constraint } => constraint
                .as_deref()
                .is_none_or(|name| name == SHORT_CODE_CONSTRAINT),
            _ => false,
        }
    }
}

fn on_constraint(constraint: &Option<String>) -> String {
    constraint
        .as_deref()
        .map(|c| format!(" on {c}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_display_names_constraint() {
        let err = StoreError::short_code_conflict();
        assert!(err.is_short_code_conflict());
        assert_eq!(
            err.to_string(),
            "unique constraint violation on url_mappings_short_code_key"
        );
    }

    #[test]
    fn test_conflict_display_without_constraint() {
        let err = StoreError::Conflict { constraint: None };
        assert!(err.is_short_code_conflict());
        assert_eq!(err.to_string(), "unique constraint violation");
    }

    #[test]
    fn test_row_not_found_is_not_conflict() {
        let err = StoreError::RowNotFound { id: 7 };
        assert!(!err.is_short_code_conflict());
        assert_eq!(err.to_string(), "mapping 7 not found");
    }

    #[test]
    fn test_conflict_on_other_constraint_is_not_short_code_conflict() {
        let err = StoreError::Conflict {
            constraint: Some("url_mappings_pkey".to_string()),
        };
        assert!(!err.is_short_code_conflict());
        assert_eq!(
            err.to_string(),
            "unique constraint violation on url_mappings_pkey"
        );
    }
}
