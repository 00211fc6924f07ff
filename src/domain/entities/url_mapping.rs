//! URL mapping entity: a short code and the URL it redirects to.

use chrono::{DateTime, Utc};

/// A persisted short code → original URL association.
///
/// Every field except `clicks` is fixed at creation. `clicks` only ever grows,
/// one step per successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        expires_at: Option<DateTime<Utc>>,
        clicks: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            expires_at,
            clicks,
            created_at,
        }
    }

    /// Returns true if `now` is strictly past the expiry time.
    ///
    /// A mapping whose expiry equals `now` is still live.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }
}

/// Input data for creating a mapping.
///
/// `short_code: None` creates a placeholder row that receives its code in a
/// second step (sequential codes depend on the store-assigned id).
#[derive(Debug, Clone)]
pub struct NewMapping {
    pub original_url: String,
    pub short_code: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl NewMapping {
    /// Same mapping, carrying `short_code`.
    pub fn with_code(&self, short_code: impl Into<String>) -> Self {
        Self {
            short_code: Some(short_code.into()),
            ..self.clone()
        }
    }

    /// Builds the entity a fresh insert produced: zero clicks, the given id and code.
    pub fn into_mapping(self, id: i64, short_code: String) -> UrlMapping {
        UrlMapping::new(
            id,
            self.original_url,
            short_code,
            self.expires_at,
            0,
            self.created_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn mapping(expires_at: Option<DateTime<Utc>>) -> UrlMapping {
        UrlMapping::new(
            1,
            "https://example.com".to_string(),
            "abc123".to_string(),
            expires_at,
            0,
            Utc::now(),
        )
    }

    #[test]
    fn test_mapping_without_expiry_never_expires() {
        let m = mapping(None);
        assert!(!m.is_expired_at(Utc::now() + TimeDelta::days(36500)));
    }

    #[test]
    fn test_mapping_expiry_boundary_is_exclusive() {
        let at = Utc::now();
        let m = mapping(Some(at));

        assert!(!m.is_expired_at(at - TimeDelta::seconds(1)));
        assert!(!m.is_expired_at(at));
        assert!(m.is_expired_at(at + TimeDelta::microseconds(1)));
    }

    #[test]
    fn test_new_mapping_into_mapping() {
        let now = Utc::now();
        let new_mapping = NewMapping {
            original_url: "https://rust-lang.org".to_string(),
            short_code: None,
            expires_at: None,
            created_at: now,
        };

        let with_code = new_mapping.with_code("xyz789");
        assert_eq!(with_code.short_code.as_deref(), Some("xyz789"));
        assert!(new_mapping.short_code.is_none());

        let m = with_code.into_mapping(42, "xyz789".to_string());
        assert_eq!(m.id, 42);
        assert_eq!(m.short_code, "xyz789");
        assert_eq!(m.clicks, 0);
        assert_eq!(m.created_at, now);
    }
}
