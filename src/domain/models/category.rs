//! Category domain model.
//!
//! Categories group courses. The name is the business key and must stay
//! unique across the store; the description is free text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reported when a new category reuses an existing name.
pub const NAME_EXISTS_MESSAGE: &str = "The category name already exists.";

/// Reported when an update renames a category onto another's name.
pub const NAME_TAKEN_MESSAGE: &str = "The name has already been taken.";

/// A persisted category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned identifier
    pub id: i64,
    /// Unique display name
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Case-insensitive substring match on the name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Case-insensitive name equality; names are unique under this rule.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Attributes for a category that does not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewCategory {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Replacement attributes for an existing category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryChanges {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
        }
    }
}

/// Name filter applied to category listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    pub name: Option<String>,
}

impl CategoryFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// The name fragment, ignoring blank input.
    pub fn name_fragment(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.name_fragment().is_none()
    }
}

/// Criteria accepted by the direct-to-store search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str) -> Category {
        let now = Utc::now();
        Category {
            id: 1,
            name: name.to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_name_contains_ignores_case() {
        let c = category("Mathematics");
        assert!(c.name_contains("math"));
        assert!(c.name_contains("THEM"));
        assert!(!c.name_contains("physics"));
    }

    #[test]
    fn test_is_named_ignores_case() {
        assert!(category("Éclair").is_named("éclair"));
        assert!(category("Math").is_named("MATH"));
        assert!(!category("Math").is_named("Maths"));
    }

    #[test]
    fn test_filter_ignores_blank_name() {
        assert!(CategoryFilter::default().is_empty());
        assert!(CategoryFilter::by_name("   ").is_empty());
        assert_eq!(CategoryFilter::by_name(" art ").name_fragment(), Some("art"));
    }

    #[test]
    fn test_new_category_deserializes_partial_body() {
        let draft: NewCategory = serde_json::from_str(r#"{"name":"Math"}"#).unwrap();
        assert_eq!(draft, NewCategory::named("Math"));

        let empty: NewCategory = serde_json::from_str("{}").unwrap();
        assert!(empty.name.is_none());
    }
}
