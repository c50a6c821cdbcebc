//! Category filter values.

use serde::{Deserialize, Serialize};

/// Query value of the no-filter category.
pub const ALL_CATEGORY: &str = "all";

/// A category the catalog can be filtered by.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Category {
    /// Display name.
    pub name: String,
    /// Value sent to the catalog.
    pub value: String,
}

impl Category {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The "All" category, meaning no category filter.
    pub fn all() -> Self {
        Self::new("All", ALL_CATEGORY)
    }

    /// Build a category from its slug, capitalizing the first character for display.
    pub fn from_slug(slug: impl Into<String>) -> Self {
        let value = slug.into();
        let mut chars = value.chars();
        let name = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Self { name, value }
    }

    /// Check if this is the no-filter category.
    pub fn is_all(&self) -> bool {
        self.value == ALL_CATEGORY
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::all()
    }
}

/// A category entry from the catalog's category listing.
///
/// Older catalog versions return bare slugs, newer ones return objects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CategoryRecord {
    Slug(String),
    Detailed {
        slug: String,
        name: String,
        #[serde(default)]
        url: Option<String>,
    },
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        match record {
            CategoryRecord::Slug(slug) => Category::from_slug(slug),
            CategoryRecord::Detailed { slug, name, .. } => Category::new(name, slug),
        }
    }
}
