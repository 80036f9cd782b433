// src/domain/category.rs
use serde::{Deserialize, Serialize};

/// Audience a listing is offered to.
///
/// The bot stores categories as Uzbek labels. Known labels map to a fixed
/// marker style; anything else keeps its label and falls back to the
/// default style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Family,
    Girls,
    Kids,
    Everyone,
    Other(String),
}

impl Category {
    /// Label as it appears in the source data and in the UI.
    pub fn label(&self) -> &str {
        match self {
            Category::Family => "Oilaga",
            Category::Girls => "Qizlarga",
            Category::Kids => "Bollarga",
            Category::Everyone => "Hammaga",
            Category::Other(label) => label,
        }
    }

    /// CSS class appended to `custom-marker`.
    pub fn style_class(&self) -> &'static str {
        match self {
            Category::Family => "family-listing",
            Category::Girls => "girls-listing",
            Category::Kids => "kids-listing",
            Category::Everyone => "all-listing",
            Category::Other(_) => "default-listing",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Category::Family => "👨‍👩‍👧‍👦",
            Category::Girls => "👩",
            Category::Kids => "👶",
            Category::Everyone => "👥",
            Category::Other(_) => "🏠",
        }
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        match label {
            "Oilaga" => Category::Family,
            "Qizlarga" => Category::Girls,
            "Bollarga" => Category::Kids,
            "Hammaga" => Category::Everyone,
            other => Category::Other(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from(label.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}
