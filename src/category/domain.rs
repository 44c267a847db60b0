//! Core category domain types.

use serde::{Deserialize, Serialize};

/// The ID of a category.
pub type CategoryId = i64;

/// A label for filing transactions, e.g. "Groceries" or "Salary".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The display name of the category.
    pub name: String,
    /// A short description of what belongs in the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The accent color the UI charts the category with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// An opaque icon token the UI resolves to artwork.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Whether the category is one of the built-in defaults.
    #[serde(default)]
    pub is_default: bool,
}
