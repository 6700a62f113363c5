// src/model/category.rs
use serde::{Deserialize, Serialize};

use crate::model::types::SortDirection;

/// Wire wrapper: `{"category": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryItem {
    pub category: Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Attribute,
    Date,
}

/// A grouping dimension. Contributes one column and optionally a sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    /// Display form URI, used directly as the column identifier
    pub display_form: String,
    /// Attribute URI backing the display form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDirection>,
}

impl Category {
    pub fn is_date(&self) -> bool {
        self.category_type == CategoryType::Date
    }
}
