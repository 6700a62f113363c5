// src/model/filter.rs
use serde::{Deserialize, Serialize};

/// A report-level filter entry.
///
/// Externally tagged on the wire: `{"listAttributeFilter": {...}}` or `{"dateFilter": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterEntry {
    ListAttributeFilter(ListAttributeFilter),
    DateFilter(DateFilter),
}

/// Filter on the elements of an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAttributeFilter {
    /// Attribute URI (used in measure filter expressions)
    pub attribute: String,
    /// Display form URI (used as the where-clause key)
    pub display_form: String,
    #[serde(default)]
    pub default: AttributeSelection,
}

/// Selected (or, when negated, excluded) attribute elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSelection {
    #[serde(default)]
    pub negative_selection: bool,
    #[serde(default)]
    pub attribute_elements: Vec<String>,
}

impl ListAttributeFilter {
    /// Negated with nothing excluded: every element is selected.
    pub fn is_all_selected(&self) -> bool {
        self.default.negative_selection && self.default.attribute_elements.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.default.attribute_elements.is_empty()
    }

    pub fn elements(&self) -> &[String] {
        &self.default.attribute_elements
    }

    pub fn is_negative(&self) -> bool {
        self.default.negative_selection
    }
}

/// Relative date range filter on a date dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFilter {
    pub dimension: String,
    pub granularity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<i64>,
}

impl DateFilter {
    /// No bounds at all.
    pub fn is_all_time(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// A filter attached to a single measure. Only attribute element lists are supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureFilter {
    pub list_attribute_filter: ListAttributeFilter,
}
