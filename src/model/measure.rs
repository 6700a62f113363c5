// src/model/measure.rs
use serde::{Deserialize, Serialize};

use crate::model::filter::MeasureFilter;
use crate::model::types::{Aggregation, SortDirection};

/// Wire wrapper: `{"measure": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureItem {
    pub measure: Measure,
}

/// What kind of platform object a measure is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureType {
    Fact,
    Attribute,
    Metric,
}

impl MeasureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasureType::Fact => "fact",
            MeasureType::Attribute => "attribute",
            MeasureType::Metric => "metric",
        }
    }
}

/// A quantitative field in the measures bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    #[serde(rename = "type")]
    pub measure_type: MeasureType,
    pub object_uri: String,
    pub title: String,
    #[serde(default)]
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
    #[serde(default)]
    pub measure_filters: Vec<MeasureFilter>,
    #[serde(default)]
    pub show_in_percent: bool,
    #[serde(default, rename = "showPoP")]
    pub show_pop: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDirection>,
}

impl Measure {
    /// At least one measure filter selects some elements.
    pub fn has_effective_filters(&self) -> bool {
        self.measure_filters
            .iter()
            .any(|f| !f.list_attribute_filter.is_empty())
    }

    /// Whether the measure needs a generated base definition
    /// rather than referencing the object directly.
    pub fn is_derived(&self) -> bool {
        self.measure_type != MeasureType::Metric || self.has_effective_filters()
    }
}
