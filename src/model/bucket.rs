// src/model/bucket.rs
use serde::{Deserialize, Serialize};

use crate::model::category::{Category, CategoryItem};
use crate::model::filter::FilterEntry;
use crate::model::measure::{Measure, MeasureItem};

/// Visualization type whose sort order is driven by measures only.
pub const BAR_CHART: &str = "bar";

/// A declarative report description: visualization type plus buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataObject {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub visualization_type: Option<String>,
    #[serde(default)]
    pub buckets: Buckets,
}

impl MetadataObject {
    pub fn is_bar_chart(&self) -> bool {
        self.visualization_type.as_deref() == Some(BAR_CHART)
    }
}

/// Measures, categories and filters describing a report's shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Buckets {
    #[serde(default)]
    pub measures: Vec<MeasureItem>,
    #[serde(default)]
    pub categories: Vec<CategoryItem>,
    #[serde(default)]
    pub filters: Vec<FilterEntry>,
}

impl Buckets {
    pub fn measures(&self) -> impl Iterator<Item = &Measure> {
        self.measures.iter().map(|m| &m.measure)
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().map(|c| &c.category)
    }

    /// Attribute of the first category; the "BY ALL" dimension of percent measures.
    pub fn percent_attribute(&self) -> Option<&str> {
        self.categories().next()?.attribute.as_deref()
    }

    /// Attribute of the first date category; the period dimension of PoP measures.
    pub fn pop_attribute(&self) -> Option<&str> {
        self.categories()
            .find(|c| c.is_date())
            .and_then(|c| c.attribute.as_deref())
    }
}
