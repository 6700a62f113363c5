//! Primitive types shared by bucket descriptions and execution configurations.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// `/gdc/md/{project}/obj/{id}`
static OBJECT_URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/gdc/md/([^/]+)/obj/([^/?]+)").unwrap());

/// Trailing `id=` query parameter of an attribute element URI.
static ELEMENT_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[?&]id=([^&]+)$").unwrap());

/// Sort direction declared on a category or measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregation applied to a fact or attribute measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Sum,
    Count,
    Avg,
    Min,
    Max,
    Median,
    Runsum,
}

impl Aggregation {
    /// Lowercase name, used in generated identifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Count => "count",
            Aggregation::Avg => "avg",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
            Aggregation::Median => "median",
            Aggregation::Runsum => "runsum",
        }
    }

    /// Function name as it appears in an expression.
    pub fn function_name(&self) -> &'static str {
        match self {
            Aggregation::Sum => "SUM",
            Aggregation::Count => "COUNT",
            Aggregation::Avg => "AVG",
            Aggregation::Min => "MIN",
            Aggregation::Max => "MAX",
            Aggregation::Median => "MEDIAN",
            Aggregation::Runsum => "RUNSUM",
        }
    }
}

/// Project and object id extracted from a metadata object URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectRef<'a> {
    pub project_id: &'a str,
    pub object_id: &'a str,
}

impl<'a> ObjectRef<'a> {
    /// Parse `/gdc/md/{project}/obj/{id}`. Returns `None` for any other shape.
    pub fn parse(uri: &'a str) -> Option<Self> {
        let caps = OBJECT_URI.captures(uri)?;
        Some(Self {
            project_id: caps.get(1)?.as_str(),
            object_id: caps.get(2)?.as_str(),
        })
    }
}

/// Extract the element id from an attribute element URI
/// (`/gdc/md/{project}/obj/{attr}/elements?id=123` -> `123`).
pub fn element_id(uri: &str) -> Option<&str> {
    ELEMENT_ID
        .captures(uri)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
