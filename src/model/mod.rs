//! Bucket descriptions (compiler input) and execution configurations (compiler output).

pub mod bucket;
pub mod category;
pub mod execution;
pub mod filter;
pub mod measure;
pub mod types;

pub use bucket::{Buckets, MetadataObject, BAR_CHART};
pub use category::{Category, CategoryItem, CategoryType};
pub use execution::{
    ExecutionConfiguration, ExecutionDefinition, MetricDefinition, MetricDefinitionWrapper,
    OrderBy, WhereClause,
};
pub use filter::{AttributeSelection, DateFilter, FilterEntry, ListAttributeFilter, MeasureFilter};
pub use measure::{Measure, MeasureItem, MeasureType};
pub use types::{element_id, Aggregation, ObjectRef, SortDirection};
