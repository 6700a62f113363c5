//! Per-measure planning: which metrics to generate and which columns to expose.

use crate::generate::{
    base_expression, percent_expression, percent_title, pop_expression, pop_title, synthesize,
    title::percent_base_title, truncate_title, GeneratedKind, MetricRef, PERCENT_FORMAT,
};
use crate::model::{Buckets, Measure, MetricDefinition, OrderBy};

use super::{CompileError, CompileResult};

/// Dimension attributes that percent and PoP measures are computed against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DimensionContext<'a> {
    /// Attribute of the first category.
    pub percent_attribute: Option<&'a str>,
    /// Attribute of the first date category.
    pub pop_attribute: Option<&'a str>,
}

impl<'a> DimensionContext<'a> {
    pub fn from_buckets(buckets: &'a Buckets) -> Self {
        Self {
            percent_attribute: buckets.percent_attribute(),
            pop_attribute: buckets.pop_attribute(),
        }
    }
}

/// What a single measure contributes to the execution configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurePlan {
    /// Columns in output order. Two for PoP measures (`[pop, compared]`), one otherwise.
    pub columns: Vec<String>,
    /// Generated definitions in dependency order.
    pub definitions: Vec<MetricDefinition>,
    /// Sort entry, if the measure is sortable and declares a sort.
    pub sort: Option<OrderBy>,
}

/// Plan one measure.
///
/// Layering: base (generated for facts, attributes and filtered measures, otherwise the
/// raw metric) → percent-of-total → period-over-period. Each layer wraps the one below.
pub fn plan_measure(measure: &Measure, context: &DimensionContext<'_>) -> CompileResult<MeasurePlan> {
    let mut definitions = Vec::new();

    let mut current = if measure.is_derived() {
        let kind = if measure.has_effective_filters() {
            GeneratedKind::Filtered(measure.aggregation)
        } else {
            GeneratedKind::Base(measure.aggregation)
        };
        let def = synthesize(
            measure.measure_type,
            &measure.object_uri,
            kind,
            base_expression(
                &measure.object_uri,
                measure.aggregation,
                &measure.measure_filters,
            ),
            truncate_title(&measure.title, ""),
            measure.format.clone(),
        )?;
        let reference = MetricRef::Generated(def.identifier.clone());
        definitions.push(def);
        reference
    } else {
        MetricRef::Object(measure.object_uri.clone())
    };
    let mut current_format = measure.format.clone();
    let mut current_title = measure.title.clone();

    if measure.show_in_percent {
        let attribute = context
            .percent_attribute
            .ok_or_else(|| CompileError::MissingPercentAttribute {
                measure: measure.title.clone(),
            })?;
        let def = synthesize(
            measure.measure_type,
            &measure.object_uri,
            GeneratedKind::Percent,
            percent_expression(&current, attribute),
            percent_title(&measure.title),
            PERCENT_FORMAT.to_string(),
        )?;
        current = MetricRef::Generated(def.identifier.clone());
        current_format = def.format.clone();
        current_title = percent_base_title(&measure.title);
        definitions.push(def);
    }

    if measure.show_pop {
        let attribute = context
            .pop_attribute
            .ok_or_else(|| CompileError::MissingPopAttribute {
                measure: measure.title.clone(),
            })?;
        let def = synthesize(
            measure.measure_type,
            &measure.object_uri,
            GeneratedKind::Pop,
            pop_expression(&current, attribute),
            pop_title(&current_title),
            current_format,
        )?;
        let columns = vec![def.identifier.clone(), current.column().to_string()];
        definitions.push(def);
        // The PoP column pair is never sortable.
        return Ok(MeasurePlan {
            columns,
            definitions,
            sort: None,
        });
    }

    let column = current.column().to_string();
    Ok(MeasurePlan {
        sort: measure.sort.map(|dir| OrderBy::new(column.clone(), dir)),
        columns: vec![column],
        definitions,
    })
}
