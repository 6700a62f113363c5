//! orderBy construction.

use crate::model::{MetadataObject, OrderBy};

/// Category sorts in bucket order followed by `measure_sorts`.
///
/// Bar charts are ordered by their measures only, so category sorts are dropped.
pub fn order_by(md: &MetadataObject, measure_sorts: Vec<OrderBy>) -> Vec<OrderBy> {
    if md.is_bar_chart() {
        return measure_sorts;
    }

    md.buckets
        .categories()
        .filter_map(|c| c.sort.map(|dir| OrderBy::new(c.display_form.clone(), dir)))
        .chain(measure_sorts)
        .collect()
}
