//! Facet parameter building.

use crate::error::QueryError;
use crate::types::{DateFacetOptions, FacetOptions, FacetParams, IndexSchema};

use super::type_suffix::{add_text_suffix, replace_types};

/// Suffix of facet fields.
const FACET_SUFFIX: &str = "_facet";

/// Suffix of date fields.
const DATE_SUFFIX: &str = "_d";

/// Accepted values of the date facet `other` option.
const DATE_OTHER_VALUES: &[&str] = &["before", "after", "between", "none", "all"];

/// Facet parameters plus the filter queries they contribute.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetRequest {
    /// The `facet.*` parameters.
    pub params: FacetParams,
    /// Drill-down and date filters for `fq`.
    pub filter_queries: Vec<String>,
}

/// Builds facet parameters from options.
pub fn build_facets(
    options: &FacetOptions,
    schema: &IndexSchema,
) -> Result<FacetRequest, QueryError> {
    let mincount = match (options.mincount, options.zeros) {
        (Some(mincount), _) => mincount,
        (None, Some(false)) => 1,
        (None, _) => 0,
    };

    let mut params = FacetParams {
        facet: true,
        fields: options
            .fields
            .iter()
            .map(|field| format!("{}{}", field, FACET_SUFFIX))
            .collect(),
        queries: options
            .query
            .iter()
            .map(|query| replace_types(&add_text_suffix(query), schema, true))
            .collect(),
        limit: options.limit.unwrap_or(-1),
        mincount,
        sort: options.sort.then(|| "count".to_string()),
        offset: options.offset,
        prefix: options.prefix.clone(),
        missing: options.missing,
        ..Default::default()
    };

    let mut filter_queries: Vec<String> = options
        .browse
        .iter()
        .map(|criteria| suffix_field(criteria, FACET_SUFFIX))
        .collect();

    if let Some(dates) = &options.dates {
        filter_queries.extend(apply_date_facets(&mut params, dates)?);
    }

    Ok(FacetRequest {
        params,
        filter_queries,
    })
}

/// Adds the `facet.date.*` parameters and returns the date filters.
fn apply_date_facets(
    params: &mut FacetParams,
    dates: &DateFacetOptions,
) -> Result<Vec<String>, QueryError> {
    if !dates.fields.is_empty() {
        let (start, end, gap) = match (&dates.start, &dates.end, &dates.gap) {
            (Some(start), Some(end), Some(gap)) => (start, end, gap),
            _ => {
                return Err(QueryError::InvalidFacet {
                    message: "date facets require start, end and gap".to_string(),
                });
            }
        };

        params.date_fields = dates
            .fields
            .iter()
            .map(|field| format!("{}{}", field, DATE_SUFFIX))
            .collect();
        params.date_start = Some(start.clone());
        params.date_end = Some(end.clone());
        params.date_gap = Some(gap.clone());
        params.date_hardend = dates.hardend;
    }

    if let Some(other) = &dates.other {
        if !DATE_OTHER_VALUES.contains(&other.as_str()) {
            return Err(QueryError::InvalidFacet {
                message: format!(
                    "date facet 'other' must be one of {}, got '{}'",
                    DATE_OTHER_VALUES.join(", "),
                    other
                ),
            });
        }
        params.date_other = Some(other.clone());
    }

    Ok(dates
        .filter
        .iter()
        .map(|filter| suffix_field(filter, DATE_SUFFIX))
        .collect())
}

/// Appends `suffix` to the field of a `field:value` filter.
fn suffix_field(criteria: &str, suffix: &str) -> String {
    match criteria.split_once(':') {
        Some((field, value)) => format!("{}{}:{}", field.trim(), suffix, value.trim_start()),
        None => criteria.to_string(),
    }
}
