use std::collections::BTreeSet;

use crate::config::{AttributeKind, DashboardConfig};
use crate::error::DashboardError;

use super::model::Dataset;

/// Check a loaded dataset against the configuration before anything renders.
///
/// * every declared attribute and the outcome column exist
/// * numerical attributes hold only numbers or missing cells
/// * the outcome has one or two classes, all of them configured (if any are)
///
/// Records with a missing outcome are tolerated and only logged.
pub fn validate_dataset(dataset: &Dataset, config: &DashboardConfig) -> Result<(), DashboardError> {
    let outcome = &config.outcome.column;
    if !dataset.has_column(outcome) {
        return Err(DashboardError::MissingField(outcome.clone()));
    }

    for attr in &config.attributes {
        if !dataset.has_column(&attr.name) {
            return Err(DashboardError::MissingField(attr.name.clone()));
        }
        if attr.kind == AttributeKind::Numerical {
            dataset.numeric_values(&attr.name)?;
        }
    }

    validate_outcome(dataset, config)
}

fn validate_outcome(dataset: &Dataset, config: &DashboardConfig) -> Result<(), DashboardError> {
    let field = &config.outcome.column;
    let allowed = &config.outcome.classes;

    let mut classes: Vec<String> = Vec::new();
    let mut missing = 0usize;

    for (row, cell) in dataset.column(field)?.into_iter().enumerate() {
        let Some(label) = cell.label() else {
            missing += 1;
            continue;
        };
        if !allowed.is_empty() && !allowed.contains(&label) {
            return Err(DashboardError::UnknownOutcomeClass {
                field: field.clone(),
                row,
                value: label,
            });
        }
        if !classes.contains(&label) {
            classes.push(label);
        }
    }

    if classes.is_empty() {
        return Err(DashboardError::EmptyOutcome(field.clone()));
    }
    if classes.len() > 2 {
        let listed: BTreeSet<&str> = classes.iter().map(String::as_str).collect();
        return Err(DashboardError::TooManyOutcomeClasses {
            field: field.clone(),
            found: classes.len(),
            classes: listed.into_iter().collect::<Vec<_>>().join(", "),
        });
    }
    if missing > 0 {
        log::warn!("{missing} records have no '{field}' value and are left out of grouping");
    }
    Ok(())
}
