use thiserror::Error;

/// Errors raised while validating a dataset against the configuration or
/// while turning attributes into chart requests.
#[derive(Debug, Error, PartialEq)]
pub enum DashboardError {
    #[error("field '{0}' not found in dataset")]
    MissingField(String),

    #[error("field '{field}' is declared numerical but row {row} holds '{value}'")]
    NotNumeric {
        field: String,
        row: usize,
        value: String,
    },

    #[error("outcome field '{field}' has {found} distinct classes ({classes}), expected at most 2")]
    TooManyOutcomeClasses {
        field: String,
        found: usize,
        classes: String,
    },

    #[error("outcome field '{field}' row {row} holds '{value}', which is not a configured class")]
    UnknownOutcomeClass {
        field: String,
        row: usize,
        value: String,
    },

    #[error("outcome field '{0}' has no non-missing values")]
    EmptyOutcome(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
