//! Dashboard configuration: which attributes get a tab, how they are
//! classified, and the constants of the balancing comparison.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Largest deviation from 100 tolerated when percentages are summed.
pub const PERCENT_TOLERANCE: f64 = 0.02;

/// How an attribute is summarised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Numerical,
    Categorical,
}

/// A declared attribute and its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub name: String,
    pub kind: AttributeKind,
}

impl AttributeSpec {
    pub fn numerical(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: AttributeKind::Numerical,
        }
    }

    pub fn categorical(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: AttributeKind::Categorical,
        }
    }
}

/// The binary outcome column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeConfig {
    /// Column name in the dataset.
    pub column: String,
    /// Title of the countplot legend.
    pub legend_title: String,
    /// Allowed class values. Empty means "any two classes".
    pub classes: Vec<String>,
}

impl Default for OutcomeConfig {
    fn default() -> Self {
        Self {
            column: "Heart Disease Status".into(),
            legend_title: "Heart Disease".into(),
            classes: vec!["No".into(), "Yes".into()],
        }
    }
}

/// One class of the post-balancing distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancedShare {
    /// Outcome value this share belongs to.
    pub class: String,
    /// Display label on the pie.
    pub label: String,
    pub percent: f64,
}

/// Settings of the before/after balancing comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancingConfig {
    /// Name of the balancing technique, shown in titles.
    pub method: String,
    pub note: String,
    /// Result of the balancing step, taken as given.
    pub shares: Vec<BalancedShare>,
    /// Colors assigned to classes by position in the shared class order.
    pub class_colors: Vec<String>,
    pub explode: f64,
    pub figure_size: [f32; 2],
}

impl Default for BalancingConfig {
    fn default() -> Self {
        Self {
            method: "SMOTE".into(),
            note: "Since the dataset is imbalanced, SMOTE (Synthetic Minority Oversampling \
                   Technique) was applied to balance the classes for better model training \
                   and fairer predictions."
                .into(),
            shares: vec![
                BalancedShare {
                    class: "No".into(),
                    label: "No Heart Disease".into(),
                    percent: 50.0,
                },
                BalancedShare {
                    class: "Yes".into(),
                    label: "Heart Disease".into(),
                    percent: 50.0,
                },
            ],
            class_colors: vec!["#66b3ff".into(), "#ff9999".into()],
            explode: 0.05,
            figure_size: [3.0, 3.0],
        }
    }
}

/// Immutable configuration handed to the renderer and the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub page_title: String,
    pub heading: String,
    pub intro: String,
    /// Shown below the attribute tabs.
    pub observation_note: String,
    /// Dataset loaded at startup when no path is given on the command line.
    pub dataset_path: PathBuf,
    pub outcome: OutcomeConfig,
    /// Ordered list of attributes; one tab each.
    pub attributes: Vec<AttributeSpec>,
    pub histogram_bins: usize,
    pub balancing: BalancingConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let numerical = [
            "Age",
            "Blood Pressure",
            "Cholesterol Level",
            "BMI",
            "Sleep Hours",
            "Triglyceride Level",
            "Fasting Blood Sugar",
            "CRP Level",
            "Homocysteine Level",
        ];
        let categorical = [
            "Gender",
            "Exercise Habits",
            "Smoking",
            "Family Heart Disease",
            "Diabetes",
            "High Blood Pressure",
            "Low HDL Cholesterol",
            "High LDL Cholesterol",
            "Alcohol Consumption",
            "Stress Level",
            "Sugar Consumption",
        ];
        let attributes = numerical
            .iter()
            .map(|n| AttributeSpec::numerical(n))
            .chain(categorical.iter().map(|n| AttributeSpec::categorical(n)))
            .collect();

        Self {
            page_title: "Heart Disease Dashboard".into(),
            heading: "AuraCare Heart Disease Dashboard".into(),
            intro: "This dashboard visualizes the distribution of input attributes and \
                    their relationship with Heart Disease Status."
                .into(),
            observation_note: "From the attribute visualizations above, there is no single \
                               clear factor that strongly determines the presence of heart \
                               disease."
                .into(),
            dataset_path: PathBuf::from("heart_disease.csv"),
            outcome: OutcomeConfig::default(),
            attributes,
            histogram_bins: 10,
            balancing: BalancingConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON configuration file, or fall back to the built-in default.
    /// The result is validated either way.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => {
                let text = std::fs::read_to_string(p)
                    .with_context(|| format!("reading config {}", p.display()))?;
                let cfg: DashboardConfig = serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", p.display()))?;
                log::info!("Loaded configuration from {}", p.display());
                cfg
            }
            None => DashboardConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the renderer relies on.
    pub fn validate(&self) -> Result<(), DashboardError> {
        let invalid = |msg: String| Err(DashboardError::InvalidConfig(msg));

        if self.attributes.is_empty() {
            return invalid("attribute list is empty".into());
        }
        let mut seen = BTreeSet::new();
        for attr in &self.attributes {
            if !seen.insert(attr.name.as_str()) {
                return invalid(format!("attribute '{}' is declared twice", attr.name));
            }
            if attr.name == self.outcome.column {
                return invalid(format!(
                    "attribute '{}' is the outcome column",
                    attr.name
                ));
            }
        }
        if self.histogram_bins == 0 {
            return invalid("histogram_bins must be at least 1".into());
        }
        if self.outcome.classes.len() > 2 {
            return invalid(format!(
                "outcome declares {} classes, expected at most 2",
                self.outcome.classes.len()
            ));
        }

        let shares = &self.balancing.shares;
        if shares.is_empty() {
            return invalid("balancing shares are empty".into());
        }
        if !self.outcome.classes.is_empty() {
            if let Some(share) = shares
                .iter()
                .find(|s| !self.outcome.classes.contains(&s.class))
            {
                return invalid(format!(
                    "balancing class '{}' is not an outcome class",
                    share.class
                ));
            }
        }
        if shares.iter().any(|s| s.percent < 0.0) {
            return invalid("balancing shares must not be negative".into());
        }
        let total: f64 = shares.iter().map(|s| s.percent).sum();
        if (total - 100.0).abs() > PERCENT_TOLERANCE {
            return invalid(format!("balancing shares sum to {total}, expected 100"));
        }
        if self.balancing.class_colors.len() < 2 {
            return invalid("at least two class colors are required".into());
        }
        if !(0.0..1.0).contains(&self.balancing.explode) {
            return invalid(format!(
                "explode offset {} must be in [0, 1)",
                self.balancing.explode
            ));
        }
        Ok(())
    }
}
