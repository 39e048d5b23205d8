//! Outcome class shares before and after balancing, and the pair of pies
//! comparing them.

use serde::{Deserialize, Serialize};

use crate::chart::stats::value_counts;
use crate::chart::{ChartData, ChartRequest, ChartStyle, Palette, PieSlice, PieStyle};
use crate::config::{BalancingConfig, DashboardConfig};
use crate::data::model::Dataset;
use crate::error::DashboardError;

/// One outcome class and its share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassShare {
    /// Outcome value as found in the data.
    pub class: String,
    /// Text shown on the chart.
    pub label: String,
    /// 0–100.
    pub percent: f64,
}

/// Class shares in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub shares: Vec<ClassShare>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl DistributionSummary {
    /// Shares of each outcome class in `dataset`, rounded to two decimals.
    /// Most frequent class first; records without an outcome are ignored.
    pub fn observed(dataset: &Dataset, outcome: &str) -> Result<Self, DashboardError> {
        let counts = value_counts(dataset.labels(outcome)?);
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        if total == 0 {
            return Err(DashboardError::EmptyOutcome(outcome.to_string()));
        }
        let shares = counts
            .into_iter()
            .map(|(class, n)| ClassShare {
                label: class.clone(),
                class,
                percent: round2(n as f64 / total as f64 * 100.0),
            })
            .collect();
        Ok(Self { shares })
    }

    /// The configured result of the balancing step. Not derived from data.
    pub fn post_balancing(balancing: &BalancingConfig) -> Self {
        let shares = balancing
            .shares
            .iter()
            .map(|s| ClassShare {
                class: s.class.clone(),
                label: s.label.clone(),
                percent: s.percent,
            })
            .collect();
        Self { shares }
    }

    pub fn total(&self) -> f64 {
        self.shares.iter().map(|s| s.percent).sum()
    }

    pub fn percent_of(&self, class: &str) -> Option<f64> {
        self.shares.iter().find(|s| s.class == class).map(|s| s.percent)
    }

    fn classes(&self) -> impl Iterator<Item = &str> {
        self.shares.iter().map(|s| s.class.as_str())
    }

    /// Reorder shares to follow `order`; classes not listed keep their
    /// relative order at the end.
    fn reordered(&self, order: &[String]) -> Self {
        let rank = |class: &str| order.iter().position(|c| c == class).unwrap_or(order.len());
        let mut shares = self.shares.clone();
        shares.sort_by_key(|s| rank(&s.class));
        Self { shares }
    }
}

/// Observed and post-balancing distributions with their charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionComparison {
    /// Shared class order of both charts.
    pub class_order: Vec<String>,
    pub observed: DistributionSummary,
    pub post_balancing: DistributionSummary,
    pub observed_chart: ChartRequest,
    pub post_balancing_chart: ChartRequest,
}

impl DistributionComparison {
    /// Build both summaries and two pies sharing class order, class colors,
    /// explode offset and size.
    ///
    /// The observed order comes from class frequency while the balanced one
    /// is fixed by configuration, so both are aligned to one order here.
    pub fn build(dataset: &Dataset, config: &DashboardConfig) -> Result<Self, DashboardError> {
        let outcome = &config.outcome.column;
        let balancing = &config.balancing;

        let observed = DistributionSummary::observed(dataset, outcome)?;
        let post = DistributionSummary::post_balancing(balancing);

        let mut class_order: Vec<String> = observed.classes().map(str::to_string).collect();
        for class in post.classes() {
            if !class_order.iter().any(|c| c == class) {
                class_order.push(class.to_string());
            }
        }

        let observed = observed.reordered(&class_order);
        let post = post.reordered(&class_order);

        let observed_chart = comparison_pie(
            &observed,
            &class_order,
            outcome,
            format!("{outcome} (Original)"),
            2,
            balancing,
        );
        let post_balancing_chart = comparison_pie(
            &post,
            &class_order,
            outcome,
            format!("{outcome} (After {})", balancing.method),
            1,
            balancing,
        );

        log::debug!("Outcome class order for comparison: {class_order:?}");

        Ok(Self {
            class_order,
            observed,
            post_balancing: post,
            observed_chart,
            post_balancing_chart,
        })
    }
}

fn comparison_pie(
    summary: &DistributionSummary,
    class_order: &[String],
    outcome: &str,
    title: String,
    pct_decimals: usize,
    balancing: &BalancingConfig,
) -> ChartRequest {
    // Colors follow the class, not the slice position.
    let colors = summary
        .shares
        .iter()
        .map(|s| {
            let pos = class_order.iter().position(|c| *c == s.class).unwrap_or(0);
            balancing.class_colors[pos % balancing.class_colors.len()].clone()
        })
        .collect();
    let weights: Vec<(String, f64)> = summary
        .shares
        .iter()
        .map(|s| (s.label.clone(), s.percent))
        .collect();

    ChartRequest {
        source: outcome.to_string(),
        group_by: None,
        data: ChartData::Pie {
            slices: PieSlice::from_weights(&weights),
        },
        style: ChartStyle {
            palette: Palette::Custom(colors),
            figure_size: balancing.figure_size,
            pie: Some(PieStyle {
                explode: balancing.explode,
                pct_decimals,
                font_size: 11.0,
                ..PieStyle::default()
            }),
            ..ChartStyle::titled(title)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PERCENT_TOLERANCE;
    use crate::data::model::{CellValue, Record};

    const OUTCOME: &str = "Heart Disease Status";

    fn dataset(outcomes: &[&str]) -> Dataset {
        let records = outcomes
            .iter()
            .map(|o| Record {
                fields: [(OUTCOME.to_string(), CellValue::String(o.to_string()))]
                    .into_iter()
                    .collect(),
            })
            .collect();
        Dataset::from_records(vec![OUTCOME.into()], records)
    }

    #[test]
    fn observed_three_to_one() {
        let obs = DistributionSummary::observed(&dataset(&["A", "A", "B", "A"]), OUTCOME).unwrap();
        assert_eq!(obs.percent_of("A"), Some(75.0));
        assert_eq!(obs.percent_of("B"), Some(25.0));
    }

    #[test]
    fn observed_sums_to_hundred_after_rounding() {
        let obs = DistributionSummary::observed(&dataset(&["A", "B", "B"]), OUTCOME).unwrap();
        assert_eq!(obs.percent_of("A"), Some(33.33));
        assert_eq!(obs.percent_of("B"), Some(66.67));
        assert!((obs.total() - 100.0).abs() <= PERCENT_TOLERANCE);
    }

    #[test]
    fn observed_of_empty_outcome_fails() {
        let ds = Dataset::from_records(vec![OUTCOME.into()], vec![]);
        assert!(DistributionSummary::observed(&ds, OUTCOME).is_err());
    }

    #[test]
    fn post_balancing_ignores_data() {
        let config = DashboardConfig::default();
        for outcomes in [&["No", "No", "Yes"][..], &["Yes"][..]] {
            let cmp = DistributionComparison::build(&dataset(outcomes), &config).unwrap();
            let mut pct: Vec<f64> =
                cmp.post_balancing.shares.iter().map(|s| s.percent).collect();
            pct.sort_by(f64::total_cmp);
            assert_eq!(pct, vec![50.0, 50.0]);
        }
    }

    #[test]
    fn both_pies_share_class_order_and_colors() {
        // "Yes" dominates, so observed order is Yes, No while config lists No, Yes.
        let config = DashboardConfig::default();
        let cmp = DistributionComparison::build(&dataset(&["Yes", "Yes", "No"]), &config).unwrap();
        assert_eq!(cmp.class_order, vec!["Yes", "No"]);

        let post_classes: Vec<&str> =
            cmp.post_balancing.shares.iter().map(|s| s.class.as_str()).collect();
        assert_eq!(post_classes, vec!["Yes", "No"]);

        let ChartData::Pie { slices } = &cmp.post_balancing_chart.data else {
            panic!("expected pie");
        };
        assert_eq!(slices[0].label, "Heart Disease");

        let a = &cmp.observed_chart.style;
        let b = &cmp.post_balancing_chart.style;
        assert_eq!(a.palette, b.palette);
        assert_eq!(a.figure_size, b.figure_size);
        assert_eq!(
            a.pie.as_ref().map(|p| p.explode),
            b.pie.as_ref().map(|p| p.explode)
        );
        assert_eq!(a.palette.color(0), "#66b3ff");
    }

    #[test]
    fn class_missing_from_data_is_appended() {
        let config = DashboardConfig::default();
        let cmp = DistributionComparison::build(&dataset(&["No", "No"]), &config).unwrap();
        assert_eq!(cmp.class_order, vec!["No", "Yes"]);
        assert_eq!(cmp.observed.shares.len(), 1);
        assert_eq!(cmp.post_balancing.shares.len(), 2);
    }
}
