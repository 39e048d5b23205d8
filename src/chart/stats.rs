//! The numbers behind each chart kind.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::model::CellValue;

/// Whisker reach in multiples of the inter-quartile range.
const WHISKER_IQR: f64 = 1.5;

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width bins; `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning their range.
    ///
    /// Each bin is half-open except the last, which includes the maximum.
    /// A constant sample spans `[v - 0.5, v + 0.5]`, an empty one `[0, 1]`.
    pub fn compute(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if values.is_empty() {
            lo = 0.0;
            hi = 1.0;
        } else if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + width * i as f64 })
            .collect();

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Histogram { edges, counts }
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }
}

// ---------------------------------------------------------------------------
// Box plot statistics
// ---------------------------------------------------------------------------

/// Five-number summary of one group plus its outliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub group: String,
    pub count: usize,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// `None` for an empty sample.
    pub fn compute(group: impl Into<String>, values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        let inside = sorted.iter().filter(|&&v| v >= low_fence && v <= high_fence);
        let lower_whisker = inside.clone().copied().fold(f64::INFINITY, f64::min);
        let upper_whisker = inside.copied().fold(f64::NEG_INFINITY, f64::max);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < low_fence || v > high_fence)
            .collect();

        Some(BoxStats {
            group: group.into(),
            count: sorted.len(),
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        })
    }
}

/// Linear-interpolation quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// ---------------------------------------------------------------------------
// Category frequencies
// ---------------------------------------------------------------------------

/// One slice of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    /// Raw weight: a count, or a percentage for constant distributions.
    pub value: f64,
    /// Share of the whole, 0–100.
    pub percent: f64,
}

impl PieSlice {
    /// Slices from `(label, weight)` pairs, in the given order.
    pub fn from_weights(weights: &[(String, f64)]) -> Vec<Self> {
        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        weights
            .iter()
            .map(|(label, w)| PieSlice {
                label: label.clone(),
                value: *w,
                percent: if total > 0.0 { w / total * 100.0 } else { 0.0 },
            })
            .collect()
    }
}

/// Counts per label, most frequent first; ties keep first appearance.
pub fn value_counts<I, S>(labels: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for label in labels {
        let label = label.into();
        match index.get(&label) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(label.clone(), counts.len());
                counts.push((label, 1));
            }
        }
    }
    // Stable sort keeps appearance order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Distinct labels in order of first appearance.
pub fn appearance_order<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        let label = label.into();
        if !out.contains(&label) {
            out.push(label);
        }
    }
    out
}

/// Display order of a categorical axis: ascending when every value is
/// numeric, otherwise order of first appearance. Missing cells are skipped.
pub fn category_order(cells: &[&CellValue]) -> Vec<String> {
    let present: Vec<&CellValue> = cells.iter().copied().filter(|c| !c.is_missing()).collect();
    if !present.is_empty() && present.iter().all(|c| c.as_f64().is_some()) {
        let mut numeric: Vec<&CellValue> = present;
        numeric.sort();
        appearance_order(numeric.into_iter().map(|c| c.to_string()))
    } else {
        appearance_order(present.into_iter().map(|c| c.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Grouped counts
// ---------------------------------------------------------------------------

/// Bar heights of a grouped count plot: `counts[category][group]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountTable {
    pub categories: Vec<String>,
    pub groups: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl CountTable {
    /// Cross-tabulate `(category, group)` pairs over the given orders.
    /// Pairs whose category or group is not listed are ignored.
    pub fn compute(categories: Vec<String>, groups: Vec<String>, pairs: &[(String, String)]) -> Self {
        let mut counts = vec![vec![0usize; groups.len()]; categories.len()];
        for (cat, group) in pairs {
            let ci = categories.iter().position(|c| c == cat);
            let gi = groups.iter().position(|g| g == group);
            if let (Some(ci), Some(gi)) = (ci, gi) {
                counts[ci][gi] += 1;
            }
        }
        CountTable {
            categories,
            groups,
            counts,
        }
    }

    /// Bars drawn: one per category and group present.
    pub fn bar_count(&self) -> usize {
        self.categories.len() * self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_of_one_to_ten_has_ten_unit_bins() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let h = Histogram::compute(&values, 10);
        assert_eq!(h.bin_count(), 10);
        assert_eq!(h.edges.len(), 11);
        assert_eq!(h.edges[0], 1.0);
        assert_eq!(h.edges[10], 10.0);
        // Max lands in the closed last bin.
        assert_eq!(h.counts, vec![1; 10]);
    }

    #[test]
    fn histogram_of_constant_sample_is_centred() {
        let h = Histogram::compute(&[5.0, 5.0, 5.0], 10);
        assert_eq!(h.edges[0], 4.5);
        assert_eq!(h.edges[10], 5.5);
        assert_eq!(h.counts[5], 3);
    }

    #[test]
    fn histogram_of_empty_sample_spans_unit_interval() {
        let h = Histogram::compute(&[], 4);
        assert_eq!(h.edges, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(h.counts, vec![0; 4]);
    }

    #[test]
    fn box_stats_interpolate_quartiles() {
        let values: Vec<f64> = (1..=9).map(f64::from).collect();
        let b = BoxStats::compute("No", &values).unwrap();
        assert_eq!(b.q1, 3.0);
        assert_eq!(b.median, 5.0);
        assert_eq!(b.q3, 7.0);
        assert_eq!(b.lower_whisker, 1.0);
        assert_eq!(b.upper_whisker, 9.0);
        assert!(b.outliers.is_empty());
    }

    #[test]
    fn box_stats_flag_outliers_beyond_fences() {
        let b = BoxStats::compute("Yes", &[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!(b.outliers, vec![100.0]);
        assert_eq!(b.upper_whisker, 4.0);
        assert!(BoxStats::compute("empty", &[]).is_none());
    }

    #[test]
    fn value_counts_sort_by_frequency_then_appearance() {
        let counts = value_counts(["b", "a", "a", "c", "b", "a"]);
        assert_eq!(
            counts,
            vec![("a".into(), 3), ("b".into(), 2), ("c".into(), 1)]
        );
        let tied = value_counts(["x", "y"]);
        assert_eq!(tied[0].0, "x");
    }

    #[test]
    fn pie_slices_from_counts_sum_to_hundred() {
        let slices = PieSlice::from_weights(&[
            ("High".into(), 1.0),
            ("Low".into(), 1.0),
            ("Medium".into(), 1.0),
        ]);
        let total: f64 = slices.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn numeric_categories_sort_and_text_keeps_appearance() {
        let cells = [
            CellValue::Integer(3),
            CellValue::Integer(1),
            CellValue::Null,
            CellValue::Integer(3),
        ];
        let refs: Vec<&CellValue> = cells.iter().collect();
        assert_eq!(category_order(&refs), vec!["1", "3"]);

        let cells = [CellValue::String("Low".into()), CellValue::String("High".into())];
        let refs: Vec<&CellValue> = cells.iter().collect();
        assert_eq!(category_order(&refs), vec!["Low", "High"]);
    }

    #[test]
    fn count_table_cross_tabulates() {
        let pairs = vec![
            ("Male".to_string(), "No".to_string()),
            ("Male".to_string(), "Yes".to_string()),
            ("Female".to_string(), "No".to_string()),
            ("Male".to_string(), "No".to_string()),
        ];
        let t = CountTable::compute(
            vec!["Male".into(), "Female".into()],
            vec!["No".into(), "Yes".into()],
            &pairs,
        );
        assert_eq!(t.counts, vec![vec![2, 1], vec![1, 0]]);
        assert_eq!(t.bar_count(), 4);
    }
}
