use crate::chart::stats::{appearance_order, category_order, value_counts};
use crate::chart::{
    BoxStats, ChartData, ChartRequest, ChartStyle, CountTable, Histogram, Palette, PieSlice,
    PieStyle,
};
use crate::config::{AttributeKind, AttributeSpec, DashboardConfig};
use crate::data::model::{CellValue, Dataset};
use crate::error::DashboardError;

const HISTOGRAM_FILL: &str = "#87ceeb";
const EDGE_BLACK: &str = "#000000";

// ---------------------------------------------------------------------------
// Rendering host
// ---------------------------------------------------------------------------

/// Anything that can display a chart. Charts arrive left to right.
pub trait ChartHost {
    fn render(&mut self, chart: ChartRequest);
}

/// Collecting host: keeps requests in arrival order.
impl ChartHost for Vec<ChartRequest> {
    fn render(&mut self, chart: ChartRequest) {
        self.push(chart);
    }
}

// ---------------------------------------------------------------------------
// Attribute renderer
// ---------------------------------------------------------------------------

/// Builds the two-chart summary of an attribute according to its kind.
pub struct AttributeRenderer<'a> {
    config: &'a DashboardConfig,
}

impl<'a> AttributeRenderer<'a> {
    pub fn new(config: &'a DashboardConfig) -> Self {
        Self { config }
    }

    fn outcome(&self) -> &str {
        &self.config.outcome.column
    }

    /// Render `spec` and hand both charts to `host`, left then right.
    pub fn render(
        &self,
        dataset: &Dataset,
        spec: &AttributeSpec,
        host: &mut impl ChartHost,
    ) -> Result<(), DashboardError> {
        let (left, right) = match spec.kind {
            AttributeKind::Numerical => self.render_numerical(dataset, &spec.name)?,
            AttributeKind::Categorical => self.render_categorical(dataset, &spec.name)?,
        };
        host.render(left);
        host.render(right);
        Ok(())
    }

    /// Histogram of the values and a boxplot of the values per outcome class.
    pub fn render_numerical(
        &self,
        dataset: &Dataset,
        field: &str,
    ) -> Result<(ChartRequest, ChartRequest), DashboardError> {
        let outcome = self.outcome();
        let values = dataset.numeric_values(field)?;
        let histogram = ChartRequest {
            source: field.to_string(),
            group_by: None,
            data: ChartData::Histogram(Histogram::compute(&values, self.config.histogram_bins)),
            style: ChartStyle {
                x_label: Some(field.to_string()),
                y_label: Some("Frequency".into()),
                palette: Palette::Custom(vec![HISTOGRAM_FILL.into()]),
                edge_color: Some(EDGE_BLACK.into()),
                ..ChartStyle::titled(format!("Distribution of {field}"))
            },
        };

        let pairs = dataset.paired_with(field, outcome)?;
        let classes = appearance_order(pairs.iter().map(|(_, o)| o.as_str()));
        let groups = classes
            .iter()
            .filter_map(|class| {
                let sample: Vec<f64> = pairs
                    .iter()
                    .filter(|(_, o)| o == class)
                    .filter_map(|(v, _)| v.finite_f64())
                    .collect();
                BoxStats::compute(class.as_str(), &sample)
            })
            .collect();
        let boxplot = ChartRequest {
            source: field.to_string(),
            group_by: Some(outcome.to_string()),
            data: ChartData::BoxPlot { groups },
            style: ChartStyle {
                x_label: Some(outcome.to_string()),
                y_label: Some(field.to_string()),
                palette: Palette::Set2,
                legend_title: None,
                ..ChartStyle::titled(format!("{field} vs {outcome}"))
            },
        };

        Ok((histogram, boxplot))
    }

    /// Pie of label frequencies and a countplot of labels per outcome class.
    pub fn render_categorical(
        &self,
        dataset: &Dataset,
        field: &str,
    ) -> Result<(ChartRequest, ChartRequest), DashboardError> {
        let outcome = self.outcome();
        let weights: Vec<(String, f64)> = value_counts(dataset.labels(field)?)
            .into_iter()
            .map(|(label, n)| (label, n as f64))
            .collect();
        let pie = ChartRequest {
            source: field.to_string(),
            group_by: None,
            data: ChartData::Pie {
                slices: PieSlice::from_weights(&weights),
            },
            style: ChartStyle {
                pie: Some(PieStyle::default()),
                ..ChartStyle::titled(format!("Distribution of {field}"))
            },
        };

        // Categories come from the same records that are counted.
        let paired = dataset.paired_with(field, outcome)?;
        let cells: Vec<&CellValue> = paired.iter().map(|(v, _)| *v).collect();
        let categories = category_order(&cells);
        let pairs: Vec<(String, String)> = paired
            .into_iter()
            .filter_map(|(v, o)| v.label().map(|l| (l, o)))
            .collect();
        let groups = appearance_order(pairs.iter().map(|(_, o)| o.as_str()));
        let countplot = ChartRequest {
            source: field.to_string(),
            group_by: Some(outcome.to_string()),
            data: ChartData::CountPlot(CountTable::compute(categories, groups, &pairs)),
            style: ChartStyle {
                x_label: Some(field.to_string()),
                y_label: Some("Count".into()),
                palette: Palette::Set3,
                edge_color: Some(EDGE_BLACK.into()),
                legend_title: Some(self.config.outcome.legend_title.clone()),
                ..ChartStyle::titled(format!("{field} vs {outcome}"))
            },
        };

        Ok((pie, countplot))
    }
}
