//! Host-agnostic chart descriptions.
//!
//! A [`ChartRequest`] carries everything a rendering host needs: the
//! computed data (bins, box statistics, slices, bar counts) and the
//! cosmetic choices (titles, palette, sizes). Colors are hex strings so
//! requests can be serialized and inspected without a display.

pub mod stats;

use serde::{Deserialize, Serialize};

pub use stats::{BoxStats, CountTable, Histogram, PieSlice};

// ---------------------------------------------------------------------------
// Palettes
// ---------------------------------------------------------------------------

/// Named qualitative palettes, cycled when there are more series than colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// Matplotlib's default color cycle.
    Tab10,
    /// ColorBrewer Set2.
    Set2,
    /// ColorBrewer Set3.
    Set3,
    /// Explicit list of hex colors.
    Custom(Vec<String>),
}

const TAB10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

const SET2: [&str; 8] = [
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];

const SET3: [&str; 12] = [
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

impl Palette {
    /// Hex color of the `i`-th series.
    pub fn color(&self, i: usize) -> String {
        match self {
            Palette::Tab10 => TAB10[i % TAB10.len()].to_string(),
            Palette::Set2 => SET2[i % SET2.len()].to_string(),
            Palette::Set3 => SET3[i % SET3.len()].to_string(),
            Palette::Custom(colors) if !colors.is_empty() => colors[i % colors.len()].clone(),
            Palette::Custom(_) => TAB10[i % TAB10.len()].to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Chart request
// ---------------------------------------------------------------------------

/// Options specific to pie charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieStyle {
    /// Degrees, counter-clockwise from the positive x axis.
    pub start_angle: f64,
    /// Radial offset of every slice, as a fraction of the radius.
    pub explode: f64,
    pub shadow: bool,
    /// Decimals of the percentage labels.
    pub pct_decimals: usize,
    pub font_size: f32,
}

impl Default for PieStyle {
    fn default() -> Self {
        Self {
            start_angle: 90.0,
            explode: 0.0,
            shadow: true,
            pct_decimals: 1,
            font_size: 9.0,
        }
    }
}

/// Cosmetic options of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub palette: Palette,
    /// Outline color of bars and boxes.
    pub edge_color: Option<String>,
    /// `None` suppresses the legend.
    pub legend_title: Option<String>,
    /// Width and height in inches.
    pub figure_size: [f32; 2],
    pub pie: Option<PieStyle>,
}

impl ChartStyle {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: None,
            y_label: None,
            palette: Palette::Tab10,
            edge_color: None,
            legend_title: None,
            figure_size: [6.0, 4.0],
            pie: None,
        }
    }
}

/// Chart kind together with its computed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartData {
    Histogram(Histogram),
    /// One box per group, in display order.
    BoxPlot { groups: Vec<BoxStats> },
    Pie { slices: Vec<PieSlice> },
    CountPlot(CountTable),
}

impl ChartData {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ChartData::Histogram(_) => "histogram",
            ChartData::BoxPlot { .. } => "boxplot",
            ChartData::Pie { .. } => "pie",
            ChartData::CountPlot(_) => "countplot",
        }
    }
}

/// One chart to render: built, handed to a host once, then dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Field the chart summarises.
    pub source: String,
    /// Grouping field, the outcome column when present.
    pub group_by: Option<String>,
    pub data: ChartData,
    pub style: ChartStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_cycle() {
        assert_eq!(Palette::Set2.color(0), "#66c2a5");
        assert_eq!(Palette::Set2.color(8), "#66c2a5");
        assert_eq!(Palette::Set3.color(13), "#ffffb3");
        let custom = Palette::Custom(vec!["#000000".into(), "#ffffff".into()]);
        assert_eq!(custom.color(3), "#ffffff");
        assert_eq!(Palette::Custom(vec![]).color(1), "#ff7f0e");
    }

    #[test]
    fn chart_data_serializes_with_kind_tag() {
        let data = ChartData::Pie { slices: vec![] };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["kind"], "pie");
    }
}
