use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::chart::ChartRequest;
use crate::config::{AttributeSpec, DashboardConfig};
use crate::data::model::Dataset;
use crate::distribution::DistributionComparison;
use crate::render::AttributeRenderer;

/// One display tab: an attribute and the charts rendered into it.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeTab {
    pub spec: AttributeSpec,
    pub heading: String,
    /// Charts in left-to-right order.
    pub charts: Vec<ChartRequest>,
}

/// Everything the window shows for one loaded dataset.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub source: PathBuf,
    pub record_count: usize,
    pub tabs: Vec<AttributeTab>,
    pub distribution: DistributionComparison,
}

impl Dashboard {
    /// Render every configured attribute into its own tab, in order, then
    /// the outcome distribution comparison. The first failure aborts the pass.
    pub fn build(source: &Path, dataset: &Dataset, config: &DashboardConfig) -> Result<Self> {
        let renderer = AttributeRenderer::new(config);

        let mut tabs = Vec::with_capacity(config.attributes.len());
        for spec in &config.attributes {
            let mut charts: Vec<ChartRequest> = Vec::with_capacity(2);
            renderer
                .render(dataset, spec, &mut charts)
                .with_context(|| format!("rendering attribute '{}'", spec.name))?;
            tabs.push(AttributeTab {
                spec: spec.clone(),
                heading: format!("{} Analysis", spec.name),
                charts,
            });
        }

        let distribution = DistributionComparison::build(dataset, config)
            .context("computing outcome distribution")?;

        log::info!(
            "Built dashboard with {} tabs from {} records",
            tabs.len(),
            dataset.len()
        );

        Ok(Self {
            source: source.to_path_buf(),
            record_count: dataset.len(),
            tabs,
            distribution,
        })
    }

    /// Write the dashboard as pretty-printed JSON.
    pub fn export_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), self)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported dashboard to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};

    fn dataset() -> Dataset {
        let records = [("Male", 40, "No"), ("Female", 61, "Yes"), ("Male", 55, "No")]
            .iter()
            .map(|(g, a, o)| Record {
                fields: [
                    ("Gender".to_string(), CellValue::String(g.to_string())),
                    ("Age".to_string(), CellValue::Integer(*a)),
                    ("Heart Disease Status".to_string(), CellValue::String(o.to_string())),
                ]
                .into_iter()
                .collect(),
            })
            .collect();
        Dataset::from_records(
            vec!["Age".into(), "Gender".into(), "Heart Disease Status".into()],
            records,
        )
    }

    #[test]
    fn one_tab_per_attribute_in_declared_order() {
        let config = DashboardConfig {
            attributes: vec![
                AttributeSpec::categorical("Gender"),
                AttributeSpec::numerical("Age"),
            ],
            ..DashboardConfig::default()
        };
        let dash = Dashboard::build(Path::new("mem.csv"), &dataset(), &config).unwrap();
        let names: Vec<&str> = dash.tabs.iter().map(|t| t.spec.name.as_str()).collect();
        assert_eq!(names, vec!["Gender", "Age"]);
        assert!(dash.tabs.iter().all(|t| t.charts.len() == 2));
        assert_eq!(dash.tabs[1].heading, "Age Analysis");
        assert_eq!(dash.record_count, 3);
    }

    #[test]
    fn missing_attribute_aborts_the_whole_pass() {
        let config = DashboardConfig {
            attributes: vec![
                AttributeSpec::numerical("Age"),
                AttributeSpec::numerical("BMI"),
            ],
            ..DashboardConfig::default()
        };
        let err = Dashboard::build(Path::new("mem.csv"), &dataset(), &config).unwrap_err();
        assert!(format!("{err:#}").contains("'BMI'"));
    }
}
