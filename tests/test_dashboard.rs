//! End-to-end: file on disk → dashboard → JSON export

use heart_dashboard::chart::ChartData;
use heart_dashboard::config::{AttributeKind, DashboardConfig, PERCENT_TOLERANCE};
use heart_dashboard::state::AppState;
use tempfile::TempDir;

mod common;

use common::{sample_config, write_file, write_sample_parquet, SAMPLE_CSV};

#[test]
fn test_tabs_follow_declared_kinds() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "sample.csv", SAMPLE_CSV);
    let config = sample_config();

    let dash = AppState::build_dashboard(&path, &config).unwrap();

    assert_eq!(dash.tabs.len(), config.attributes.len());
    for tab in &dash.tabs {
        let kinds: Vec<&str> = tab.charts.iter().map(|c| c.data.kind_name()).collect();
        match tab.spec.kind {
            AttributeKind::Numerical => assert_eq!(kinds, vec!["histogram", "boxplot"]),
            AttributeKind::Categorical => assert_eq!(kinds, vec!["pie", "countplot"]),
        }
    }
}

#[test]
fn test_observed_distribution_skips_missing_outcome() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "sample.csv", SAMPLE_CSV);

    let dash = AppState::build_dashboard(&path, &sample_config()).unwrap();
    let observed = &dash.distribution.observed;

    assert_eq!(observed.percent_of("No"), Some(75.0));
    assert_eq!(observed.percent_of("Yes"), Some(25.0));
    assert!((observed.total() - 100.0).abs() <= PERCENT_TOLERANCE);
    assert_eq!(dash.distribution.class_order, vec!["No", "Yes"]);
}

#[test]
fn test_boxplot_excludes_missing_values() {
    let dir = TempDir::new().unwrap();
    let path = write_sample_parquet(&dir);

    let dash = AppState::build_dashboard(&path, &sample_config()).unwrap();
    let bmi = dash.tabs.iter().find(|t| t.spec.name == "BMI").unwrap();

    let ChartData::BoxPlot { groups } = &bmi.charts[1].data else {
        panic!("expected boxplot");
    };
    // Row 2 has no BMI, row 5 has no outcome: only the three "No" rows remain.
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].group, "No");
    assert_eq!(groups[0].count, 3);
}

#[test]
fn test_export_writes_every_tab() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "sample.csv", SAMPLE_CSV);
    let out = dir.path().join("dashboard.json");

    let dash = AppState::build_dashboard(&path, &sample_config()).unwrap();
    dash.export_json(&out).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let tabs = json["tabs"].as_array().unwrap();
    assert_eq!(tabs.len(), 4);
    assert_eq!(tabs[0]["charts"][0]["data"]["kind"], "histogram");
    assert_eq!(tabs[2]["charts"][0]["data"]["kind"], "pie");
    assert_eq!(
        json["distribution"]["post_balancing_chart"]["style"]["title"],
        "Heart Disease Status (After SMOTE)"
    );
}

#[test]
fn test_config_file_drives_attribute_list() {
    let dir = TempDir::new().unwrap();
    let data = write_file(&dir, "sample.csv", SAMPLE_CSV);
    let cfg = write_file(
        &dir,
        "config.json",
        r#"{ "attributes": [ { "name": "Smoking", "kind": "categorical" } ], "histogram_bins": 5 }"#,
    );

    let config = DashboardConfig::load(Some(&cfg)).unwrap();
    let dash = AppState::build_dashboard(&data, &config).unwrap();

    assert_eq!(dash.tabs.len(), 1);
    assert_eq!(dash.tabs[0].heading, "Smoking Analysis");
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let cfg = write_file(&dir, "config.json", r#"{ "attributes": [] }"#);
    let err = DashboardConfig::load(Some(&cfg)).unwrap_err();
    assert!(format!("{err:#}").contains("attribute list is empty"));
}
