//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use heart_dashboard::config::{AttributeSpec, DashboardConfig};
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

pub const OUTCOME: &str = "Heart Disease Status";

/// Small heart disease table with one missing BMI and one missing outcome:
///
/// | Age | BMI  | Gender | Smoking | Heart Disease Status |
/// |-----|------|--------|---------|----------------------|
/// | 56  | 27.5 | Male   | Yes     | No                   |
/// | 69  |      | Female | No      | Yes                  |
/// | 46  | 31.2 | Male   | No      | No                   |
/// | 32  | 22.9 | Female | Yes     | No                   |
/// | 60  | 29.0 | Male   | Yes     |                      |
pub const SAMPLE_CSV: &str = "\
Age,BMI,Gender,Smoking,Heart Disease Status
56,27.5,Male,Yes,No
69,,Female,No,Yes
46,31.2,Male,No,No
32,22.9,Female,Yes,No
60,29.0,Male,Yes,
";

/// Config restricted to the sample's attributes.
pub fn sample_config() -> DashboardConfig {
    DashboardConfig {
        attributes: vec![
            AttributeSpec::numerical("Age"),
            AttributeSpec::numerical("BMI"),
            AttributeSpec::categorical("Gender"),
            AttributeSpec::categorical("Smoking"),
        ],
        ..DashboardConfig::default()
    }
}

pub fn write_file(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{body}").unwrap();
    path
}

/// The sample table as a Parquet file.
pub fn write_sample_parquet(dir: &TempDir) -> PathBuf {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Age", DataType::Int64, false),
        Field::new("BMI", DataType::Float64, true),
        Field::new("Gender", DataType::Utf8, false),
        Field::new("Smoking", DataType::Utf8, false),
        Field::new(OUTCOME, DataType::Utf8, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(vec![56, 69, 46, 32, 60])),
        Arc::new(Float64Array::from(vec![
            Some(27.5),
            None,
            Some(31.2),
            Some(22.9),
            Some(29.0),
        ])),
        Arc::new(StringArray::from(vec!["Male", "Female", "Male", "Female", "Male"])),
        Arc::new(StringArray::from(vec!["Yes", "No", "No", "Yes", "Yes"])),
        Arc::new(StringArray::from(vec![
            Some("No"),
            Some("Yes"),
            Some("No"),
            Some("No"),
            None,
        ])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

    let path = dir.path().join("sample.parquet");
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
    path
}
