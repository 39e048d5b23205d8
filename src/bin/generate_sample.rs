use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }
}

const NUMERICAL: [(&str, f64, f64, f64); 9] = [
    // name, mean, std-dev, shift for the "Yes" class
    ("Age", 49.0, 18.0, 2.0),
    ("Blood Pressure", 150.0, 17.0, 1.5),
    ("Cholesterol Level", 225.0, 43.0, 3.0),
    ("BMI", 29.0, 6.0, 0.4),
    ("Sleep Hours", 7.0, 1.7, -0.1),
    ("Triglyceride Level", 250.0, 87.0, 4.0),
    ("Fasting Blood Sugar", 120.0, 23.0, 1.0),
    ("CRP Level", 7.5, 4.3, 0.3),
    ("Homocysteine Level", 12.5, 4.3, 0.2),
];

const CATEGORICAL: [(&str, &[&str]); 11] = [
    ("Gender", &["Male", "Female"]),
    ("Exercise Habits", &["Low", "Medium", "High"]),
    ("Smoking", &["Yes", "No"]),
    ("Family Heart Disease", &["Yes", "No"]),
    ("Diabetes", &["Yes", "No"]),
    ("High Blood Pressure", &["Yes", "No"]),
    ("Low HDL Cholesterol", &["Yes", "No"]),
    ("High LDL Cholesterol", &["Yes", "No"]),
    ("Alcohol Consumption", &["Low", "Medium", "High"]),
    ("Stress Level", &["Low", "Medium", "High"]),
    ("Sugar Consumption", &["Low", "Medium", "High"]),
];

const OUTCOME: &str = "Heart Disease Status";
const ROWS: usize = 2000;
const MISSING_RATE: f64 = 0.02;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // Outcome first; roughly 80/20 like the real data.
    let outcome: Vec<&str> = (0..ROWS)
        .map(|_| if rng.chance(0.2) { "Yes" } else { "No" })
        .collect();

    let mut fields: Vec<Field> = Vec::new();
    let mut columns: Vec<ArrayRef> = Vec::new();

    for (name, mean, sd, shift) in NUMERICAL {
        let values: Vec<Option<f64>> = outcome
            .iter()
            .map(|&o| {
                if rng.chance(MISSING_RATE) {
                    return None;
                }
                let m = if o == "Yes" { mean + shift } else { mean };
                let v = rng.gauss(m, sd).max(0.0);
                Some((v * 10.0).round() / 10.0)
            })
            .collect();
        if name == "Age" {
            let ages: Vec<Option<i64>> = values.iter().map(|v| v.map(|a| a.round() as i64)).collect();
            fields.push(Field::new(name, DataType::Int64, true));
            columns.push(Arc::new(Int64Array::from(ages)));
        } else {
            fields.push(Field::new(name, DataType::Float64, true));
            columns.push(Arc::new(Float64Array::from(values)));
        }
    }

    for (name, options) in CATEGORICAL {
        let values: Vec<Option<&str>> = (0..ROWS)
            .map(|_| (!rng.chance(MISSING_RATE)).then(|| rng.pick(options)))
            .collect();
        fields.push(Field::new(name, DataType::Utf8, true));
        columns.push(Arc::new(StringArray::from(values)));
    }

    fields.push(Field::new(OUTCOME, DataType::Utf8, false));
    columns.push(Arc::new(StringArray::from(outcome.clone())));

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    println!(
        "{}",
        arrow::util::pretty::pretty_format_batches(&[batch.slice(0, 5)])
            .context("formatting preview")?
    );

    // ---- Parquet ----
    let parquet_path = "heart_disease.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    println!("Wrote {ROWS} records to {parquet_path}");

    // ---- CSV ----
    let csv_path = "heart_disease.csv";
    let file = std::fs::File::create(csv_path).context("creating CSV file")?;
    arrow::csv::WriterBuilder::new()
        .with_header(true)
        .build(file)
        .write(&batch)
        .context("writing CSV")?;
    println!("Wrote {ROWS} records to {csv_path}");

    Ok(())
}
