use std::collections::BTreeMap;
use std::fmt;

use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
/// `Ord` gives numeric category axes their ascending order.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord: floats have no total order of their own --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) | Float(_) => 2,
                String(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (String(a), String(b)) => a.cmp(b),
            // Mixed Integer/Float columns sort numerically.
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x
                    .total_cmp(&y)
                    .then_with(|| matches!(a, Float(_)).cmp(&matches!(b, Float(_)))),
                _ => std::cmp::Ordering::Equal,
            },
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Numeric value usable on a chart axis; `inf` and NaN are excluded.
    pub fn finite_f64(&self) -> Option<f64> {
        self.as_f64().filter(|v| v.is_finite())
    }

    /// Missing cells: explicit nulls and NaN floats.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Label used when the value is shown as a category.
    pub fn label(&self) -> Option<String> {
        if self.is_missing() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// A single record (one row of the source table).
#[derive(Debug, Clone, Default)]
pub struct Record {
    /// field name → value.
    pub fields: BTreeMap<String, CellValue>,
}

impl Record {
    /// Value for `field`, `Null` when the record lacks it.
    pub fn get(&self, field: &str) -> &CellValue {
        static NULL: CellValue = CellValue::Null;
        self.fields.get(field).unwrap_or(&NULL)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records (rows).
    pub records: Vec<Record>,
    /// Column names in source order.
    pub column_names: Vec<String>,
}

impl Dataset {
    /// Assemble a dataset from loaded records.
    ///
    /// Every record is padded with `Null` for columns it lacks, so each
    /// record holds a value for every declared column.
    pub fn from_records(column_names: Vec<String>, mut records: Vec<Record>) -> Self {
        for rec in &mut records {
            for col in &column_names {
                rec.fields.entry(col.clone()).or_insert(CellValue::Null);
            }
        }

        Dataset {
            records,
            column_names,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    fn require(&self, field: &str) -> Result<(), DashboardError> {
        if self.has_column(field) {
            Ok(())
        } else {
            Err(DashboardError::MissingField(field.to_string()))
        }
    }

    /// All cells of one column, in record order.
    pub fn column(&self, field: &str) -> Result<Vec<&CellValue>, DashboardError> {
        self.require(field)?;
        Ok(self.records.iter().map(|r| r.get(field)).collect())
    }

    /// Non-missing, finite numeric values of a column.
    ///
    /// Infinite values are skipped like missing ones. Fails on the first
    /// cell that is neither missing nor numeric.
    pub fn numeric_values(&self, field: &str) -> Result<Vec<f64>, DashboardError> {
        self.require(field)?;
        let mut out = Vec::with_capacity(self.records.len());
        for (row, rec) in self.records.iter().enumerate() {
            let cell = rec.get(field);
            if cell.is_missing() {
                continue;
            }
            match cell.as_f64() {
                Some(v) if v.is_finite() => out.push(v),
                Some(_) => {}
                None => {
                    return Err(DashboardError::NotNumeric {
                        field: field.to_string(),
                        row,
                        value: cell.to_string(),
                    })
                }
            }
        }
        Ok(out)
    }

    /// Non-missing labels of a column, in record order.
    pub fn labels(&self, field: &str) -> Result<Vec<String>, DashboardError> {
        Ok(self
            .column(field)?
            .into_iter()
            .filter_map(CellValue::label)
            .collect())
    }

    /// `(value, outcome label)` pairs for records where the outcome is present.
    pub fn paired_with<'a>(
        &'a self,
        field: &str,
        outcome: &str,
    ) -> Result<Vec<(&'a CellValue, String)>, DashboardError> {
        self.require(field)?;
        self.require(outcome)?;
        Ok(self
            .records
            .iter()
            .filter_map(|r| r.get(outcome).label().map(|o| (r.get(field), o)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, CellValue)]) -> Record {
        Record {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn from_records_pads_missing_columns_with_null() {
        let ds = Dataset::from_records(
            vec!["a".into(), "b".into()],
            vec![record(&[("a", CellValue::Integer(1))])],
        );
        assert_eq!(ds.records[0].fields.get("b"), Some(&CellValue::Null));
        assert_eq!(ds.records[0].get("c"), &CellValue::Null);
    }

    #[test]
    fn numeric_values_skip_missing_and_reject_text() {
        let ds = Dataset::from_records(
            vec!["x".into()],
            vec![
                record(&[("x", CellValue::Integer(3))]),
                record(&[("x", CellValue::Null)]),
                record(&[("x", CellValue::Float(f64::NAN))]),
                record(&[("x", CellValue::Float(f64::INFINITY))]),
                record(&[("x", CellValue::Float(1.5))]),
            ],
        );
        assert_eq!(ds.numeric_values("x").unwrap(), vec![3.0, 1.5]);

        let bad = Dataset::from_records(
            vec!["x".into()],
            vec![record(&[("x", CellValue::String("high".into()))])],
        );
        assert!(matches!(
            bad.numeric_values("x"),
            Err(DashboardError::NotNumeric { row: 0, .. })
        ));
    }

    #[test]
    fn column_reports_missing_field() {
        let ds = Dataset::from_records(vec!["x".into()], vec![]);
        assert_eq!(
            ds.column("y").unwrap_err(),
            DashboardError::MissingField("y".into())
        );
    }

    #[test]
    fn integer_and_float_order_numerically() {
        let mut cells = vec![
            CellValue::Float(2.5),
            CellValue::Integer(3),
            CellValue::Integer(1),
        ];
        cells.sort();
        let ordered: Vec<_> = cells.iter().map(|v| v.to_string()).collect();
        assert_eq!(ordered, vec!["1", "2.5", "3"]);
    }
}
