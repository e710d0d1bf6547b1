use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Check whether a raw cell value counts as missing
///
/// Empty cells and the usual CSV/JSON spellings of "no value" are treated
/// as missing; the JSON loader renders JSON null as the string "null".
pub fn is_missing(value: &str) -> bool {
    value.is_empty()
        || value.eq_ignore_ascii_case("null")
        || value.eq_ignore_ascii_case("na")
        || value.eq_ignore_ascii_case("nan")
}

/// Declared type of a column, inferred at ingestion time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// Every non-missing cell parses as a finite number
    Numeric,
    /// At least one non-missing cell is not numeric
    Text,
}

/// Represents a single data row with named fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataPoint {
    pub fields: HashMap<String, String>,
}

impl DataPoint {
    /// Create a new data point
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Add a field to the data point
    pub fn add_field(&mut self, key: String, value: String) {
        self.fields.insert(key, value);
    }

    /// Get a field value
    pub fn get_field(&self, key: &str) -> Option<&String> {
        self.fields.get(key)
    }

    /// Parse a numeric field value; missing or non-finite cells yield None
    pub fn get_numeric(&self, key: &str) -> Option<f64> {
        let raw = self.get_field(key)?;
        if is_missing(raw) {
            return None;
        }
        raw.parse().ok().filter(|v: &f64| v.is_finite())
    }
}

impl Default for DataPoint {
    fn default() -> Self {
        Self::new()
    }
}

/// A collection of data rows with a stable column order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub columns: Vec<String>,
    pub data: Vec<DataPoint>,
}

impl Dataset {
    /// Create a new empty dataset
    pub fn new(name: String) -> Self {
        Self {
            name,
            columns: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Register a column, keeping first-seen order
    pub fn add_column(&mut self, name: &str) {
        if !self.columns.iter().any(|c| c == name) {
            self.columns.push(name.to_string());
        }
    }

    /// Add a data point to the dataset
    pub fn add_point(&mut self, point: DataPoint) {
        self.data.push(point);
    }

    /// Get the number of data points
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if dataset is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Infer the column manifest: a column is numeric when every
    /// non-missing cell parses as a finite f64
    pub fn column_types(&self) -> Vec<(String, ColumnType)> {
        self.columns
            .iter()
            .map(|column| {
                let numeric = self.data.iter().all(|point| match point.get_field(column) {
                    None => true,
                    Some(value) if is_missing(value) => true,
                    Some(value) => value.parse::<f64>().map(|v| v.is_finite()).unwrap_or(false),
                });
                let ty = if numeric {
                    ColumnType::Numeric
                } else {
                    ColumnType::Text
                };
                (column.clone(), ty)
            })
            .collect()
    }

    /// Names of the numeric columns, in dataset order
    pub fn numeric_columns(&self) -> Vec<String> {
        self.column_types()
            .into_iter()
            .filter(|(_, ty)| *ty == ColumnType::Numeric)
            .map(|(name, _)| name)
            .collect()
    }

    /// Load dataset from CSV
    pub fn from_csv(name: String, csv_data: &str) -> crate::Result<Self> {
        let mut dataset = Dataset::new(name);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_data.as_bytes());

        let headers = reader.headers()?.clone();
        for header in headers.iter() {
            dataset.add_column(header);
        }

        for result in reader.records() {
            let record = result?;
            let mut point = DataPoint::new();

            for (i, field) in record.iter().enumerate() {
                if let Some(header) = headers.get(i) {
                    point.add_field(header.to_string(), field.to_string());
                }
            }
            dataset.add_point(point);
        }

        Ok(dataset)
    }

    /// Load dataset from JSON array
    pub fn from_json(name: String, json_data: &str) -> crate::Result<Self> {
        let mut dataset = Dataset::new(name);
        let rows: Vec<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_str(json_data)?;

        for row in rows {
            let mut point = DataPoint::new();
            for (key, value) in row {
                let value_str = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    serde_json::Value::Null => "null".to_string(),
                    other => other.to_string(),
                };
                dataset.add_column(&key);
                point.add_field(key, value_str);
            }
            dataset.add_point(point);
        }

        Ok(dataset)
    }

    /// Encode the dataset as CSV, columns in dataset order
    pub fn to_csv(&self) -> crate::Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.columns)?;

        for point in &self.data {
            let row: Vec<&str> = self
                .columns
                .iter()
                .map(|column| point.get_field(column).map(String::as_str).unwrap_or(""))
                .collect();
            writer.write_record(&row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| std::io::Error::new(e.error().kind(), e.error().to_string()))?;
        Ok(String::from_utf8(bytes)?)
    }
}
