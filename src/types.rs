//! # Common Types
//!
//! Column-oriented input data handed to the chart entry points.

use crate::error::{ChartError, Result};

/// A named sequence of numbers with one string label per value.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Name used in legends; `None` for anonymous data
    pub name: Option<String>,
    /// Row labels (categories, dates, ...)
    pub index: Vec<String>,
    /// Values, one per index label
    pub values: Vec<f64>,
}

impl Series {
    /// Build a series, checking that labels and values line up.
    pub fn new(name: Option<&str>, index: Vec<String>, values: Vec<f64>) -> Result<Self> {
        if index.len() != values.len() {
            return Err(ChartError::LengthMismatch {
                expected: index.len(),
                found: values.len(),
            });
        }
        Ok(Self {
            name: name.map(str::to_string),
            index,
            values,
        })
    }

    /// A series indexed `0..n`.
    pub fn from_values(name: Option<&str>, values: Vec<f64>) -> Self {
        Self {
            name: name.map(str::to_string),
            index: (0..values.len()).map(|i| i.to_string()).collect(),
            values,
        }
    }

    /// Build from `(label, value)` pairs.
    pub fn from_pairs<S: Into<String>>(name: Option<&str>, pairs: impl IntoIterator<Item = (S, f64)>) -> Self {
        let (index, values): (Vec<String>, Vec<f64>) = pairs.into_iter().map(|(k, v)| (k.into(), v)).unzip();
        Self {
            name: name.map(str::to_string),
            index,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest and largest finite value.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        finite_min_max(&self.values)
    }
}

/// Columns of numbers sharing one row index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataFrame {
    index: Vec<String>,
    columns: Vec<(String, Vec<f64>)>,
}

impl DataFrame {
    pub fn new(index: Vec<String>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// Append a column; its length must match the index.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        self.add_column(name, values)?;
        Ok(self)
    }

    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        if values.len() != self.index.len() {
            return Err(ChartError::LengthMismatch {
                expected: self.index.len(),
                found: values.len(),
            });
        }
        self.columns.push((name.into(), values));
        Ok(())
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.index.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns.iter().map(|(name, v)| (name.as_str(), v.as_slice()))
    }

    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
            .ok_or_else(|| ChartError::ColumnNotFound(name.to_string()))
    }

    /// Rename columns in order; extra names are ignored, missing names keep the old ones.
    pub fn rename_columns(&mut self, names: &[String]) {
        for ((name, _), new) in self.columns.iter_mut().zip(names) {
            *name = new.clone();
        }
    }

    /// Row `i` as a vector of values, one per column.
    pub fn row(&self, i: usize) -> Option<Vec<f64>> {
        if i >= self.index.len() {
            return None;
        }
        Some(self.columns.iter().map(|(_, v)| v[i]).collect())
    }

    /// Smallest and largest finite value over all columns.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let all: Vec<f64> = self.columns.iter().flat_map(|(_, v)| v.iter().copied()).collect();
        finite_min_max(&all)
    }
}

impl From<Series> for DataFrame {
    fn from(series: Series) -> Self {
        let name = series.name.unwrap_or_else(|| "value".to_string());
        Self {
            index: series.index,
            columns: vec![(name, series.values)],
        }
    }
}

pub(crate) fn finite_min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
