use crate::schema::{FeatureRow, CATEGORICAL_FIELDS, NUMERIC_FIELDS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One-hot layout for a single categorical field: one binary column per
/// category observed at fit time, sorted lexicographically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotField {
    pub field: String,
    pub categories: Vec<String>,
}

/// Fitted preprocessing transform.
///
/// Expands the categorical fields into a one-hot block (fields in declared
/// order, categories sorted within each field), then appends the numeric
/// fields unchanged. The resulting column count and order are fixed at fit
/// time and owned by the persisted artifact.
///
/// A categorical value not observed at fit time encodes as all-zero across
/// that field's columns; it is never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureEncoder {
    categorical: Vec<OneHotField>,
    numeric: Vec<String>,
}

impl FeatureEncoder {
    /// Learn the category tables from training rows.
    pub fn fit(rows: &[FeatureRow]) -> Self {
        let categorical = CATEGORICAL_FIELDS
            .iter()
            .map(|&field| {
                let categories: BTreeSet<String> = rows
                    .iter()
                    .filter_map(|row| row.categorical(field))
                    .map(str::to_string)
                    .collect();
                OneHotField {
                    field: field.to_string(),
                    categories: categories.into_iter().collect(),
                }
            })
            .collect();

        Self {
            categorical,
            numeric: NUMERIC_FIELDS.iter().map(|&f| f.to_string()).collect(),
        }
    }

    /// Total width of the encoded vector.
    pub fn n_columns(&self) -> usize {
        let one_hot: usize = self.categorical.iter().map(|f| f.categories.len()).sum();
        one_hot + self.numeric.len()
    }

    /// Column labels in output order, e.g. `sex=female` ... `age`.
    pub fn column_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.n_columns());
        for field in &self.categorical {
            for category in &field.categories {
                names.push(format!("{}={}", field.field, category));
            }
        }
        names.extend(self.numeric.iter().cloned());
        names
    }

    /// Encode one row into the fitted column layout.
    pub fn transform(&self, row: &FeatureRow) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.n_columns());
        for field in &self.categorical {
            let value = row.categorical(&field.field);
            for category in &field.categories {
                let hit = value == Some(category.as_str());
                out.push(if hit { 1.0 } else { 0.0 });
            }
        }
        for field in &self.numeric {
            // Numeric fields are declared in the schema, so the lookup
            // always succeeds; 0.0 keeps the function total regardless.
            out.push(row.numeric(field).unwrap_or(0.0));
        }
        out
    }

    /// Encode a batch of rows.
    pub fn transform_batch(&self, rows: &[FeatureRow]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.transform(row)).collect()
    }
}
