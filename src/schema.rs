use serde::{Deserialize, Serialize};

/// Categorical feature fields, in declared encoding order.
pub const CATEGORICAL_FIELDS: [&str; 3] = ["sex", "smoker", "region"];

/// Numeric feature fields, in declared encoding order.
pub const NUMERIC_FIELDS: [&str; 3] = ["age", "bmi", "children"];

/// Name of the training label column.
pub const LABEL_FIELD: &str = "charges";

/// One observation presented to the predictor.
///
/// All six fields are required; deserialization rejects a payload that is
/// missing any of them or carries the wrong type, before the model is ever
/// invoked. Field order in the payload is irrelevant (lookup by name).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeatureRow {
    /// Whole years, expected positive
    pub age: u32,
    pub sex: String,
    /// Body-mass index
    pub bmi: f64,
    /// Number of dependents
    pub children: u32,
    pub smoker: String,
    pub region: String,
}

impl FeatureRow {
    /// The string value of a categorical field, by declared field name.
    pub fn categorical(&self, field: &str) -> Option<&str> {
        match field {
            "sex" => Some(&self.sex),
            "smoker" => Some(&self.smoker),
            "region" => Some(&self.region),
            _ => None,
        }
    }

    /// The numeric value of a numeric field, by declared field name.
    pub fn numeric(&self, field: &str) -> Option<f64> {
        match field {
            "age" => Some(f64::from(self.age)),
            "bmi" => Some(self.bmi),
            "children" => Some(f64::from(self.children)),
            _ => None,
        }
    }
}
