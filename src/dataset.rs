use crate::error::AppError;
use crate::schema::{FeatureRow, CATEGORICAL_FIELDS, LABEL_FIELD, NUMERIC_FIELDS};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// One labeled CSV record. Columns are addressed by header name, so column
/// order in the file is irrelevant.
#[derive(Debug, Deserialize)]
struct LabeledRecord {
    age: u32,
    sex: String,
    bmi: f64,
    children: u32,
    smoker: String,
    region: String,
    charges: f64,
}

impl LabeledRecord {
    fn into_parts(self) -> (FeatureRow, f64) {
        (
            FeatureRow {
                age: self.age,
                sex: self.sex,
                bmi: self.bmi,
                children: self.children,
                smoker: self.smoker,
                region: self.region,
            },
            self.charges,
        )
    }
}

/// An in-memory labeled dataset: feature rows and their charge labels,
/// index-aligned.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub rows: Vec<FeatureRow>,
    pub charges: Vec<f64>,
}

impl Dataset {
    /// Load a labeled dataset from a CSV file.
    ///
    /// Missing required columns or an empty table are fatal configuration
    /// errors, reported with the offending column names.
    pub fn from_csv_path(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|e| {
            AppError::DatasetError(format!("cannot open {}: {}", path.display(), e))
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a labeled dataset from any CSV reader.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, AppError> {
        let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let missing: Vec<&str> = CATEGORICAL_FIELDS
            .iter()
            .chain(NUMERIC_FIELDS.iter())
            .chain(std::iter::once(&LABEL_FIELD))
            .filter(|&&column| !headers.iter().any(|h| h == column))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(AppError::DatasetError(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }

        let mut rows = Vec::new();
        let mut charges = Vec::new();
        for record in csv_reader.deserialize::<LabeledRecord>() {
            let (row, charge) = record?.into_parts();
            rows.push(row);
            charges.push(charge);
        }

        if rows.is_empty() {
            return Err(AppError::DatasetError("dataset has no rows".to_string()));
        }

        Ok(Self { rows, charges })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Partition into (train, test) with a seeded shuffle.
    ///
    /// The same `test_ratio` and `seed` always produce bit-identical
    /// partitions; the test set takes the first `ceil(n * test_ratio)`
    /// indices of the shuffled order.
    pub fn train_test_split(&self, test_ratio: f64, seed: u64) -> (Dataset, Dataset) {
        let n = self.len();
        let n_test = ((n as f64) * test_ratio).ceil() as usize;

        let mut order: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        order.shuffle(&mut rng);

        let subset = |indices: &[usize]| Dataset {
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            charges: indices.iter().map(|&i| self.charges[i]).collect(),
        };

        let (test_idx, train_idx) = order.split_at(n_test.min(n));
        (subset(train_idx), subset(test_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
age,sex,bmi,children,smoker,region,charges
19,female,27.9,0,yes,southwest,16884.924
18,male,33.77,1,no,southeast,1725.5523
28,male,33.0,3,no,southeast,4449.462
33,male,22.705,0,no,northwest,21984.47061
32,male,28.88,0,no,northwest,3866.8552
31,female,25.74,0,no,southeast,3756.6216
46,female,33.44,1,no,southeast,8240.5896
37,female,27.74,3,no,northwest,7281.5056
37,male,29.83,2,no,northeast,6406.4107
60,female,25.84,0,no,northwest,28923.13692
";

    #[test]
    fn test_load_from_reader() {
        let dataset = Dataset::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 10);
        assert_eq!(dataset.rows[0].age, 19);
        assert_eq!(dataset.rows[0].region, "southwest");
        assert!((dataset.charges[0] - 16884.924).abs() < 1e-9);
    }

    #[test]
    fn test_column_order_is_irrelevant() {
        let reordered = "\
charges,region,smoker,children,bmi,sex,age
16884.924,southwest,yes,0,27.9,female,19
";
        let dataset = Dataset::from_reader(reordered.as_bytes()).unwrap();
        assert_eq!(dataset.rows[0].sex, "female");
        assert!((dataset.charges[0] - 16884.924).abs() < 1e-9);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let no_bmi = "\
age,sex,children,smoker,region,charges
19,female,0,yes,southwest,16884.924
";
        let err = Dataset::from_reader(no_bmi.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("bmi"), "got: {}", err);
    }

    #[test]
    fn test_empty_table_is_fatal() {
        let header_only = "age,sex,bmi,children,smoker,region,charges\n";
        let err = Dataset::from_reader(header_only.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("no rows"), "got: {}", err);
    }

    #[test]
    fn test_split_sizes() {
        let dataset = Dataset::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        let (train, test) = dataset.train_test_split(0.2, 42);
        assert_eq!(test.len(), 2);
        assert_eq!(train.len(), 8);
    }

    #[test]
    fn test_split_is_deterministic_for_a_seed() {
        let dataset = Dataset::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        let (train_a, test_a) = dataset.train_test_split(0.2, 42);
        let (train_b, test_b) = dataset.train_test_split(0.2, 42);
        assert_eq!(train_a.rows, train_b.rows);
        assert_eq!(test_a.rows, test_b.rows);
        assert_eq!(train_a.charges, train_b.charges);

        let (train_c, _) = dataset.train_test_split(0.2, 7);
        assert_ne!(train_a.rows, train_c.rows);
    }

    #[test]
    fn test_split_partitions_every_row_once() {
        let dataset = Dataset::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        let (train, test) = dataset.train_test_split(0.3, 1);
        assert_eq!(train.len() + test.len(), dataset.len());

        let mut all_ages: Vec<u32> = train
            .rows
            .iter()
            .chain(test.rows.iter())
            .map(|r| r.age)
            .collect();
        all_ages.sort_unstable();
        let mut expected: Vec<u32> = dataset.rows.iter().map(|r| r.age).collect();
        expected.sort_unstable();
        assert_eq!(all_ages, expected);
    }
}
