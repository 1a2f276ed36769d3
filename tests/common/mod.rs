#![allow(dead_code)] // not every test binary uses every fixture

use insurance_predictor::dataset::Dataset;
use insurance_predictor::gbdt::GbmParams;
use insurance_predictor::pipeline::FittedPipeline;
use insurance_predictor::schema::FeatureRow;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const REGIONS: [&str; 4] = ["northeast", "northwest", "southeast", "southwest"];

/// Deterministic synthetic insurance data. Charges follow a simple additive
/// model with a large smoker surcharge, so a trained regressor must rank
/// smokers far above otherwise-identical non-smokers.
pub fn synthetic_dataset(n: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(n);
    let mut charges = Vec::with_capacity(n);

    for i in 0..n {
        let age = rng.gen_range(18..65u32);
        let bmi = rng.gen_range(18.0..40.0f64);
        let children = rng.gen_range(0..4u32);
        let smoker = i % 4 == 0;
        let region = REGIONS[i % REGIONS.len()];
        let sex = if i % 2 == 0 { "male" } else { "female" };

        let charge = 2500.0
            + 260.0 * f64::from(age)
            + 80.0 * bmi
            + 450.0 * f64::from(children)
            + if smoker { 22_000.0 } else { 0.0 }
            + rng.gen_range(-500.0..500.0);

        rows.push(FeatureRow {
            age,
            sex: sex.to_string(),
            bmi,
            children,
            smoker: if smoker { "yes" } else { "no" }.to_string(),
            region: region.to_string(),
        });
        charges.push(charge);
    }

    Dataset { rows, charges }
}

pub fn training_params() -> GbmParams {
    GbmParams {
        n_estimators: 40,
        ..GbmParams::default()
    }
}

/// A pipeline trained on the synthetic data, for adapter tests.
pub fn trained_pipeline() -> FittedPipeline {
    let dataset = synthetic_dataset(160, 7);
    let (train, _test) = dataset.train_test_split(0.2, 42);
    FittedPipeline::fit(&train, &training_params()).unwrap()
}

pub fn feature_row(
    age: u32,
    sex: &str,
    bmi: f64,
    children: u32,
    smoker: &str,
    region: &str,
) -> FeatureRow {
    FeatureRow {
        age,
        sex: sex.to_string(),
        bmi,
        children,
        smoker: smoker.to_string(),
        region: region.to_string(),
    }
}
