//! Training table for the fallback classifier
//!
//! Seven fixed rows of `(age, bmi, goal, preference) -> sport`, the encoded
//! `linfa` dataset built from them, and the seeded holdout split applied
//! before fitting.

use linfa::prelude::{Dataset, Records};
use ndarray::{s, Array1, Array2, Ix1};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::categories::{Goal, Preference, Sport};

/// One labelled example
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingRow {
    pub age: u32,
    pub bmi: f64,
    pub goal: Goal,
    pub preference: Preference,
    pub sport: Sport,
}

const fn row(age: u32, bmi: f64, goal: Goal, preference: Preference, sport: Sport) -> TrainingRow {
    TrainingRow {
        age,
        bmi,
        goal,
        preference,
        sport,
    }
}

/// The full training table
pub const TRAINING_TABLE: [TrainingRow; 7] = [
    row(25, 22.5, Goal::Fitness, Preference::Indoor, Sport::Yoga),
    row(30, 27.8, Goal::WeightLoss, Preference::Outdoor, Sport::Running),
    row(35, 30.2, Goal::MuscleGain, Preference::Indoor, Sport::Gym),
    row(20, 20.1, Goal::Recreation, Preference::Outdoor, Sport::Basketball),
    row(15, 18.5, Goal::TeamBuilding, Preference::Outdoor, Sport::Football),
    row(40, 25.6, Goal::StressRelief, Preference::Indoor, Sport::Pilates),
    row(50, 28.9, Goal::Competition, Preference::Outdoor, Sport::Tennis),
];

/// Feature columns, in the order rows are encoded
pub const FEATURE_NAMES: [&str; 4] = ["Age", "BMI", "Goal", "Preference"];

impl TrainingRow {
    pub fn features(&self) -> [f64; 4] {
        encode(self.age as f64, self.bmi, self.goal, self.preference)
    }
}

/// Encode one observation as `[age, bmi, goal code, preference code]`
pub fn encode(age: f64, bmi: f64, goal: Goal, preference: Preference) -> [f64; 4] {
    [age, bmi, goal.code() as f64, preference.code() as f64]
}

/// The whole table as a dataset with sport codes as targets
pub fn training_dataset() -> Dataset<f64, usize, Ix1> {
    let records = Array2::from_shape_fn((TRAINING_TABLE.len(), FEATURE_NAMES.len()), |(i, j)| {
        TRAINING_TABLE[i].features()[j]
    });
    let targets: Array1<usize> = TRAINING_TABLE.iter().map(|row| row.sport.code()).collect();
    Dataset::new(records, targets).with_feature_names(FEATURE_NAMES.to_vec())
}

/// Shuffle with `seed` and hold out `ceil(n * test_fraction)` rows.
///
/// Returns `(train, test)`. At least one row always stays in training.
pub fn holdout_split(
    dataset: &Dataset<f64, usize, Ix1>,
    test_fraction: f64,
    seed: u64,
) -> (Dataset<f64, usize, Ix1>, Dataset<f64, usize, Ix1>) {
    let n = dataset.nsamples();
    let n_test = (((n as f64) * test_fraction).ceil() as usize).min(n.saturating_sub(1));
    let n_train = n - n_test;

    let mut rng = StdRng::seed_from_u64(seed);
    let shuffled = dataset.shuffle(&mut rng);
    let records = shuffled.records();
    let targets = shuffled.targets();

    let train = Dataset::new(
        records.slice(s![..n_train, ..]).to_owned(),
        targets.slice(s![..n_train]).to_owned(),
    );
    let test = Dataset::new(
        records.slice(s![n_train.., ..]).to_owned(),
        targets.slice(s![n_train..]).to_owned(),
    );
    (train, test)
}
