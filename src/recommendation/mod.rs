//! Recommendation Module
//!
//! Turns a user's age, BMI, goal and activity preference into a sport.
//!
//! ## Architecture
//!
//! 1. **Decider** - Rule ladder over age, BMI, goal and preference
//! 2. **Artifact** - Bagged `linfa-trees` forest, trained once at startup
//! 3. **Dataset** - The fixed seven-row table, its encoding and holdout split
//!
//! ## Decision Order
//!
//! - Over 70: gentle activities
//! - BMI over 40: low-impact activities
//! - Up to 15, 16-30, 31-50: goal and preference rules per age band
//! - 51-70: classifier prediction, reconciled with the stated preference

pub mod artifact;
pub mod categories;
pub mod dataset;
pub mod decider;
pub mod forest;
pub mod metrics;

pub use artifact::ClassifierArtifact;
pub use categories::{Goal, Preference, Sport};
pub use decider::{decide, DecisionPath, Recommendation, RecommendationRequest, SportClassifier};
