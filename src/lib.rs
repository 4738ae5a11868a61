//! Sports recommender library crate
//!
//! Re-exports core modules for integration tests and the server binary.

pub mod api;
pub mod config;
pub mod error;
pub mod recommendation;

// Re-export commonly used types
pub use api::AppState;
pub use config::Config;
pub use error::{Error, Result};
pub use recommendation::{
    decide, ClassifierArtifact, DecisionPath, Goal, Preference, Recommendation,
    RecommendationRequest, Sport, SportClassifier,
};
