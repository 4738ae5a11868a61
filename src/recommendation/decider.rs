//! Recommendation Decider
//!
//! Maps a validated request to a recommendation. A fixed ladder of age, BMI,
//! goal and preference checks answers almost everything; only ages 51-70
//! with BMI at most 40 fall through to the classifier, whose prediction is
//! then reconciled with the stated preference.

use std::fmt;
use std::ops::RangeInclusive;
use tracing::debug;

use super::categories::{Goal, Preference, Sport};
use super::metrics::record_decision;
use crate::error::{Error, Result};

pub const AGE_RANGE: RangeInclusive<u32> = 10..=100;
pub const BMI_RANGE: RangeInclusive<u32> = 10..=60;

/// Anything that can predict a sport for inputs the ladder doesn't cover
pub trait SportClassifier {
    /// `goal` and `preference` are the normalized request strings; values
    /// outside the trained categories must fail with `UnrecognizedCategory`.
    fn predict(&self, age: i64, bmi: f64, goal: &str, preference: &str) -> Result<Sport>;
}

/// A normalized recommendation request
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub age: i64,
    pub bmi: f64,
    pub goal: String,
    pub preference: String,
}

impl RecommendationRequest {
    /// Build a request, lower-casing the categorical fields
    pub fn new(age: i64, bmi: f64, goal: &str, preference: &str) -> Self {
        Self {
            age,
            bmi,
            goal: goal.to_lowercase(),
            preference: preference.to_lowercase(),
        }
    }

    /// Range-check age, then BMI
    pub fn validate(&self) -> Result<()> {
        let (age_min, age_max) = (*AGE_RANGE.start(), *AGE_RANGE.end());
        if self.age < age_min as i64 || self.age > age_max as i64 {
            return Err(Error::validation("Age", age_min, age_max));
        }

        let (bmi_min, bmi_max) = (*BMI_RANGE.start(), *BMI_RANGE.end());
        if !(bmi_min as f64..=bmi_max as f64).contains(&self.bmi) {
            return Err(Error::validation("BMI", bmi_min, bmi_max));
        }

        Ok(())
    }

    fn goal(&self) -> Option<Goal> {
        self.goal.parse().ok()
    }

    fn preference(&self) -> Option<Preference> {
        self.preference.parse().ok()
    }

    fn is_outdoor(&self) -> bool {
        self.preference() == Some(Preference::Outdoor)
    }
}

/// Which rung of the ladder produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionPath {
    Senior,
    HighBmi,
    Youth,
    YoungAdult,
    Adult,
    Classifier,
}

impl DecisionPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionPath::Senior => "senior",
            DecisionPath::HighBmi => "high_bmi",
            DecisionPath::Youth => "youth",
            DecisionPath::YoungAdult => "young_adult",
            DecisionPath::Adult => "adult",
            DecisionPath::Classifier => "classifier",
        }
    }
}

/// Result of a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// Fixed advice from the rule ladder
    Advice {
        path: DecisionPath,
        text: &'static str,
    },
    /// Classifier output after preference reconciliation
    Predicted { predicted: Sport, sport: Sport },
}

impl Recommendation {
    pub fn path(&self) -> DecisionPath {
        match self {
            Recommendation::Advice { path, .. } => *path,
            Recommendation::Predicted { .. } => DecisionPath::Classifier,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Advice { text, .. } => f.write_str(text),
            Recommendation::Predicted { sport, .. } => f.write_str(sport.as_str()),
        }
    }
}

// ============================================================================
// Advice phrases
// ============================================================================

pub const SENIOR_ADVICE: &str = "Walking, yoga, or light stretching for older individuals.";
pub const HIGH_BMI_ADVICE: &str = "Swimming or yoga as low-impact activities.";
pub const YOUTH_OUTDOOR_ADVICE: &str = "Football or basketball to encourage teamwork.";
pub const YOUTH_INDOOR_ADVICE: &str = "Gymnastics or dance for indoor activities.";
pub const STRENGTH_ADVICE: &str = "Gym or weight training.";
pub const RELAXATION_ADVICE: &str = "Yoga or pilates for relaxation.";
pub const ENDURANCE_ADVICE: &str = "Running or cycling for endurance.";
pub const CLIMBING_ADVICE: &str = "Indoor rock climbing for an active workout.";
pub const LOW_IMPACT_ADVICE: &str = "Yoga or swimming as low-impact options.";
pub const ADULT_OUTDOOR_ADVICE: &str = "Tennis or golf for outdoor activity.";
pub const ADULT_INDOOR_ADVICE: &str = "Pilates or Zumba for indoor fun.";

fn advice(path: DecisionPath, text: &'static str) -> Recommendation {
    Recommendation::Advice { path, text }
}

/// Decide a recommendation for `request`; first matching rung wins.
///
/// Validation runs first, so callers may pass raw requests.
pub fn decide<C>(request: &RecommendationRequest, classifier: &C) -> Result<Recommendation>
where
    C: SportClassifier + ?Sized,
{
    request.validate()?;

    let recommendation = match ladder(request) {
        Some(rec) => rec,
        None => {
            let predicted =
                classifier.predict(request.age, request.bmi, &request.goal, &request.preference)?;
            let sport = predicted.adjusted_for(request.preference());
            debug!(
                predicted = predicted.as_str(),
                sport = sport.as_str(),
                "classifier fallback"
            );
            Recommendation::Predicted { predicted, sport }
        }
    };

    debug!(
        age = request.age,
        bmi = request.bmi,
        goal = %request.goal,
        preference = %request.preference,
        path = recommendation.path().as_str(),
        "recommendation decided"
    );
    record_decision(recommendation.path());

    Ok(recommendation)
}

/// The hardcoded rungs; `None` means the classifier has to answer
fn ladder(request: &RecommendationRequest) -> Option<Recommendation> {
    let age = request.age;

    if age > 70 {
        return Some(advice(DecisionPath::Senior, SENIOR_ADVICE));
    }
    if request.bmi > 40.0 {
        return Some(advice(DecisionPath::HighBmi, HIGH_BMI_ADVICE));
    }

    let goal = request.goal();
    match age {
        i64::MIN..=15 => Some(if request.is_outdoor() {
            advice(DecisionPath::Youth, YOUTH_OUTDOOR_ADVICE)
        } else {
            advice(DecisionPath::Youth, YOUTH_INDOOR_ADVICE)
        }),
        16..=30 => Some(match goal {
            Some(Goal::Fitness | Goal::MuscleGain) => {
                advice(DecisionPath::YoungAdult, STRENGTH_ADVICE)
            }
            Some(Goal::StressRelief | Goal::Recreation) => {
                advice(DecisionPath::YoungAdult, RELAXATION_ADVICE)
            }
            _ if request.is_outdoor() => advice(DecisionPath::YoungAdult, ENDURANCE_ADVICE),
            _ => advice(DecisionPath::YoungAdult, CLIMBING_ADVICE),
        }),
        31..=50 => Some(match goal {
            Some(Goal::WeightLoss | Goal::StressRelief) => {
                advice(DecisionPath::Adult, LOW_IMPACT_ADVICE)
            }
            _ if request.is_outdoor() => advice(DecisionPath::Adult, ADULT_OUTDOOR_ADVICE),
            _ => advice(DecisionPath::Adult, ADULT_INDOOR_ADVICE),
        }),
        _ => None,
    }
}
