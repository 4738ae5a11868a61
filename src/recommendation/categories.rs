//! Category enumerations
//!
//! Closed case lists for the categorical request fields and the sports the
//! classifier can predict. Parsing expects already lower-cased input.
//!
//! Each case also has a numeric code for the classifier: its rank among the
//! alphabetically sorted names of its enum.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Training goal stated by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Fitness,
    WeightLoss,
    MuscleGain,
    Recreation,
    TeamBuilding,
    StressRelief,
    Competition,
}

impl Goal {
    pub const ALL: [Goal; 7] = [
        Goal::Fitness,
        Goal::WeightLoss,
        Goal::MuscleGain,
        Goal::Recreation,
        Goal::TeamBuilding,
        Goal::StressRelief,
        Goal::Competition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Fitness => "fitness",
            Goal::WeightLoss => "weight loss",
            Goal::MuscleGain => "muscle gain",
            Goal::Recreation => "recreation",
            Goal::TeamBuilding => "team building",
            Goal::StressRelief => "stress relief",
            Goal::Competition => "competition",
        }
    }

    /// Alphabetical rank of the name, used as the classifier feature
    pub fn code(self) -> usize {
        Goal::ALL.iter().filter(|g| g.as_str() < self.as_str()).count()
    }
}

impl FromStr for Goal {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Goal::ALL.into_iter().find(|g| g.as_str() == s).ok_or(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the user prefers to exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    Indoor,
    Outdoor,
}

impl Preference {
    pub const ALL: [Preference; 2] = [Preference::Indoor, Preference::Outdoor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preference::Indoor => "indoor",
            Preference::Outdoor => "outdoor",
        }
    }

    pub fn code(self) -> usize {
        Preference::ALL.iter().filter(|p| p.as_str() < self.as_str()).count()
    }
}

impl FromStr for Preference {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "indoor" => Ok(Preference::Indoor),
            "outdoor" => Ok(Preference::Outdoor),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sport label the classifier can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    Basketball,
    Football,
    Gym,
    Pilates,
    Running,
    Tennis,
    Yoga,
}

impl Sport {
    pub const ALL: [Sport; 7] = [
        Sport::Basketball,
        Sport::Football,
        Sport::Gym,
        Sport::Pilates,
        Sport::Running,
        Sport::Tennis,
        Sport::Yoga,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Basketball => "basketball",
            Sport::Football => "football",
            Sport::Gym => "gym",
            Sport::Pilates => "pilates",
            Sport::Running => "running",
            Sport::Tennis => "tennis",
            Sport::Yoga => "yoga",
        }
    }

    pub fn code(self) -> usize {
        Sport::ALL.iter().filter(|s| s.as_str() < self.as_str()).count()
    }

    pub fn from_code(code: usize) -> Option<Sport> {
        Sport::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Rewrite a predicted sport that contradicts the stated preference.
    ///
    /// Outdoor-only sports become yoga for indoor users; gym-style sports
    /// become football for outdoor users. Anything else passes through.
    pub fn adjusted_for(self, preference: Option<Preference>) -> Sport {
        match (preference, self) {
            (Some(Preference::Indoor), Sport::Football | Sport::Tennis | Sport::Running) => {
                Sport::Yoga
            }
            (Some(Preference::Outdoor), Sport::Yoga | Sport::Gym | Sport::Pilates) => {
                Sport::Football
            }
            (_, sport) => sport,
        }
    }
}

impl FromStr for Sport {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sport::ALL.into_iter().find(|sp| sp.as_str() == s).ok_or(())
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
