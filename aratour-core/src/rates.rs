//! Guide hourly rates by experience level and headcount bracket.
use serde::{Deserialize, Serialize};

/// Guide experience level used for rate lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideLevel {
    Intermediate,
    Professional,
}

/// Hourly rates for the three headcount brackets of one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRates {
    #[serde(rename = "1-2")]
    pub small: i64,
    #[serde(rename = "3-5")]
    pub medium: i64,
    #[serde(rename = "6-10")]
    pub large: i64,
}

impl BracketRates {
    /// Resolve the bracket for a headcount. Counts above the top bracket
    /// reuse the `6-10` rate; that ceiling is intentional.
    #[must_use]
    pub const fn for_count(&self, count: u32) -> i64 {
        if count <= 2 {
            self.small
        } else if count <= 5 {
            self.medium
        } else {
            self.large
        }
    }
}

/// Rate table for all guide levels, loaded once and shared read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideRateTable {
    pub intermediate: BracketRates,
    pub professional: BracketRates,
}

impl GuideRateTable {
    /// Hourly rate for `level` at the given headcount.
    #[must_use]
    pub const fn rate(&self, level: GuideLevel, count: u32) -> i64 {
        match level {
            GuideLevel::Intermediate => self.intermediate.for_count(count),
            GuideLevel::Professional => self.professional.for_count(count),
        }
    }

    /// Load a rate table from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid rate data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for GuideRateTable {
    fn default() -> Self {
        Self {
            intermediate: BracketRates {
                small: 4_500,
                medium: 5_400,
                large: 6_300,
            },
            professional: BracketRates {
                small: 6_500,
                medium: 7_800,
                large: 9_100,
            },
        }
    }
}
