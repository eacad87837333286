//! Excursion catalog: the static reference data behind every quote.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Level of guiding service attached to a quote.
///
/// Labels are the catalog-facing strings shown to the user; parsing from a
/// label is total and never panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GuideTier {
    /// Transport only, no guide.
    #[default]
    #[serde(rename = "Без")]
    None,
    /// Intermediate-level guide.
    #[serde(rename = "Гид")]
    Guide,
    /// Professional-level guide.
    #[serde(rename = "Эксперт")]
    Expert,
}

impl GuideTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "Без",
            Self::Guide => "Гид",
            Self::Expert => "Эксперт",
        }
    }

    /// Look a tier up by its user-facing label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Без" => Some(Self::None),
            "Гид" => Some(Self::Guide),
            "Эксперт" => Some(Self::Expert),
            _ => None,
        }
    }
}

impl fmt::Display for GuideTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuideTier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or(())
    }
}

/// A single bookable excursion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Excursion {
    /// Display name, unique within the catalog.
    pub name: String,
    /// Duration of the excursion in hours.
    pub time_hours: u32,
    /// Comfort transport cost in Armenian dram.
    pub transport_cost: i64,
    /// Whether entry tickets come with the tour. Currently cost-neutral.
    #[serde(default)]
    pub tickets_included: bool,
    /// Fractional markup applied to the raw cost.
    pub margin: f64,
    /// Guide tiers offered for this tour; always contains [`GuideTier::None`].
    pub available_guides: Vec<GuideTier>,
}

impl Excursion {
    /// Whether `tier` can be booked for this tour.
    #[must_use]
    pub fn supports(&self, tier: GuideTier) -> bool {
        self.available_guides.contains(&tier)
    }

    /// The only available tier, if the tour offers no real choice.
    #[must_use]
    pub fn single_guide(&self) -> Option<GuideTier> {
        match self.available_guides.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Tier labels in presentation order, for the choice keyboard.
    #[must_use]
    pub fn guide_labels(&self) -> Vec<String> {
        self.available_guides
            .iter()
            .map(|tier| tier.as_str().to_string())
            .collect()
    }
}

/// Complete excursion catalog, loaded once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub excursions: Vec<Excursion>,
}

impl Catalog {
    /// Load a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid excursion
    /// data (including unknown guide-tier labels).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Exact-name lookup.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Excursion> {
        self.excursions.iter().find(|e| e.name == name)
    }

    /// Tour names in presentation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.excursions.iter().map(|e| e.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Excursion> {
        self.excursions.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            excursions: vec![
                Excursion {
                    name: "Царская прогулка по Арагацу".to_string(),
                    time_hours: 8,
                    transport_cost: 48_000,
                    tickets_included: true,
                    margin: 0.2,
                    available_guides: vec![GuideTier::None, GuideTier::Guide, GuideTier::Expert],
                },
                Excursion {
                    name: "Экскурсия в Музей вина".to_string(),
                    time_hours: 6,
                    transport_cost: 35_000,
                    tickets_included: true,
                    margin: 0.15,
                    available_guides: vec![GuideTier::None, GuideTier::Guide],
                },
                Excursion {
                    name: "Трансфер в Ереван".to_string(),
                    time_hours: 2,
                    transport_cost: 15_000,
                    tickets_included: false,
                    margin: 0.1,
                    available_guides: vec![GuideTier::None],
                },
            ],
        }
    }
}
