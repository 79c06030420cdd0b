use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rating scale shared by individual standards and the Professional Practices aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeRating {
    Basic,
    PartiallyProficient,
    Proficient,
    Accomplished,
    Exemplary,
}

impl PracticeRating {
    pub const fn ascending() -> [Self; 5] {
        [
            Self::Basic,
            Self::PartiallyProficient,
            Self::Proficient,
            Self::Accomplished,
            Self::Exemplary,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::PartiallyProficient => "Partially Proficient",
            Self::Proficient => "Proficient",
            Self::Accomplished => "Accomplished",
            Self::Exemplary => "Exemplary",
        }
    }
}

/// Rating assigned to a single measure and to the Measures of Student Learning aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MslRating {
    LessThanExpected,
    Expected,
    MoreThanExpected,
}

impl MslRating {
    pub const fn ordered() -> [Self; 3] {
        [Self::LessThanExpected, Self::Expected, Self::MoreThanExpected]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LessThanExpected => "Less Than Expected",
            Self::Expected => "Expected",
            Self::MoreThanExpected => "More Than Expected",
        }
    }

    /// Earned value of a measure carrying this rating.
    pub const fn value(self) -> f64 {
        match self {
            Self::LessThanExpected => 0.0,
            Self::Expected => 1.5,
            Self::MoreThanExpected => 3.0,
        }
    }
}

impl FromStr for MslRating {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "lessthanexpected" => Ok(Self::LessThanExpected),
            "expected" => Ok(Self::Expected),
            "morethanexpected" => Ok(Self::MoreThanExpected),
            _ => Err(format!("'{raw}' is not a measure rating")),
        }
    }
}

/// Final effectiveness rating on the 1000-point scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectivenessRating {
    Ineffective,
    PartiallyEffective,
    Effective,
    HighlyEffective,
}

impl EffectivenessRating {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ineffective => "Ineffective",
            Self::PartiallyEffective => "Partially Effective",
            Self::Effective => "Effective",
            Self::HighlyEffective => "Highly Effective",
        }
    }
}

macro_rules! display_by_label {
    ($($rating:ty),*) => {
        $(impl fmt::Display for $rating {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_by_label!(PracticeRating, MslRating, EffectivenessRating);

/// Closed score interval mapped to a rating label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingBand<L> {
    pub min: f64,
    pub max: f64,
    pub label: L,
}

impl<L: Copy> RatingBand<L> {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }
}

/// Non-overlapping bands ordered from the highest minimum to the lowest.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct RatingRangeTable<L: 'static> {
    bands: &'static [RatingBand<L>],
}

impl<L: Copy + 'static> RatingRangeTable<L> {
    const fn new(bands: &'static [RatingBand<L>]) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> &'static [RatingBand<L>] {
        self.bands
    }

    /// Scans from the top band down; scores between integer bands fall to the lower band,
    /// scores above the top band take the top label, and scores below the floor are unrated.
    pub fn lookup(&self, score: f64) -> Option<L> {
        self.bands
            .iter()
            .find(|band| score >= band.min)
            .map(|band| band.label)
    }

    pub fn band_for(&self, label: L) -> Option<&'static RatingBand<L>>
    where
        L: PartialEq,
    {
        self.bands.iter().find(|band| band.label == label)
    }

    /// The band directly above `label`, if any.
    pub fn next_above(&self, label: L) -> Option<&'static RatingBand<L>>
    where
        L: PartialEq,
    {
        let position = self.bands.iter().position(|band| band.label == label)?;
        position.checked_sub(1).map(|above| &self.bands[above])
    }
}

pub const STANDARD_RATING_RANGES: RatingRangeTable<PracticeRating> = RatingRangeTable::new(&[
    RatingBand {
        min: 18.75,
        max: 20.0,
        label: PracticeRating::Exemplary,
    },
    RatingBand {
        min: 13.75,
        max: 18.74,
        label: PracticeRating::Accomplished,
    },
    RatingBand {
        min: 8.75,
        max: 13.74,
        label: PracticeRating::Proficient,
    },
    RatingBand {
        min: 3.75,
        max: 8.74,
        label: PracticeRating::PartiallyProficient,
    },
    RatingBand {
        min: 0.0,
        max: 3.74,
        label: PracticeRating::Basic,
    },
]);

pub const PP_RATING_RANGES: RatingRangeTable<PracticeRating> = RatingRangeTable::new(&[
    RatingBand {
        min: 657.0,
        max: 700.0,
        label: PracticeRating::Exemplary,
    },
    RatingBand {
        min: 482.0,
        max: 656.0,
        label: PracticeRating::Accomplished,
    },
    RatingBand {
        min: 307.0,
        max: 481.0,
        label: PracticeRating::Proficient,
    },
    RatingBand {
        min: 132.0,
        max: 306.0,
        label: PracticeRating::PartiallyProficient,
    },
    RatingBand {
        min: 0.0,
        max: 131.0,
        label: PracticeRating::Basic,
    },
]);

pub const MSL_RATING_RANGES: RatingRangeTable<MslRating> = RatingRangeTable::new(&[
    RatingBand {
        min: 201.0,
        max: 300.0,
        label: MslRating::MoreThanExpected,
    },
    RatingBand {
        min: 100.0,
        max: 200.0,
        label: MslRating::Expected,
    },
    RatingBand {
        min: 0.0,
        max: 99.0,
        label: MslRating::LessThanExpected,
    },
]);

pub const FINAL_RATING_RANGES: RatingRangeTable<EffectivenessRating> = RatingRangeTable::new(&[
    RatingBand {
        min: 801.0,
        max: 1000.0,
        label: EffectivenessRating::HighlyEffective,
    },
    RatingBand {
        min: 407.0,
        max: 800.0,
        label: EffectivenessRating::Effective,
    },
    RatingBand {
        min: 188.0,
        max: 406.0,
        label: EffectivenessRating::PartiallyEffective,
    },
    RatingBand {
        min: 0.0,
        max: 187.0,
        label: EffectivenessRating::Ineffective,
    },
]);
