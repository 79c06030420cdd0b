use super::ranges::PracticeRating;
use super::POINTS_PER_ELEMENT;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The four Professional Practices standards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StandardId {
    #[serde(rename = "s1")]
    S1,
    #[serde(rename = "s2")]
    S2,
    #[serde(rename = "s3")]
    S3,
    #[serde(rename = "s4")]
    S4,
}

impl StandardId {
    pub const fn ordered() -> [Self; 4] {
        [Self::S1, Self::S2, Self::S3, Self::S4]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::S1 => 0,
            Self::S2 => 1,
            Self::S3 => 2,
            Self::S4 => 3,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::S1 => "s1",
            Self::S2 => "s2",
            Self::S3 => "s3",
            Self::S4 => "s4",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::S1 => "Standard 1",
            Self::S2 => "Standard 2",
            Self::S3 => "Standard 3",
            Self::S4 => "Standard 4",
        }
    }

    pub const fn element_count(self) -> usize {
        match self {
            Self::S1 => 3,
            Self::S2 => 4,
            Self::S3 => 6,
            Self::S4 => 4,
        }
    }

    pub const fn possible_points(self) -> u32 {
        self.element_count() as u32 * POINTS_PER_ELEMENT
    }

    /// Ascending earned-point breakpoints for Basic through Exemplary.
    pub const fn breakpoints(self) -> [u32; 5] {
        match self {
            Self::S1 => [1, 4, 7, 10, 12],
            Self::S2 | Self::S4 => [2, 6, 10, 14, 16],
            Self::S3 => [3, 9, 15, 21, 24],
        }
    }

    pub fn elements(self) -> impl Iterator<Item = ElementKey> {
        (0..self.element_count() as u8).map(move |element| ElementKey {
            standard: self,
            element,
        })
    }

    /// Classifies raw earned points against this standard's breakpoints.
    pub fn classify(self, earned: u32) -> Result<PracticeRating, CeilingExceeded> {
        let ratings = PracticeRating::ascending();
        self.breakpoints()
            .iter()
            .zip(ratings)
            .find(|(breakpoint, _)| earned <= **breakpoint)
            .map(|(_, rating)| rating)
            .ok_or(CeilingExceeded {
                standard: self,
                earned,
                ceiling: self.breakpoints()[4],
            })
    }
}

impl fmt::Display for StandardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Earned points beyond the top breakpoint; the element point ceiling was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{standard} earned {earned} points, above the {ceiling}-point ceiling")]
pub struct CeilingExceeded {
    pub standard: StandardId,
    pub earned: u32,
    pub ceiling: u32,
}

/// Identifies one rated element, written as `s1a` .. `s4d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementKey {
    standard: StandardId,
    element: u8,
}

impl ElementKey {
    pub fn new(standard: StandardId, element: u8) -> Option<Self> {
        ((element as usize) < standard.element_count()).then_some(Self { standard, element })
    }

    pub fn all() -> impl Iterator<Item = ElementKey> {
        StandardId::ordered()
            .into_iter()
            .flat_map(StandardId::elements)
    }

    pub const fn standard(self) -> StandardId {
        self.standard
    }

    pub fn letter(self) -> char {
        char::from(b'a' + self.element)
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.standard.code(), self.letter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a rubric element key")]
pub struct ElementKeyError(pub String);

impl FromStr for ElementKey {
    type Err = ElementKeyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        let bytes = normalized.as_bytes();
        if bytes.len() != 3 || bytes[0] != b's' {
            return Err(ElementKeyError(raw.to_string()));
        }

        let standard = match bytes[1] {
            b'1' => StandardId::S1,
            b'2' => StandardId::S2,
            b'3' => StandardId::S3,
            b'4' => StandardId::S4,
            _ => return Err(ElementKeyError(raw.to_string())),
        };

        bytes[2]
            .checked_sub(b'a')
            .and_then(|element| ElementKey::new(standard, element))
            .ok_or_else(|| ElementKeyError(raw.to_string()))
    }
}

impl Serialize for ElementKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ElementKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
