use derive_more::{Deref, From, Into};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use strum::{EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use thiserror::Error;

/// A single rating on the stand scale.
///
/// Variants are declared in canonical ascending order, so the derived `Ord`
/// is the rank. The radial distance of a rating is its [`mark`](Self::mark),
/// never its ordinal: the two sentinels `None` and `Unknown` share mark 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, EnumIter, EnumCount,
)]
pub enum RatingLevel {
    None,
    #[default]
    Unknown,
    E,
    D,
    C,
    B,
    A,
    Infinite,
}

impl RatingLevel {
    /// Letter ratings from lowest to highest, i.e. the slider's left-to-right order.
    pub const LETTERS: [RatingLevel; 5] = [Self::E, Self::D, Self::C, Self::B, Self::A];

    pub fn mark(self) -> u8 {
        match self {
            Self::None | Self::Unknown => 0,
            Self::E => 1,
            Self::D => 2,
            Self::C => 3,
            Self::B => 4,
            Self::A => 5,
            Self::Infinite => 6,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::None => "_",
            Self::Unknown => "?",
            Self::E => "E",
            Self::D => "D",
            Self::C => "C",
            Self::B => "B",
            Self::A => "A",
            Self::Infinite => "∞",
        }
    }

    pub fn is_letter(self) -> bool {
        Self::LETTERS.contains(&self)
    }

    /// The letter with the closest mark; sentinels resolve to the nearest end
    /// of the letter range.
    pub fn nearest_letter(self) -> Self {
        if self.is_letter() {
            return self;
        }
        Self::LETTERS
            .into_iter()
            .min_by_key(|letter| letter.mark().abs_diff(self.mark()))
            .unwrap_or(Self::E)
    }

    /// Decodes a persisted mark. Mark 0 is ambiguous and resolves to `Unknown`.
    pub fn from_mark(mark: u8) -> Option<Self> {
        match mark {
            0 => Some(Self::Unknown),
            m => Self::iter().find(|level| level.mark() == m),
        }
    }
}

impl fmt::Display for RatingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumCount,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum CategoryName {
    Potential,
    Power,
    Speed,
    Range,
    Durability,
    Precision,
}

impl CategoryName {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::iter().nth(idx)
    }

    /// Text drawn along the diagram border.
    pub fn label(self) -> &'static str {
        self.into()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RatingsError {
    #[error("expected {expected} rating digits, got {actual}")]
    Length { expected: usize, actual: usize },
    #[error("'{0}' is not a rating mark")]
    InvalidMark(char),
}

/// One rating per category, in category order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Deref,
    From,
    Into,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct Ratings([RatingLevel; CategoryName::COUNT]);

impl Ratings {
    pub const UNKNOWN: Ratings = Ratings([RatingLevel::Unknown; CategoryName::COUNT]);

    pub fn new(levels: [RatingLevel; CategoryName::COUNT]) -> Self {
        Self(levels)
    }

    pub fn get(&self, category: CategoryName) -> RatingLevel {
        self.0[category.index()]
    }

    pub fn with(mut self, category: CategoryName, level: RatingLevel) -> Self {
        self.0[category.index()] = level;
        self
    }

    pub fn entries(&self) -> impl Iterator<Item = (CategoryName, RatingLevel)> + '_ {
        CategoryName::iter().zip(self.0.iter().copied())
    }

    pub fn marks(&self) -> [f64; CategoryName::COUNT] {
        self.0.map(|level| f64::from(level.mark()))
    }

    /// What a row of letter sliders shows for these ratings.
    pub fn to_letters(self) -> Self {
        Self(self.0.map(RatingLevel::nearest_letter))
    }

    /// Every category gets a uniformly chosen letter rating.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(std::array::from_fn(|_| {
            RatingLevel::LETTERS
                .choose(rng)
                .copied()
                .unwrap_or_default()
        }))
    }

    /// Decodes the stored digit string without failing: unreadable digits
    /// become `Unknown`, missing trailing categories are padded with `Unknown`
    /// and extra characters are ignored.
    pub fn from_compact_lossy(s: &str) -> Self {
        let mut levels = [RatingLevel::Unknown; CategoryName::COUNT];
        for (slot, c) in levels.iter_mut().zip(s.chars()) {
            *slot = c
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .and_then(RatingLevel::from_mark)
                .unwrap_or(RatingLevel::Unknown);
        }
        Self(levels)
    }
}

impl fmt::Display for Ratings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0
            .iter()
            .try_for_each(|level| write!(f, "{}", level.mark()))
    }
}

impl FromStr for Ratings {
    type Err = RatingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let actual = s.chars().count();
        if actual != CategoryName::COUNT {
            return Err(RatingsError::Length {
                expected: CategoryName::COUNT,
                actual,
            });
        }

        let mut levels = [RatingLevel::Unknown; CategoryName::COUNT];
        for (slot, c) in levels.iter_mut().zip(s.chars()) {
            *slot = c
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .and_then(RatingLevel::from_mark)
                .ok_or(RatingsError::InvalidMark(c))?;
        }
        Ok(Self(levels))
    }
}
