// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar year. The dataset covers 1880 through 2022.
pub type Year = u16;

pub const MIN_YEAR: Year = 1880;
pub const MAX_YEAR: Year = 2022;

/// Counts below this are never published in the source data.
pub const REPORTING_THRESHOLD: u64 = 5;

/// Display label for a year where a name was active but under the threshold.
pub const SUPPRESSED_LABEL: &str = "< 5";

/// Gender as recorded in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub const BOTH: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn letter(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

/// Gender as chosen by the user for a literal selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderFilter {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    All,
}

impl GenderFilter {
    /// The dataset genders whose counts contribute to this filter.
    pub fn genders(self) -> &'static [Gender] {
        match self {
            GenderFilter::Male => &[Gender::Male],
            GenderFilter::Female => &[Gender::Female],
            GenderFilter::All => &Gender::BOTH,
        }
    }

    /// Parses the text inside a candidate suffix, e.g. the `M` of `Kai (M)`.
    pub fn parse_suffix(s: &str) -> Option<Self> {
        match s {
            "M" => Some(GenderFilter::Male),
            "F" => Some(GenderFilter::Female),
            "All" => Some(GenderFilter::All),
            _ => None,
        }
    }
}

impl fmt::Display for GenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GenderFilter::Male => "M",
            GenderFilter::Female => "F",
            GenderFilter::All => "All",
        })
    }
}

impl From<Gender> for GenderFilter {
    fn from(g: Gender) -> Self {
        match g {
            Gender::Male => GenderFilter::Male,
            Gender::Female => GenderFilter::Female,
        }
    }
}

/// Inclusive window of years. The bounds are kept as given; consumers that
/// iterate must go through `normalized()` because callers may pass them inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: Year,
    pub end: Year,
}

impl YearRange {
    pub fn new(start: Year, end: Year) -> Self {
        Self { start, end }
    }

    /// The full span of the dataset.
    pub fn full() -> Self {
        Self::new(MIN_YEAR, MAX_YEAR)
    }

    /// The bounds as `(min, max)`.
    pub fn normalized(&self) -> (Year, Year) {
        (self.start.min(self.end), self.start.max(self.end))
    }

    pub fn years(&self) -> impl Iterator<Item = Year> {
        let (lo, hi) = self.normalized();
        lo..=hi
    }

    pub fn len(&self) -> usize {
        let (lo, hi) = self.normalized();
        usize::from(hi - lo) + 1
    }

    pub fn contains(&self, year: Year) -> bool {
        let (lo, hi) = self.normalized();
        (lo..=hi).contains(&year)
    }

    /// Restricts both bounds to the years the dataset covers.
    pub fn clamped(&self) -> Self {
        Self::new(
            self.start.clamp(MIN_YEAR, MAX_YEAR),
            self.end.clamp(MIN_YEAR, MAX_YEAR),
        )
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::full()
    }
}

/// One renderable chart point. `label` is either the formatted count or
/// `SUPPRESSED_LABEL`, in which case `value` is 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub year: Year,
    pub value: u64,
    pub label: String,
}

impl SeriesPoint {
    pub fn is_suppressed(&self) -> bool {
        self.label == SUPPRESSED_LABEL
    }
}

/// Formats a count with comma thousands separators: `1234567` -> `1,234,567`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
