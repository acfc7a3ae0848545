// File: src/core/dataset.rs
use crate::core::types::{Gender, Year, MAX_YEAR, MIN_YEAR};
use crate::error::{Result, TrendsError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Year-by-year counts for one name, split by gender. Years under the
/// reporting threshold are absent rather than zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    pub male: BTreeMap<Year, u64>,
    pub female: BTreeMap<Year, u64>,
}

impl NameRecord {
    pub fn series(&self, gender: Gender) -> &BTreeMap<Year, u64> {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }

    fn series_mut(&mut self, gender: Gender) -> &mut BTreeMap<Year, u64> {
        match gender {
            Gender::Male => &mut self.male,
            Gender::Female => &mut self.female,
        }
    }

    /// True if the name has any recorded year for `gender`.
    pub fn has(&self, gender: Gender) -> bool {
        !self.series(gender).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.male.is_empty() && self.female.is_empty()
    }

    pub fn count(&self, gender: Gender, year: Year) -> u64 {
        self.series(gender).get(&year).copied().unwrap_or(0)
    }

    /// Earliest recorded year across the given genders.
    pub fn first_year(&self, genders: &[Gender]) -> Option<Year> {
        genders
            .iter()
            .filter_map(|&g| self.series(g).keys().next().copied())
            .min()
    }
}

/// The merged, read-only name table. Names iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    names: BTreeMap<String, NameRecord>,
}

/// Wire shape of one chunk entry: `{"M": {"1990": 12}, "F": {...}}`.
#[derive(Deserialize)]
struct RawRecord {
    #[serde(rename = "M", default)]
    male: Option<BTreeMap<String, u64>>,
    #[serde(rename = "F", default)]
    female: Option<BTreeMap<String, u64>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one chunk file. `source_name` only feeds error messages.
    pub fn from_chunk_json(source_name: &str, json: &str) -> Result<Self> {
        let raw: BTreeMap<String, RawRecord> =
            serde_json::from_str(json).map_err(|e| TrendsError::MalformedChunk {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            })?;

        let mut dataset = Dataset::new();
        for (name, record) in raw {
            let mut parsed = NameRecord::default();
            for (gender, years) in [(Gender::Male, record.male), (Gender::Female, record.female)] {
                for (year, count) in years.unwrap_or_default() {
                    let year = parse_year(&year).ok_or_else(|| TrendsError::MalformedChunk {
                        source_name: source_name.to_string(),
                        reason: format!("invalid year {:?} for {} ({})", year, name, gender.letter()),
                    })?;
                    parsed.series_mut(gender).insert(year, count);
                }
            }
            if !parsed.is_empty() {
                dataset.names.insert(name, parsed);
            }
        }
        debug!(source = source_name, names = dataset.len(), "parsed chunk");
        Ok(dataset)
    }

    /// Folds partial datasets into one. Each name/gender ends up with the union
    /// of the partials' years; on an overlapping year the later partial wins.
    pub fn merge<I: IntoIterator<Item = Dataset>>(partials: I) -> Self {
        let mut merged = Dataset::new();
        for partial in partials {
            merged.absorb(partial);
        }
        merged
    }

    fn absorb(&mut self, other: Dataset) {
        for (name, record) in other.names {
            let entry = self.names.entry(name).or_default();
            entry.male.extend(record.male);
            entry.female.extend(record.female);
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, record: NameRecord) {
        self.names.insert(name.into(), record);
    }

    pub fn get(&self, name: &str) -> Option<&NameRecord> {
        self.names.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NameRecord)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn parse_year(s: &str) -> Option<Year> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<Year>()
        .ok()
        .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
}
