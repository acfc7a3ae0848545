// File: src/core/selection.rs
use crate::core::types::GenderFilter;
use serde::{Deserialize, Serialize};

/// One entry in the chart: a single name, or every name a pattern matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Literal { name: String, gender: GenderFilter },
    /// `pattern` keeps its delimiters, e.g. `/^A.*n$/`. `matches` is never
    /// empty and is captured against the dataset when the selection is made.
    PatternGroup { pattern: String, matches: Vec<String> },
}

/// Identity used to spot duplicate selections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectionKey<'a> {
    Literal(&'a str, GenderFilter),
    Pattern(&'a str),
}

impl Selection {
    pub fn literal(name: impl Into<String>, gender: GenderFilter) -> Self {
        Selection::Literal { name: name.into(), gender }
    }

    /// Chip/legend text: `Kai (M)` for a literal, the pattern as typed otherwise.
    pub fn label(&self) -> String {
        match self {
            Selection::Literal { name, gender } => format!("{} ({})", name, gender),
            Selection::PatternGroup { pattern, .. } => pattern.clone(),
        }
    }

    pub fn key(&self) -> SelectionKey<'_> {
        match self {
            Selection::Literal { name, gender } => SelectionKey::Literal(name, *gender),
            Selection::PatternGroup { pattern, .. } => SelectionKey::Pattern(pattern),
        }
    }

    /// Names whose counts feed this selection's series.
    pub fn contributing_names(&self) -> Vec<&str> {
        match self {
            Selection::Literal { name, .. } => vec![name.as_str()],
            Selection::PatternGroup { matches, .. } => matches.iter().map(String::as_str).collect(),
        }
    }

    /// Pattern groups always sum both genders.
    pub fn gender_filter(&self) -> GenderFilter {
        match self {
            Selection::Literal { gender, .. } => *gender,
            Selection::PatternGroup { .. } => GenderFilter::All,
        }
    }
}

/// Ordered selections. Every operation returns a new list; the receiver is
/// never modified, so a list can be shared freely between views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionList {
    items: Vec<Selection>,
}

impl SelectionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, selection: Selection) -> Self {
        let mut items = self.items.clone();
        items.push(selection);
        Self { items }
    }

    /// Like `append`, but returns an unchanged copy if an entry with the same
    /// key is already present.
    pub fn append_unique(&self, selection: Selection) -> Self {
        if self.contains_key(&selection.key()) {
            return self.clone();
        }
        self.append(selection)
    }

    /// Drops the entry at `index`. Out-of-range indexes leave the list as is.
    pub fn remove_at(&self, index: usize) -> Self {
        let items = self
            .items
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, s)| s.clone())
            .collect();
        Self { items }
    }

    pub fn clear(&self) -> Self {
        Self::new()
    }

    pub fn contains_key(&self, key: &SelectionKey<'_>) -> bool {
        self.items.iter().any(|s| &s.key() == key)
    }

    pub fn get(&self, index: usize) -> Option<&Selection> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Selection> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Selection> for SelectionList {
    fn from_iter<T: IntoIterator<Item = Selection>>(iter: T) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a SelectionList {
    type Item = &'a Selection;
    type IntoIter = std::slice::Iter<'a, Selection>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
