// File: src/core/matcher.rs
use crate::core::dataset::{Dataset, NameRecord};
use crate::core::name_index::NameIndex;
use crate::core::selection::Selection;
use crate::core::types::{Gender, GenderFilter};
use regex::{Regex, RegexBuilder};
use std::fmt;
use tracing::{debug, warn};

/// Upper bound on suggestions handed to the dropdown.
pub const MAX_SUGGESTIONS: usize = 50;

/// Queries starting with this are compiled as regular expressions.
pub const PATTERN_DELIMITER: char = '/';

/// One line in the suggestion dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    Name { name: String, gender: GenderFilter },
    /// The whole pattern query, delimiters included.
    Pattern { query: String },
}

impl Candidate {
    pub fn label(&self) -> String {
        match self {
            Candidate::Name { name, gender } => format!("{} ({})", name, gender),
            Candidate::Pattern { query } => query.clone(),
        }
    }

    /// Recovers a candidate from its label, e.g. `Kai (All)` or `/^Ka/`.
    pub fn parse(label: &str) -> Option<Self> {
        if label.starts_with(PATTERN_DELIMITER) {
            return Some(Candidate::Pattern { query: label.to_string() });
        }
        let (name, suffix) = label.rsplit_once(" (")?;
        let gender = GenderFilter::parse_suffix(suffix.strip_suffix(')')?)?;
        if name.is_empty() {
            return None;
        }
        Some(Candidate::Name { name: name.to_string(), gender })
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub candidates: Vec<Candidate>,
    /// Set when more candidates existed than were returned.
    pub truncated: bool,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Resolves typed queries against the dataset's names.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    max_suggestions: usize,
    /// Prefix index of the dataset this matcher is used with, if built.
    index: Option<NameIndex>,
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self::new(MAX_SUGGESTIONS)
    }
}

impl NameMatcher {
    pub fn new(max_suggestions: usize) -> Self {
        Self { max_suggestions: max_suggestions.max(1), index: None }
    }

    /// A matcher with a prefix index over `dataset`. It must only be used
    /// with that same dataset afterwards.
    pub fn indexed(dataset: &Dataset, max_suggestions: usize) -> Self {
        Self { index: Some(NameIndex::build(dataset)), ..Self::new(max_suggestions) }
    }

    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    pub fn search(&self, dataset: &Dataset, query: &str) -> SearchResult {
        if query.is_empty() {
            return SearchResult::default();
        }
        let result = if is_pattern_query(query) {
            self.search_pattern(dataset, query)
        } else {
            self.search_prefix(dataset, query)
        };
        debug!(query, candidates = result.candidates.len(), truncated = result.truncated, "search");
        result
    }

    /// Case-insensitive prefix match; exact matches are moved to the front,
    /// everything else keeps dataset order.
    fn search_prefix(&self, dataset: &Dataset, query: &str) -> SearchResult {
        let needle = query.to_lowercase();
        let mut exact = Vec::new();
        let mut rest = Vec::new();

        let hits: Vec<(&str, &NameRecord)> = match &self.index {
            Some(index) => index
                .with_prefix(query)
                .into_iter()
                .filter_map(|name| dataset.get(name).map(|r| (name, r)))
                .collect(),
            None => dataset
                .iter()
                .filter(|(name, _)| name.to_lowercase().starts_with(&needle))
                .collect(),
        };

        for (name, record) in hits {
            let bucket = if name.to_lowercase() == needle { &mut exact } else { &mut rest };
            push_gender_candidates(bucket, name, record);
        }

        exact.extend(rest);
        self.capped(Vec::new(), exact)
    }

    fn search_pattern(&self, dataset: &Dataset, query: &str) -> SearchResult {
        let regex = match compile_pattern(query) {
            Ok(regex) => regex,
            Err(e) => {
                warn!(query, error = %e, "invalid pattern, showing it verbatim");
                return SearchResult {
                    candidates: vec![Candidate::Pattern { query: query.to_string() }],
                    truncated: false,
                };
            }
        };

        let mut expanded = Vec::new();
        for (name, record) in dataset.iter().filter(|(name, _)| regex.is_match(name)) {
            push_gender_candidates(&mut expanded, name, record);
            if expanded.len() > self.max_suggestions {
                break;
            }
        }
        if expanded.is_empty() {
            return SearchResult::default();
        }
        self.capped(vec![Candidate::Pattern { query: query.to_string() }], expanded)
    }

    fn capped(&self, mut head: Vec<Candidate>, mut body: Vec<Candidate>) -> SearchResult {
        let truncated = body.len() > self.max_suggestions;
        body.truncate(self.max_suggestions);
        head.extend(body);
        SearchResult { candidates: head, truncated }
    }

    /// Turns a chosen candidate into a selection. Pattern candidates are matched
    /// again here so the group holds every match, not just the suggested ones.
    pub fn resolve(&self, dataset: &Dataset, candidate: &Candidate) -> Option<Selection> {
        match candidate {
            Candidate::Name { name, gender } => {
                if !dataset.contains(name) {
                    warn!(name = name.as_str(), "selected name is not in the dataset");
                    return None;
                }
                Some(Selection::literal(name.clone(), *gender))
            }
            Candidate::Pattern { query } => {
                let matches = pattern_matches(dataset, query).ok()?;
                if matches.is_empty() {
                    return None;
                }
                Some(Selection::PatternGroup { pattern: query.clone(), matches })
            }
        }
    }
}

pub fn is_pattern_query(query: &str) -> bool {
    query.starts_with(PATTERN_DELIMITER)
}

/// The regex source inside a pattern query: the leading delimiter and an
/// optional trailing one are removed.
pub fn pattern_body(query: &str) -> &str {
    let body = query.strip_prefix(PATTERN_DELIMITER).unwrap_or(query);
    body.strip_suffix(PATTERN_DELIMITER).unwrap_or(body)
}

pub fn compile_pattern(query: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern_body(query))
        .case_insensitive(true)
        .build()
}

/// Every dataset name the pattern matches, in dataset order.
pub fn pattern_matches(dataset: &Dataset, query: &str) -> Result<Vec<String>, regex::Error> {
    let regex = compile_pattern(query)?;
    Ok(dataset
        .names()
        .filter(|name| regex.is_match(name))
        .map(str::to_string)
        .collect())
}

/// One candidate per gender with data, plus `All` when both have data.
fn push_gender_candidates(out: &mut Vec<Candidate>, name: &str, record: &NameRecord) {
    let male = record.has(Gender::Male);
    let female = record.has(Gender::Female);
    let mut push = |gender| out.push(Candidate::Name { name: name.to_string(), gender });
    if male {
        push(GenderFilter::Male);
    }
    if female {
        push(GenderFilter::Female);
    }
    if male && female {
        push(GenderFilter::All);
    }
}
