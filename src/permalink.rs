// File: src/permalink.rs
//! Share links. The selection list is written as JSON, percent-encoded and
//! placed after the `#` of the page URL, e.g. `#%7B%22names%22...`.

use crate::core::dataset::Dataset;
use crate::core::matcher::pattern_matches;
use crate::core::selection::{Selection, SelectionList};
use crate::core::types::GenderFilter;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Serialize, Deserialize)]
struct LinkState {
    names: Vec<LinkEntry>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkEntry {
    name: String,
    gender: GenderFilter,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    is_regex: bool,
}

/// Encodes the selections as a URL fragment, without the leading `#`.
/// Only the name/pattern and gender of each entry are kept.
pub fn encode(selections: &SelectionList) -> String {
    let state = LinkState {
        names: selections
            .iter()
            .map(|s| match s {
                Selection::Literal { name, gender } => LinkEntry {
                    name: name.clone(),
                    gender: *gender,
                    is_regex: false,
                },
                Selection::PatternGroup { pattern, .. } => LinkEntry {
                    name: pattern.clone(),
                    gender: GenderFilter::All,
                    is_regex: true,
                },
            })
            .collect(),
    };
    // Serializing plain strings and enums into a String cannot fail.
    let json = serde_json::to_string(&state).unwrap_or_default();
    urlencoding::encode(&json).into_owned()
}

/// A full share URL: `base` with any existing fragment replaced.
pub fn share_url(base: &str, selections: &SelectionList) -> String {
    let base = base.split_once('#').map_or(base, |(b, _)| b);
    format!("{}#{}", base, encode(selections))
}

/// Rebuilds a selection list from a fragment, a `#fragment`, or a whole URL.
///
/// A stored `matches` array is ignored: pattern entries are matched again
/// against `dataset`, and a pattern that no longer matches anything is
/// dropped. Anything malformed yields `None` and the caller keeps its state.
pub fn decode(input: &str, dataset: &Dataset) -> Option<SelectionList> {
    let fragment = input.split_once('#').map_or(input, |(_, f)| f);
    if fragment.is_empty() {
        return None;
    }
    let json = match urlencoding::decode(fragment) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "ignoring permalink with bad percent-encoding");
            return None;
        }
    };
    let state: LinkState = match serde_json::from_str(&json) {
        Ok(state) => state,
        Err(e) => {
            warn!(error = %e, "ignoring malformed permalink");
            return None;
        }
    };

    let list = state
        .names
        .into_iter()
        .filter_map(|entry| {
            if !entry.is_regex {
                return Some(Selection::literal(entry.name, entry.gender));
            }
            match pattern_matches(dataset, &entry.name) {
                Ok(matches) if !matches.is_empty() => Some(Selection::PatternGroup {
                    pattern: entry.name,
                    matches,
                }),
                _ => {
                    warn!(pattern = entry.name.as_str(), "dropping permalink pattern with no matches");
                    None
                }
            }
        })
        .collect();
    Some(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::NameRecord;

    fn dataset() -> Dataset {
        let mut ds = Dataset::new();
        for name in ["Aidan", "Alan", "Amy"] {
            ds.insert(name, NameRecord { male: [(2000, 5)].into_iter().collect(), ..Default::default() });
        }
        ds
    }

    #[test]
    fn test_literal_round_trip() {
        let list = SelectionList::new()
            .append(Selection::literal("Amy", GenderFilter::Female))
            .append(Selection::literal("Zoë Ann", GenderFilter::All))
            .append(Selection::literal("Amy", GenderFilter::Female));
        let fragment = encode(&list);
        assert!(!fragment.contains(' '));
        assert_eq!(decode(&fragment, &dataset()), Some(list));
    }

    #[test]
    fn test_decode_accepts_legacy_regex_entries() {
        let json = r#"{"names":[{"name":"/^A.*n$/","gender":"All","isRegex":true,"matches":["Stale"]}]}"#;
        let url = format!("https://example.org/charts/#{}", urlencoding::encode(json));
        let list = decode(&url, &dataset()).unwrap();
        assert_eq!(
            list.get(0),
            Some(&Selection::PatternGroup {
                pattern: "/^A.*n$/".into(),
                matches: vec!["Aidan".into(), "Alan".into()],
            })
        );
    }

    #[test]
    fn test_pattern_round_trip_recomputes_matches() {
        let list = SelectionList::new().append(Selection::PatternGroup {
            pattern: "/^am/".into(),
            matches: vec!["Amy".into()],
        });
        let url = share_url("https://example.org/#old", &list);
        assert!(url.starts_with("https://example.org/#%7B"));
        assert_eq!(decode(&url, &dataset()), Some(list));
    }

    #[test]
    fn test_malformed_fragments_are_ignored() {
        let ds = dataset();
        assert_eq!(decode("", &ds), None);
        assert_eq!(decode("#", &ds), None);
        assert_eq!(decode("#not-json", &ds), None);
        assert_eq!(decode("%7B%22names%22%3A5%7D", &ds), None);
        let bad_gender = urlencoding::encode(r#"{"names":[{"name":"Amy","gender":"X"}]}"#).into_owned();
        assert_eq!(decode(&bad_gender, &ds), None);
    }
}
