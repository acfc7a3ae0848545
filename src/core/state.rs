// File: src/core/state.rs
use crate::core::dataset::Dataset;
use crate::core::matcher::{Candidate, NameMatcher};
use crate::core::selection::SelectionList;
use crate::core::types::{Year, YearRange, MAX_YEAR, MIN_YEAR};
use crate::permalink;
use tracing::debug;

/// Everything the user can change during a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub selections: SelectionList,
    pub query: String,
    pub year_range: YearRange,
    /// Year whose tooltip was pinned by clicking a point.
    pub pinned_year: Option<Year>,
}

#[derive(Debug, Clone)]
pub enum Action {
    SetQuery(String),
    /// Adds the selection a candidate resolves to, then clears the query.
    Select(Candidate),
    Remove(usize),
    Clear,
    SetStartYear(Year),
    SetEndYear(Year),
    /// Replaces both bounds at once, clamped to the dataset's years.
    SetRange(YearRange),
    PinYear(Option<Year>),
    /// Applies a share-link fragment; a bad fragment changes nothing.
    Restore(String),
    LoadSelections(SelectionList),
}

/// Pure transition from `state` to the next state.
pub fn update(state: &AppState, action: Action, dataset: &Dataset, matcher: &NameMatcher) -> AppState {
    let mut next = state.clone();
    match action {
        Action::SetQuery(query) => next.query = query,
        Action::Select(candidate) => {
            if let Some(selection) = matcher.resolve(dataset, &candidate) {
                next.selections = state.selections.append_unique(selection);
                next.query.clear();
            }
        }
        Action::Remove(index) => {
            next.selections = state.selections.remove_at(index);
            next.pinned_year = None;
        }
        Action::Clear => {
            next.selections = state.selections.clear();
            next.pinned_year = None;
        }
        Action::SetStartYear(year) => {
            let end = state.year_range.end;
            next.year_range = YearRange::new(year.clamp(MIN_YEAR, end.max(MIN_YEAR)), end);
        }
        Action::SetEndYear(year) => {
            let start = state.year_range.start;
            next.year_range = YearRange::new(start, year.clamp(start.min(MAX_YEAR), MAX_YEAR));
        }
        Action::SetRange(range) => {
            next.year_range = range.clamped();
            next.pinned_year = next.pinned_year.filter(|y| next.year_range.contains(*y));
        }
        Action::PinYear(year) => {
            next.pinned_year = year.filter(|y| state.year_range.contains(*y));
        }
        Action::Restore(fragment) => {
            if let Some(list) = permalink::decode(&fragment, dataset) {
                next.selections = list;
                next.pinned_year = None;
            }
        }
        Action::LoadSelections(list) => {
            next.selections = list;
            next.pinned_year = None;
        }
    }
    debug!(selections = next.selections.len(), "state updated");
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::NameRecord;
    use crate::core::selection::Selection;
    use crate::core::types::GenderFilter;

    fn dataset() -> Dataset {
        let mut ds = Dataset::new();
        ds.insert("Kai", NameRecord { male: [(2000, 10)].into_iter().collect(), ..Default::default() });
        ds
    }

    fn apply(state: &AppState, action: Action) -> AppState {
        update(state, action, &dataset(), &NameMatcher::default())
    }

    fn kai() -> Candidate {
        Candidate::Name { name: "Kai".into(), gender: GenderFilter::Male }
    }

    #[test]
    fn test_select_appends_once_and_clears_query() {
        let state = apply(&AppState::default(), Action::SetQuery("ka".into()));
        let state = apply(&state, Action::Select(kai()));
        assert_eq!(state.selections.len(), 1);
        assert!(state.query.is_empty());

        let again = apply(&state, Action::Select(kai()));
        assert_eq!(again.selections, state.selections);
    }

    #[test]
    fn test_unresolvable_select_keeps_query() {
        let state = apply(&AppState::default(), Action::SetQuery("/(".into()));
        let state = apply(&state, Action::Select(Candidate::Pattern { query: "/(".into() }));
        assert!(state.selections.is_empty());
        assert_eq!(state.query, "/(");
    }

    #[test]
    fn test_remove_and_clear_unpin_tooltip() {
        let state = apply(&AppState::default(), Action::Select(kai()));
        let pinned = apply(&state, Action::PinYear(Some(2000)));
        assert_eq!(pinned.pinned_year, Some(2000));

        let removed = apply(&pinned, Action::Remove(5));
        assert_eq!(removed.selections.len(), 1);
        assert_eq!(removed.pinned_year, None);

        let cleared = apply(&pinned, Action::Clear);
        assert!(cleared.selections.is_empty());
        assert_eq!(cleared.pinned_year, None);
    }

    #[test]
    fn test_year_bounds_are_clamped() {
        let state = apply(&AppState::default(), Action::SetStartYear(1700));
        assert_eq!(state.year_range.start, MIN_YEAR);
        let state = apply(&state, Action::SetEndYear(1990));
        let state = apply(&state, Action::SetStartYear(1995));
        assert_eq!(state.year_range, YearRange::new(1990, 1990));
        let state = apply(&state, Action::SetEndYear(3000));
        assert_eq!(state.year_range, YearRange::new(1990, MAX_YEAR));
        assert_eq!(apply(&state, Action::PinYear(1800.into())).pinned_year, None);

        let pinned = apply(&state, Action::PinYear(Some(2000)));
        let narrowed = apply(&pinned, Action::SetRange(YearRange::new(2010, 1700)));
        assert_eq!(narrowed.year_range, YearRange::new(2010, MIN_YEAR));
        assert_eq!(narrowed.pinned_year, Some(2000));
        let moved = apply(&pinned, Action::SetRange(YearRange::new(2005, 2010)));
        assert_eq!(moved.pinned_year, None);
    }

    #[test]
    fn test_restore_ignores_bad_fragment() {
        let state = apply(&AppState::default(), Action::Select(kai()));
        assert_eq!(apply(&state, Action::Restore("#garbage".into())), state);

        let list = SelectionList::new().append(Selection::literal("Kai", GenderFilter::All));
        let fragment = permalink::encode(&list);
        assert_eq!(apply(&state, Action::Restore(fragment)).selections, list);
    }
}
