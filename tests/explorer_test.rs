use std::fs;
use std::path::Path;
use trends_core::config::Config;
use trends_core::core::aggregator::{compute_series, SampleKind};
use trends_core::core::matcher::{pattern_matches, Candidate, NameMatcher};
use trends_core::core::selection::{Selection, SelectionList};
use trends_core::core::state::Action;
use trends_core::core::types::{GenderFilter, YearRange, SUPPRESSED_LABEL};
use trends_core::{loader, permalink, Explorer, TrendsError};

fn write_chunks(dir: &Path) {
    fs::write(
        dir.join("manifest.json"),
        r#"{"chunks":[
            {"filename":"chunk-1880-1999.json","startYear":1880,"endYear":1999},
            {"filename":"chunk-2000-2022.json","startYear":2000,"endYear":2022}
        ]}"#,
    )
    .unwrap();
    fs::write(
        dir.join("chunk-1880-1999.json"),
        r#"{
            "Alan": {"M": {"1950": 400, "1951": 380}, "F": {"1950": 6}},
            "Aidan": {"M": {"1995": 120}, "F": {}},
            "Amy": {"M": {}, "F": {"1980": 900}}
        }"#,
    )
    .unwrap();
    fs::write(
        dir.join("chunk-2000-2022.json"),
        r#"{
            "Kai": {"M": {"2000": 10}, "F": {}},
            "Aidan": {"M": {"2000": 3000}, "F": {"2000": 12}},
            "Amy": {"M": {}, "F": {"2000": 1500}}
        }"#,
    )
    .unwrap();
}

fn loaded() -> (tempfile::TempDir, Explorer) {
    let dir = tempfile::tempdir().unwrap();
    write_chunks(dir.path());
    let explorer = Explorer::load(dir.path(), None, &Config::default()).unwrap();
    (dir, explorer)
}

#[test]
fn test_kai_example_series() {
    let (_dir, explorer) = loaded();
    let kai = Selection::literal("Kai", GenderFilter::Male);
    let series = compute_series(explorer.dataset(), &kai, YearRange::new(1998, 2002));

    assert_eq!(series.len(), 5);
    let kinds: Vec<_> = series.samples.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SampleKind::BeforeFirstAppearance,
            SampleKind::BeforeFirstAppearance,
            SampleKind::Count(10),
            SampleKind::Suppressed,
            SampleKind::Suppressed,
        ]
    );
    let labels: Vec<_> = series.points().into_iter().map(|p| p.label).collect();
    assert_eq!(labels, vec!["10", SUPPRESSED_LABEL, SUPPRESSED_LABEL]);
}

#[test]
fn test_regex_example_matches() {
    let (_dir, explorer) = loaded();
    let matches = pattern_matches(explorer.dataset(), "/^A.*n$/").unwrap();
    assert_eq!(matches, vec!["Aidan", "Alan"]);
}

#[test]
fn test_merged_chunks_span_both_files() {
    let (_dir, explorer) = loaded();
    let aidan = explorer.dataset().get("Aidan").unwrap();
    assert_eq!(aidan.male.keys().copied().collect::<Vec<_>>(), vec![1995, 2000]);
    assert_eq!(aidan.female.len(), 1);
}

#[test]
fn test_series_length_matches_range_for_every_selection() {
    let (_dir, explorer) = loaded();
    let ds = explorer.dataset();
    let selections = [
        Selection::literal("Alan", GenderFilter::All),
        Selection::literal("Nobody", GenderFilter::Female),
        Selection::PatternGroup { pattern: "/a/".into(), matches: pattern_matches(ds, "/a/").unwrap() },
    ];
    for range in [YearRange::new(1880, 2022), YearRange::new(2022, 1990), YearRange::new(1950, 1950)] {
        for selection in &selections {
            let series = compute_series(ds, selection, range);
            assert_eq!(series.len(), range.len());
            assert!(series
                .points()
                .iter()
                .all(|p| p.year >= series.first_year));
        }
    }
}

#[test]
fn test_search_select_and_share_session() {
    let (dir, mut explorer) = loaded();
    explorer.dispatch(Action::SetQuery("a".into()));
    let suggestions = explorer.suggestions();
    assert!(suggestions
        .candidates
        .iter()
        .all(|c| matches!(c, Candidate::Name { name, .. } if name.to_lowercase().starts_with('a'))));

    explorer.dispatch(Action::Select(Candidate::Pattern { query: "/^A.*n$/".into() }));
    explorer.dispatch(Action::Select(Candidate::Name { name: "Amy".into(), gender: GenderFilter::Female }));
    explorer.dispatch(Action::SetRange(YearRange::new(1999, 2000)));
    let chart = explorer.chart();
    assert_eq!(chart[0].label, "/^A.*n$/");
    assert_eq!(chart[0].point_at(2000).unwrap().label, "3,012");
    assert_eq!(chart[1].point_at(1999).unwrap().label, SUPPRESSED_LABEL);

    let link = explorer.permalink("https://example.org/names/");
    let mut other = Explorer::load(dir.path(), None, &Config::default()).unwrap();
    other.dispatch(Action::Restore(link));
    assert_eq!(other.state().selections, explorer.state().selections);
}

#[test]
fn test_snapshot_is_written_and_reused() {
    let dir = tempfile::tempdir().unwrap();
    write_chunks(dir.path());
    let snapshot = dir.path().join("cache").join("names.bin");

    let first = Explorer::load(dir.path(), Some(&snapshot), &Config::default()).unwrap();
    assert!(snapshot.exists());

    // Same size and mtime but unparseable, so only the snapshot can load it.
    let chunk = dir.path().join("chunk-2000-2022.json");
    let meta = fs::metadata(&chunk).unwrap();
    fs::write(&chunk, " ".repeat(meta.len() as usize)).unwrap();
    fs::File::options().write(true).open(&chunk).unwrap().set_modified(meta.modified().unwrap()).unwrap();

    let second = Explorer::load(dir.path(), Some(&snapshot), &Config::default()).unwrap();
    assert_eq!(second.dataset(), first.dataset());
}

#[test]
fn test_snapshot_is_not_shared_between_data_dirs() {
    let root = tempfile::tempdir().unwrap();
    let snapshot = root.path().join("names.bin");
    let write_dir = |name: &str, record: &str| {
        let dir = root.path().join(name);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("manifest.json"), r#"{"chunks":[{"file":"all.json"}]}"#).unwrap();
        fs::write(dir.join("all.json"), record).unwrap();
        dir
    };
    let b = write_dir("b", r#"{"Bo": {"M": {"1990": 40}}}"#);
    let a = write_dir("a", r#"{"Al": {"M": {"1990": 70}}}"#);

    let from_a = Explorer::load(&a, Some(&snapshot), &Config::default()).unwrap();
    assert_eq!(from_a.dataset().names().collect::<Vec<_>>(), vec!["Al"]);
    let from_b = Explorer::load(&b, Some(&snapshot), &Config::default()).unwrap();
    assert_eq!(from_b.dataset().names().collect::<Vec<_>>(), vec!["Bo"]);
}

#[test]
fn test_changed_chunk_invalidates_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    write_chunks(dir.path());
    let snapshot = dir.path().join("names.bin");
    Explorer::load(dir.path(), Some(&snapshot), &Config::default()).unwrap();

    fs::write(dir.path().join("chunk-2000-2022.json"), r#"{"Zed": {"M": {"2001": 9}}}"#).unwrap();
    let reloaded = Explorer::load(dir.path(), Some(&snapshot), &Config::default()).unwrap();
    assert!(reloaded.dataset().contains("Zed"));
    assert!(!reloaded.dataset().contains("Kai"));
}

#[test]
fn test_missing_data_dir_fails_despite_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    write_chunks(dir.path());
    let snapshot = dir.path().join("names.bin");
    Explorer::load(dir.path(), Some(&snapshot), &Config::default()).unwrap();
    assert!(snapshot.exists());

    let missing = dir.path().join("missing");
    assert!(Explorer::load(&missing, Some(&snapshot), &Config::default()).is_err());
}

#[test]
fn test_load_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_chunks(dir.path());
    fs::write(dir.path().join("chunk-2000-2022.json"), r#"{"Kai": {"M": {"2000": -3}}}"#).unwrap();
    assert!(matches!(loader::load_dir(dir.path()), Err(TrendsError::MalformedChunk { .. })));
    assert!(Explorer::load(&dir.path().join("missing"), None, &Config::default()).is_err());
}

#[test]
fn test_literal_permalink_round_trip() {
    let (_dir, explorer) = loaded();
    let list: SelectionList = [
        Selection::literal("Kai", GenderFilter::Male),
        Selection::literal("Amy", GenderFilter::All),
    ]
    .into_iter()
    .collect();
    let decoded = permalink::decode(&permalink::encode(&list), explorer.dataset());
    assert_eq!(decoded, Some(list));
}

#[test]
fn test_matcher_cap_reports_truncation() {
    let (_dir, explorer) = loaded();
    let result = NameMatcher::new(1).search(explorer.dataset(), "/a/");
    assert_eq!(result.candidates.len(), 2);
    assert!(result.truncated);
}
