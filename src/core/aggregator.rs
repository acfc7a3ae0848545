// File: src/core/aggregator.rs
use crate::core::dataset::Dataset;
use crate::core::selection::Selection;
use crate::core::types::{format_count, SeriesPoint, Year, YearRange, SUPPRESSED_LABEL};
use tracing::debug;

/// What the data says about one year of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    /// Earlier than any recorded year for the selection. Not rendered.
    BeforeFirstAppearance,
    /// The name was in use but every contributing count was under the threshold.
    Suppressed,
    Count(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSample {
    pub year: Year,
    pub kind: SampleKind,
}

impl YearSample {
    pub fn to_point(self) -> Option<SeriesPoint> {
        match self.kind {
            SampleKind::BeforeFirstAppearance => None,
            SampleKind::Suppressed => Some(SeriesPoint {
                year: self.year,
                value: 0,
                label: SUPPRESSED_LABEL.to_string(),
            }),
            SampleKind::Count(n) => Some(SeriesPoint {
                year: self.year,
                value: n,
                label: format_count(n),
            }),
        }
    }
}

/// One sample per year of the requested range, in ascending year order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub first_year: Year,
    pub samples: Vec<YearSample>,
}

impl Series {
    /// The points a chart should draw; years before the first appearance are left out.
    pub fn points(&self) -> Vec<SeriesPoint> {
        self.samples.iter().filter_map(|s| s.to_point()).collect()
    }

    pub fn sample(&self, year: Year) -> Option<&YearSample> {
        self.samples.iter().find(|s| s.year == year)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn peak(&self) -> u64 {
        self.samples
            .iter()
            .filter_map(|s| match s.kind {
                SampleKind::Count(n) => Some(n),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }
}

/// Builds the per-year series for `selection` over `range`.
///
/// Counts are summed over every contributing (name, gender) pair. The first
/// appearance is taken over all recorded years, not only those in the range,
/// so a zero sum at or after it reads as "under 5" rather than "unused".
/// When nothing is recorded at all the range start stands in for it.
pub fn compute_series(dataset: &Dataset, selection: &Selection, range: YearRange) -> Series {
    let (lo, _) = range.normalized();
    let genders = selection.gender_filter().genders();
    let records: Vec<_> = selection
        .contributing_names()
        .into_iter()
        .filter_map(|name| dataset.get(name))
        .collect();

    let first_year = records
        .iter()
        .filter_map(|r| r.first_year(genders))
        .min()
        .unwrap_or(lo);

    let samples = range
        .years()
        .map(|year| {
            let sum: u64 = records
                .iter()
                .flat_map(|r| genders.iter().map(move |&g| r.count(g, year)))
                .sum();
            let kind = if year < first_year {
                SampleKind::BeforeFirstAppearance
            } else if sum == 0 {
                SampleKind::Suppressed
            } else {
                SampleKind::Count(sum)
            };
            YearSample { year, kind }
        })
        .collect();

    debug!(selection = %selection.label(), first_year, "computed series");
    Series { first_year, samples }
}
