// File: src/render.rs
//! Terminal rendering sink for chart series.

use crate::core::types::{format_count, YearRange};
use crate::presentation::ChartSeries;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, Write};

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SUPPRESSED_GLYPH: char = '·';

/// One glyph per bucket of years. A bucket shows its largest count, scaled
/// against `peak`; buckets with only "< 5" points get a dot and buckets with
/// no points stay blank.
pub fn sparkline(series: &ChartSeries, range: YearRange, width: usize, peak: u64) -> String {
    let (lo, _) = range.normalized();
    let years = range.len();
    let buckets = width.clamp(1, years);

    (0..buckets)
        .map(|b| {
            let from = lo as usize + b * years / buckets;
            let to = lo as usize + (b + 1) * years / buckets;
            let points: Vec<_> = series
                .points
                .iter()
                .filter(|p| (from..to).contains(&(p.year as usize)))
                .collect();
            let max = points.iter().map(|p| p.value).max();
            match max {
                None => ' ',
                Some(0) => SUPPRESSED_GLYPH,
                Some(v) => {
                    let level = (v as f64 / peak.max(1) as f64 * (BARS.len() - 1) as f64).round() as usize;
                    BARS[level.min(BARS.len() - 1)]
                }
            }
        })
        .collect()
}

pub fn render_chart<W: Write>(out: &mut W, series: &[ChartSeries], range: YearRange, width: usize) -> io::Result<()> {
    let (lo, hi) = range.normalized();
    if series.is_empty() {
        queue!(out, Print("No names selected.\n"))?;
        return out.flush();
    }

    let peak = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.value))
        .max()
        .unwrap_or(0);

    for s in series {
        let (r, g, b) = s.border_color.to_rgb();
        let line = sparkline(s, range, width, peak);
        let series_peak = s.points.iter().map(|p| p.value).max().unwrap_or(0);
        queue!(
            out,
            SetForegroundColor(Color::Rgb { r, g, b }),
            Print(format!("■ {:<20} ", s.label)),
            Print(line),
            ResetColor,
            SetAttribute(Attribute::Dim),
            Print(format!("  peak {}\n", format_count(series_peak))),
            SetAttribute(Attribute::Reset),
        )?;
    }

    let span = width.clamp(1, range.len());
    let axis_gap = span.saturating_sub(8);
    queue!(
        out,
        SetAttribute(Attribute::Dim),
        Print(format!("  {:<20} {}{:>gap$}\n", "", lo, hi, gap = axis_gap.max(4))),
        SetAttribute(Attribute::Reset),
    )?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SeriesPoint;
    use crate::presentation::Hsl;

    fn series(points: &[(u16, u64)]) -> ChartSeries {
        ChartSeries {
            label: "Kai (M)".into(),
            border_color: Hsl::for_series(0),
            background_color: Hsl::for_series(0).with_alpha(0.5),
            points: points
                .iter()
                .map(|&(year, value)| SeriesPoint {
                    year,
                    value,
                    label: if value == 0 { "< 5".into() } else { format_count(value) },
                })
                .collect(),
        }
    }

    #[test]
    fn test_sparkline_one_glyph_per_year() {
        let s = series(&[(2000, 100), (2001, 0), (2002, 50)]);
        let line = sparkline(&s, YearRange::new(1998, 2002), 80, 100);
        assert_eq!(line.chars().collect::<Vec<_>>(), vec![' ', ' ', '█', '·', '▅']);
    }

    #[test]
    fn test_sparkline_buckets_wide_ranges() {
        let s = series(&[(1880, 10), (2022, 10)]);
        let line = sparkline(&s, YearRange::full(), 10, 10);
        assert_eq!(line.chars().count(), 10);
        assert!(line.starts_with('█') && line.ends_with('█'));
    }

    #[test]
    fn test_render_chart_writes_labels() {
        let mut out = Vec::new();
        render_chart(&mut out, &[series(&[(2000, 1500)])], YearRange::new(1999, 2001), 40).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Kai (M)"));
        assert!(text.contains("peak 1,500"));

        let mut out = Vec::new();
        render_chart(&mut out, &[], YearRange::full(), 40).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No names selected.\n");
    }
}
