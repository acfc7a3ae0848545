// File: src/presentation.rs
use crate::core::aggregator::compute_series;
use crate::core::dataset::Dataset;
use crate::core::selection::SelectionList;
use crate::core::types::{SeriesPoint, Year, YearRange};
use serde::Serialize;

/// An HSL color with an alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
}

impl Hsl {
    /// Color of the `index`-th series. Hues step by the golden angle so
    /// neighbouring series stay far apart on the wheel.
    pub fn for_series(index: usize) -> Self {
        Self {
            hue: (index as f64 * 137.5 + 200.0) % 360.0,
            saturation: 0.7,
            lightness: 0.5,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn to_css(&self) -> String {
        let (h, s, l) = (self.hue, self.saturation * 100.0, self.lightness * 100.0);
        if self.alpha < 1.0 {
            format!("hsla({}, {}%, {}%, {})", h, s, l, self.alpha)
        } else {
            format!("hsl({}, {}%, {}%)", h, s, l)
        }
    }

    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let c = (1.0 - (2.0 * self.lightness - 1.0).abs()) * self.saturation;
        let h = self.hue / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = self.lightness - c / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (channel(r), channel(g), channel(b))
    }
}

/// A chart-ready line: what the rendering surface consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub border_color: Hsl,
    pub background_color: Hsl,
    pub points: Vec<SeriesPoint>,
}

impl ChartSeries {
    pub fn point_at(&self, year: Year) -> Option<&SeriesPoint> {
        self.points.iter().find(|p| p.year == year)
    }
}

/// One series per selection, in selection order.
pub fn chart(dataset: &Dataset, selections: &SelectionList, range: YearRange) -> Vec<ChartSeries> {
    selections
        .iter()
        .enumerate()
        .map(|(index, selection)| {
            let color = Hsl::for_series(index);
            ChartSeries {
                label: selection.label(),
                border_color: color,
                background_color: color.with_alpha(0.5),
                points: compute_series(dataset, selection, range).points(),
            }
        })
        .collect()
}

/// Tooltip text for `year`: a title line, then one line per series that has
/// a point there.
pub fn tooltip(series: &[ChartSeries], year: Year) -> Vec<String> {
    let mut lines = vec![format!("Year: {}", year)];
    lines.extend(
        series
            .iter()
            .filter_map(|s| s.point_at(year).map(|p| format!("{}: {}", s.label, p.label))),
    );
    lines
}
