// 🥧 Pie chart data - slice geometry shared by every renderer
// Rendering itself is delegated to a PieRenderer (plain text or the terminal UI)

use crate::analysis::CategorySummary;
use crate::error::ExpenseError;
use anyhow::Result;
use std::io::Write;

pub const CHART_TITLE: &str = "Expense Distribution by Category";

/// First slice starts here, slices go counter-clockwise
pub const START_ANGLE_DEG: f64 = 140.0;

/// Every slice is pushed out from the center by this fraction of the radius
pub const EXPLODE: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub fraction: f64,
    pub start_deg: f64,
    pub sweep_deg: f64,
}

impl PieSlice {
    pub fn mid_angle_rad(&self) -> f64 {
        (self.start_deg + self.sweep_deg / 2.0).to_radians()
    }

    /// Center of the slice after the explode offset
    pub fn offset(&self) -> (f64, f64) {
        let mid = self.mid_angle_rad();
        (EXPLODE * mid.cos(), EXPLODE * mid.sin())
    }

    /// Percentage label, one decimal ("85.7%")
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }

    /// Where the category name goes, just outside the rim
    pub fn label_position(&self) -> (f64, f64) {
        let mid = self.mid_angle_rad();
        let (dx, dy) = self.offset();
        (dx + 1.1 * mid.cos(), dy + 1.1 * mid.sin())
    }

    /// Where the percentage goes, inside the slice
    pub fn percent_position(&self) -> (f64, f64) {
        let mid = self.mid_angle_rad();
        let (dx, dy) = self.offset();
        (dx + 0.6 * mid.cos(), dy + 0.6 * mid.sin())
    }

    /// Points filling the wedge on a polar grid (unit radius, offset applied)
    pub fn fill_points(&self, rings: usize, step_deg: f64) -> Vec<(f64, f64)> {
        let (dx, dy) = self.offset();
        let steps = (self.sweep_deg / step_deg).ceil().max(1.0) as usize;
        let mut points = Vec::with_capacity(rings * (steps + 1));

        for ring in 1..=rings {
            let r = ring as f64 / rings as f64;
            for i in 0..=steps {
                let deg = self.start_deg + self.sweep_deg * (i as f64 / steps as f64);
                let theta = deg.to_radians();
                points.push((dx + r * theta.cos(), dy + r * theta.sin()));
            }
        }

        points
    }
}

/// Proportional slices in the order the categories were given
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Build slices from category totals
    /// Categories with a zero or negative total have no area and are left out
    pub fn from_totals(totals: &[(String, f64)]) -> Self {
        let positive: Vec<&(String, f64)> = totals.iter().filter(|(_, v)| *v > 0.0).collect();
        let sum: f64 = positive.iter().map(|(_, v)| v).sum();

        let mut start = START_ANGLE_DEG;
        let mut slices = Vec::with_capacity(positive.len());

        for (label, value) in positive {
            let fraction = value / sum;
            let sweep = fraction * 360.0;
            slices.push(PieSlice {
                label: label.clone(),
                value: *value,
                fraction,
                start_deg: start,
                sweep_deg: sweep,
            });
            start += sweep;
        }

        PieChart {
            title: CHART_TITLE.to_string(),
            slices,
        }
    }

    pub fn from_summary(by_category: &[CategorySummary]) -> Self {
        let totals: Vec<(String, f64)> = by_category
            .iter()
            .map(|c| (c.category.clone(), c.total))
            .collect();
        Self::from_totals(&totals)
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// External plotting collaborator: receives the aggregated data and draws it
pub trait PieRenderer {
    fn render(&mut self, chart: &PieChart) -> Result<()>;
}

impl<T: PieRenderer + ?Sized> PieRenderer for Box<T> {
    fn render(&mut self, chart: &PieChart) -> Result<()> {
        (**self).render(chart)
    }
}

/// Hand the category breakdown to a renderer
/// Nothing with a positive total means nothing to draw
pub fn render_chart(by_category: &[CategorySummary], renderer: &mut dyn PieRenderer) -> Result<()> {
    let chart = PieChart::from_summary(by_category);
    if chart.is_empty() {
        return Err(ExpenseError::EmptyDataset.into());
    }
    renderer.render(&chart)
}

const BAR_WIDTH: usize = 40;

/// Fallback renderer: one proportional bar per category
pub struct TextPieRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextPieRenderer<W> {
    pub fn new(out: W) -> Self {
        TextPieRenderer { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PieRenderer for TextPieRenderer<W> {
    fn render(&mut self, chart: &PieChart) -> Result<()> {
        let label_width = chart
            .slices
            .iter()
            .map(|s| s.label.chars().count())
            .max()
            .unwrap_or(0);

        writeln!(self.out, "\n🥧 {}", chart.title)?;
        for slice in &chart.slices {
            let filled = (slice.fraction * BAR_WIDTH as f64).round() as usize;
            writeln!(
                self.out,
                "{:<lw$}  {}{}  {:>6}",
                slice.label,
                "█".repeat(filled),
                " ".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
                slice.percent_label(),
                lw = label_width
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}
