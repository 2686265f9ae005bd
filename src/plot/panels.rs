//! Panel renderers.
//!
//! Each function draws one chart into its own drawing area. They are generic
//! over the Plotters backend so the same code writes SVG and PNG.
//! A panel with nothing to draw shows a "no data" placeholder instead.

use std::f64::consts::{FRAC_PI_2, TAU};

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::plot::data::BoxGroup;
use crate::plot::palette::{MEDIAN_ORANGE, STEEL_BLUE, coolwarm};
use crate::report::format::truncate;
use crate::stats::{Bin, CorrelationMatrix};

pub type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

pub(crate) const FONT: &str = "sans-serif";
const CAPTION_SIZE: u32 = 24;
const LABEL_SIZE: u32 = 13;
const CATEGORY_LABEL_CHARS: usize = 12;

fn centered(size: u32) -> TextStyle<'static> {
    (FONT, size)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center))
}

/// Placeholder for a panel whose inputs are missing.
pub fn draw_empty<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, title: &str) -> DrawResult<DB> {
    let (w, h) = area.dim_in_pixel();
    area.draw(&Text::new(
        format!("{title}: no data"),
        ((w / 2) as i32, (h / 2) as i32),
        centered(18),
    ))?;
    Ok(())
}

/// Histogram from precomputed bins.
pub fn draw_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    x_desc: &str,
    bins: &[Bin],
    color: RGBColor,
) -> DrawResult<DB> {
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return draw_empty(area, title);
    };
    let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64 * 1.05;

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, CAPTION_SIZE))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first.lo..last.hi, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc("Frequency")
        .x_labels(6)
        .x_label_formatter(&|v| fmt_compact(*v))
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.lo, 0.0), (b.hi, b.count as f64)], color.mix(0.7).filled())
    }))?;
    Ok(())
}

/// Scatter plot of `(x, y)` points.
pub fn draw_scatter<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    points: &[(f64, f64)],
) -> DrawResult<DB> {
    if points.is_empty() {
        return draw_empty(area, title);
    }
    let (x0, x1) = padded_range(points.iter().map(|p| p.0));
    let (y0, y1) = padded_range(points.iter().map(|p| p.1));

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, CAPTION_SIZE))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_labels(6)
        .x_label_formatter(&|v| fmt_compact(*v))
        .y_label_formatter(&|v| fmt_compact(*v))
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|&p| Circle::new(p, 2, STEEL_BLUE.mix(0.5).filled())),
    )?;
    Ok(())
}

/// Vertical bar chart with one labeled bar per category.
pub fn draw_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    y_desc: &str,
    bars: &[(String, f64)],
    color: RGBColor,
) -> DrawResult<DB> {
    if bars.is_empty() {
        return draw_empty(area, title);
    }
    let n = bars.len();
    let y_max = bars.iter().map(|b| b.1).fold(0.0, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, CAPTION_SIZE))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc(y_desc)
        .x_labels(n)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => bars
                .get(*i)
                .map(|(label, _)| truncate(label, CATEGORY_LABEL_CHARS))
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|v| fmt_compact(*v))
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(color.filled())
            .margin(8)
            .data(bars.iter().enumerate().map(|(i, (_, v))| (i, *v))),
    )?;
    Ok(())
}

/// Pie chart of category shares, starting at 12 o'clock and running
/// counter-clockwise, with a percentage label per slice.
pub fn draw_pie<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    slices: &[(String, usize)],
) -> DrawResult<DB> {
    let total: usize = slices.iter().map(|s| s.1).sum();
    if total == 0 {
        return draw_empty(area, title);
    }

    // Stretch the x range to the panel's aspect ratio so the pie stays round.
    let (w, h) = area.dim_in_pixel();
    let half_y = 1.45;
    let half_x = half_y * w.max(1) as f64 / h.max(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, CAPTION_SIZE))
        .margin(10)
        .build_cartesian_2d(-half_x..half_x, -half_y..half_y)?;

    let mut start = FRAC_PI_2;
    for (idx, (label, count)) in slices.iter().enumerate() {
        let share = *count as f64 / total as f64;
        let sweep = share * TAU;
        let color = Palette99::pick(idx);

        chart.draw_series(std::iter::once(Polygon::new(
            wedge(start, sweep),
            color.filled(),
        )))?;

        let mid = start + sweep / 2.0;
        chart.draw_series(std::iter::once(Text::new(
            format!("{} {:.1}%", truncate(label, CATEGORY_LABEL_CHARS), share * 100.0),
            (1.2 * mid.cos(), 1.2 * mid.sin()),
            centered(LABEL_SIZE),
        )))?;
        start += sweep;
    }
    Ok(())
}

fn wedge(start: f64, sweep: f64) -> Vec<(f64, f64)> {
    let steps = ((sweep / TAU) * 180.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push((0.0, 0.0));
    for s in 0..=steps {
        let a = start + sweep * s as f64 / steps as f64;
        points.push((a.cos(), a.sin()));
    }
    points
}

/// Box plot per group with 1.5×IQR whiskers and outlier markers.
pub fn draw_box_plot<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    y_desc: &str,
    groups: &[BoxGroup],
) -> DrawResult<DB> {
    if groups.iter().all(|g| g.stats.is_none()) {
        return draw_empty(area, title);
    }
    let n = groups.len();
    let (y0, y1) = padded_range(groups.iter().filter_map(|g| g.stats.as_ref()).flat_map(|g| {
        [g.whisker_lo, g.whisker_hi]
            .into_iter()
            .chain(g.outliers.iter().copied())
    }));

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, CAPTION_SIZE))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), y0..y1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc(y_desc)
        .x_labels(n)
        .x_label_formatter(&|v| category_at(*v, |i| groups.get(i).map(|g| g.label.as_str())))
        .y_label_formatter(&|v| fmt_compact(*v))
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    let half = 0.3;
    let centers = || {
        groups
            .iter()
            .enumerate()
            .filter_map(|(i, g)| Some((i as f64, g.stats.as_ref()?)))
    };

    chart.draw_series(centers().map(|(x, g)| {
        Rectangle::new([(x - half, g.q1), (x + half, g.q3)], STEEL_BLUE.mix(0.3).filled())
    }))?;
    chart.draw_series(centers().map(|(x, g)| {
        Rectangle::new([(x - half, g.q1), (x + half, g.q3)], BLACK.stroke_width(1))
    }))?;
    chart.draw_series(centers().map(|(x, g)| {
        PathElement::new(
            vec![(x - half, g.median), (x + half, g.median)],
            MEDIAN_ORANGE.stroke_width(2),
        )
    }))?;

    // Whisker stems and caps.
    chart.draw_series(centers().flat_map(|(x, g)| {
        let cap = half / 2.0;
        [
            vec![(x, g.q1), (x, g.whisker_lo)],
            vec![(x, g.q3), (x, g.whisker_hi)],
            vec![(x - cap, g.whisker_lo), (x + cap, g.whisker_lo)],
            vec![(x - cap, g.whisker_hi), (x + cap, g.whisker_hi)],
        ]
        .into_iter()
        .map(|path| PathElement::new(path, BLACK.stroke_width(1)))
    }))?;

    chart.draw_series(centers().flat_map(|(x, g)| {
        g.outliers
            .iter()
            .map(move |&v| Circle::new((x, v), 3, BLACK.stroke_width(1)))
    }))?;
    Ok(())
}

/// Annotated correlation heatmap.
pub fn draw_heatmap<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    matrix: Option<&CorrelationMatrix>,
) -> DrawResult<DB> {
    let Some(matrix) = matrix.filter(|m| !m.is_empty()) else {
        return draw_empty(area, title);
    };
    let k = matrix.len();
    let span = -0.5..(k as f64 - 0.5);

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, CAPTION_SIZE))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(110)
        .build_cartesian_2d(span.clone(), span)?;

    // Row 0 is drawn at the top.
    let row_at = |y: f64| -> Option<usize> {
        let from_bottom = nearest_index(y)?;
        (from_bottom < k).then(|| k - 1 - from_bottom)
    };

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(k)
        .y_labels(k)
        .x_label_formatter(&|v| category_at(*v, |i| matrix.names.get(i).map(String::as_str)))
        .y_label_formatter(&|v| {
            row_at(*v)
                .and_then(|i| matrix.names.get(i))
                .map(|n| truncate(n, 16))
                .unwrap_or_default()
        })
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    let cells = || {
        (0..k).flat_map(move |i| (0..k).map(move |j| (i, j, (k - 1 - i) as f64, j as f64)))
    };

    chart.draw_series(cells().map(|(i, j, y, x)| {
        Rectangle::new(
            [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
            coolwarm(matrix.values[i][j]).filled(),
        )
    }))?;

    chart.draw_series(cells().map(|(i, j, y, x)| {
        let r = matrix.values[i][j];
        let text = if r.is_nan() { "nan".to_string() } else { format!("{r:.2}") };
        Text::new(text, (x, y), centered(16))
    }))?;
    Ok(())
}

fn nearest_index(v: f64) -> Option<usize> {
    let r = v.round();
    ((v - r).abs() < 1e-6 && r >= 0.0).then_some(r as usize)
}

/// Label for an integer tick on a categorical axis; empty between ticks.
fn category_at<'a>(v: f64, lookup: impl Fn(usize) -> Option<&'a str>) -> String {
    nearest_index(v)
        .and_then(lookup)
        .map(|s| truncate(s, CATEGORY_LABEL_CHARS))
        .unwrap_or_default()
}

/// Data range with 5% headroom on both sides (unit range for constant data).
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    if lo == hi {
        return (lo - 0.5, hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Short tick label: `1.2M`, `35k`, `950`.
pub fn fmt_compact(v: f64) -> String {
    let a = v.abs();
    if a >= 1e9 {
        format!("{:.1}B", v / 1e9)
    } else if a >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if a >= 1e4 {
        format!("{:.0}k", v / 1e3)
    } else if a >= 100.0 || v == v.trunc() {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}
