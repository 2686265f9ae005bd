//! Dashboard rendering with Plotters.
//!
//! Nine panels on a 3×3 grid, written to a single image file:
//! - chart inputs are computed first (`data`)
//! - each panel is drawn by a backend-generic function (`panels`)
//! - the backend is picked from the output extension (`.svg` or bitmap)

pub mod data;
pub mod palette;
pub mod panels;

use std::path::Path;
use std::sync::OnceLock;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};
use tracing::info;

pub use data::DashboardData;

use crate::error::AppError;
use panels::DrawResult;

/// Font used for every caption and label, registered under `panels::FONT`.
static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Register the bundled font once per process.
fn ensure_font() -> Result<(), AppError> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED.get_or_init(|| register_font(panels::FONT, FontStyle::Normal, DEJAVU_SANS).is_ok());
    if ok {
        Ok(())
    } else {
        Err(AppError::render("bundled font could not be loaded"))
    }
}

/// Render the dashboard to `path` at `size` pixels.
pub fn render_dashboard(data: &DashboardData, path: &Path, size: (u32, u32)) -> Result<(), AppError> {
    ensure_font()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    if is_svg(path) {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_dashboard(&root, data).map_err(AppError::render)?;
        root.present().map_err(AppError::render)?;
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_dashboard(&root, data).map_err(AppError::render)?;
        root.present().map_err(AppError::render)?;
    }

    info!(path = %path.display(), width = size.0, height = size.1, "dashboard saved");
    Ok(())
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

fn draw_dashboard<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, data: &DashboardData) -> DrawResult<DB> {
    root.fill(&WHITE)?;
    let cells = root.split_evenly((3, 3));

    panels::draw_histogram(&cells[0], "Price Distribution", "Price", &data.price_bins, palette::SKY_BLUE)?;
    panels::draw_scatter(&cells[1], "Price vs Mileage", "Mileage (km)", "Price", &data.scatter)?;
    panels::draw_bars(&cells[2], "Top 10 Brands", "Frequency", &data.top_brands, palette::LIGHT_CORAL)?;
    panels::draw_pie(&cells[3], "Fuel Type Distribution", &data.fuel_counts)?;
    panels::draw_histogram(&cells[4], "Model Year Distribution", "Model Year", &data.year_bins, palette::GOLD)?;
    panels::draw_bars(
        &cells[5],
        "Transmission Distribution",
        "Frequency",
        &data.transmission_counts,
        palette::LIGHT_GREEN,
    )?;
    panels::draw_box_plot(&cells[6], "Price by Fuel Type", "Price", &data.price_by_fuel)?;
    panels::draw_heatmap(&cells[7], "Correlation Matrix", data.correlations.as_ref())?;
    panels::draw_bars(
        &cells[8],
        "Average Price by Brand (Top 10)",
        "Average Price",
        &data.avg_price_by_brand,
        palette::PLUM,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_follows_extension() {
        assert!(is_svg(Path::new("out/eda.svg")));
        assert!(is_svg(Path::new("EDA.SVG")));
        assert!(!is_svg(Path::new("eda.png")));
        assert!(!is_svg(Path::new("eda")));
    }

    #[test]
    fn renders_placeholders_for_empty_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("empty.svg");
        render_dashboard(&DashboardData::default(), &path, (900, 900)).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("no data"));
    }

    #[test]
    fn box_plot_keeps_unpriced_slots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boxes.svg");
        let data = DashboardData {
            price_by_fuel: vec![
                data::BoxGroup {
                    label: "Petrol".into(),
                    stats: data::BoxStats::from_values(&[10.0, 20.0, 30.0]),
                },
                data::BoxGroup {
                    label: "Hybrid".into(),
                    stats: None,
                },
            ],
            ..DashboardData::default()
        };
        render_dashboard(&data, &path, (900, 900)).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Price by Fuel Type"));
    }

    #[test]
    fn renders_bitmap_for_png_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eda_visualizations.png");
        render_dashboard(&DashboardData::default(), &path, (600, 450)).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }
}
