//! The analysis pipeline, shared by the binary and the integration tests.
//!
//! Load -> structure -> clean -> categorical -> numerical -> visualize -> insights
//!
//! Each stage writes its section to `out` as soon as it finishes, so a later
//! failure still leaves the earlier sections on the console.

use std::io::Write;
use std::time::Instant;

use tracing::{info, warn};

use crate::clean::{CleaningSummary, clean_table};
use crate::domain::{AnalysisConfig, Table, columns};
use crate::error::AppError;
use crate::io::load_table;
use crate::plot::{DashboardData, render_dashboard};
use crate::report::{self, Insights, MissingReport};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub raw: Table,
    pub clean: Table,
    pub missing: MissingReport,
    pub cleaning: CleaningSummary,
    pub insights: Insights,
    /// Where the dashboard was written, if plotting ran.
    pub image: Option<std::path::PathBuf>,
}

/// Execute every stage against `config.csv_path`.
pub fn run_analysis<W: Write>(config: &AnalysisConfig, out: &mut W) -> Result<RunOutput, AppError> {
    let run_started = Instant::now();
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    write!(out, "{}", report::format_title(&generated))?;

    // 1) Load.
    let started = Instant::now();
    let ingest = load_table(&config.csv_path)?;
    if ingest.short_rows > 0 {
        warn!(short_rows = ingest.short_rows, "rows shorter than the header were padded");
    }
    let raw = ingest.table;
    info!(
        rows = raw.n_rows(),
        cols = raw.n_cols(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "dataset loaded"
    );
    write!(out, "{}", report::format_loaded(&raw))?;

    // 2) Structure.
    let missing = report::missing_values(&raw);
    write!(out, "{}", report::format_structure(&raw, &missing))?;

    // 3) Cleaning (working copy; `raw` is left as loaded).
    let (clean, cleaning) = clean_table(&raw)?;
    write!(out, "{}", report::format_cleaning(&cleaning))?;

    // 4) Categorical.
    warn_missing(&clean, &columns::CATEGORICAL);
    let categorical = report::categorical_summaries(&clean, &columns::CATEGORICAL, config.top_n);
    write!(out, "{}", report::format_categorical(&categorical, config.top_n))?;

    // 5) Numerical.
    warn_missing(&clean, &columns::NUMERICAL);
    let numerical = report::numerical_summaries(&clean, &columns::NUMERICAL);
    write!(out, "{}", report::format_numerical(&numerical))?;

    // 6) Visualization.
    let image = if config.plot {
        let started = Instant::now();
        let data = DashboardData::from_table(&clean, config);
        render_dashboard(
            &data,
            &config.output_path,
            (config.plot_width, config.plot_height),
        )?;
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            scatter_points = data.scatter.len(),
            "visualizations rendered"
        );
        write!(out, "{}", report::format_visualization(&config.output_path))?;
        Some(config.output_path.clone())
    } else {
        info!("plotting disabled, skipping visualizations");
        None
    };

    // 7) Insights.
    let insights = report::compute_insights(&clean, &cleaning);
    write!(out, "{}", report::format_insights(&insights))?;

    write!(out, "{}", report::format_footer())?;
    out.flush()?;
    info!(elapsed_ms = run_started.elapsed().as_millis() as u64, "analysis complete");

    Ok(RunOutput {
        raw,
        clean,
        missing,
        cleaning,
        insights,
        image,
    })
}

fn warn_missing(table: &Table, wanted: &[&str]) {
    for name in wanted.iter().filter(|n| !table.has_column(n)) {
        warn!(column = *name, "column not present, skipping");
    }
}
