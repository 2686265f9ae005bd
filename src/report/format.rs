//! Formatted terminal output for every report section.
//!
//! We keep formatting code in one place so:
//! - the statistics code stays clean and testable
//! - output changes are localized

use crate::clean::CleaningSummary;
use crate::domain::Table;
use crate::report::insights::{Insights, MINIMAL_MISSING_PCT, Share, skew_phrase};
use crate::report::summary::{CategoricalSummary, MissingReport, NumericalKind, NumericalSummary};
use crate::stats::{CorrelationLabel, Describe};

const TITLE_RULE: usize = 60;
const SECTION_RULE: usize = 50;

/// Run header printed before anything is loaded.
pub fn format_title(generated: &str) -> String {
    let rule = "=".repeat(TITLE_RULE);
    format!("{rule}\nEXPLORATORY DATA ANALYSIS - USED CARS DATASET\nGenerated: {generated}\n{rule}\n")
}

/// Closing banner after a successful run.
pub fn format_footer() -> String {
    let rule = "=".repeat(TITLE_RULE);
    format!("\n{rule}\nEXPLORATORY DATA ANALYSIS COMPLETED SUCCESSFULLY!\n{rule}\n")
}

pub fn format_section(title: &str) -> String {
    let rule = "=".repeat(SECTION_RULE);
    format!("\n{rule}\n{title}\n{rule}\n")
}

pub fn format_loaded(table: &Table) -> String {
    format!(
        "Dataset loaded successfully!\nDataset shape: ({}, {})\n",
        table.n_rows(),
        table.n_cols()
    )
}

/// Shape, column list, dtypes and missing values.
pub fn format_structure(table: &Table, missing: &MissingReport) -> String {
    let mut out = format_section("1. DATASET STRUCTURE ANALYSIS");

    out.push_str(&format!("Shape: ({}, {})\n", table.n_rows(), table.n_cols()));
    out.push_str(&format!("\nColumns: [{}]\n", table.column_names().join(", ")));

    out.push_str("\nData Types:\n");
    let width = name_width(table.column_names().into_iter());
    for column in table.columns() {
        out.push_str(&format!("  {:<width$}  {}\n", column.name(), column.dtype()));
    }

    out.push('\n');
    out.push_str(&format_missing(missing));
    out
}

pub fn format_missing(missing: &MissingReport) -> String {
    if missing.is_empty() {
        return "No missing values found in the dataset!\n".to_string();
    }

    let width = name_width(missing.entries.iter().map(|e| e.column.as_str())).max("Column".len());
    let mut out = String::from("Missing Values:\n");
    out.push_str(&format!(
        "  {:<width$}  {:>13}  {:>18}\n",
        "Column", "Missing_Count", "Missing_Percentage"
    ));
    for e in &missing.entries {
        out.push_str(&format!(
            "  {:<width$}  {:>13}  {:>18.2}\n",
            e.column, e.count, e.percentage
        ));
    }
    out
}

pub fn format_cleaning(summary: &CleaningSummary) -> String {
    let mut out = format_section("2. DATA CLEANING AND PREPROCESSING");
    if summary.dropped_index {
        out.push_str("Removed unnamed index column\n");
    }
    for d in &summary.derived {
        out.push_str(&format!(
            "Created {}: {} non-null values ({} unparseable in `{}`)\n",
            d.name, d.parsed, d.failed, d.source
        ));
    }
    for source in &summary.skipped {
        out.push_str(&format!("Skipped `{source}`: column not present\n"));
    }
    out
}

pub fn format_categorical(summaries: &[CategoricalSummary], top_n: usize) -> String {
    let mut out = format_section("3. CATEGORICAL VARIABLES ANALYSIS");
    for s in summaries {
        out.push_str(&format!("\n{}:\n", s.column.to_uppercase()));
        out.push_str(&format!("  Unique values: {}\n", s.n_unique));
        out.push_str(&format!("  Top {top_n} values:\n"));
        let width = name_width(s.top.iter().map(|(v, _)| v.as_str()));
        for (value, count) in &s.top {
            out.push_str(&format!("    {:<width$}  {count}\n", truncate(value, 40)));
        }
    }
    out
}

pub fn format_numerical(summaries: &[NumericalSummary]) -> String {
    let mut out = format_section("4. NUMERICAL VARIABLES ANALYSIS");
    for s in summaries {
        out.push_str(&format!("\n{}:\n", s.column.to_uppercase()));
        match &s.kind {
            NumericalKind::Numeric(d) => out.push_str(&format_describe(d)),
            NumericalKind::Text { count, unique, top } => {
                out.push_str(&format!("  {:<6} {:>14}\n", "count", count));
                out.push_str(&format!("  {:<6} {:>14}\n", "unique", unique));
                if let Some((value, freq)) = top {
                    out.push_str(&format!("  {:<6} {:>14}\n", "top", truncate(value, 14)));
                    out.push_str(&format!("  {:<6} {:>14}\n", "freq", freq));
                }
            }
        }
    }
    out
}

fn format_describe(d: &Describe) -> String {
    let rows = [
        ("count", d.count as f64),
        ("mean", d.mean),
        ("std", d.std),
        ("min", d.min),
        ("25%", d.q25),
        ("50%", d.median),
        ("75%", d.q75),
        ("max", d.max),
    ];
    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!("  {label:<6} {:>20}\n", fmt_stat(value)));
    }
    out
}

pub fn format_visualization(path: &std::path::Path) -> String {
    let mut out = format_section("5. GENERATING VISUALIZATIONS");
    out.push_str(&format!("Visualizations saved as '{}'\n", path.display()));
    out
}

pub fn format_insights(insights: &Insights) -> String {
    let mut out = format_section("6. KEY INSIGHTS AND FINDINGS");

    out.push_str("\nDATASET OVERVIEW:\n");
    out.push_str(&format!("   - Total records: {}\n", fmt_thousands(insights.records as f64, 0)));
    out.push_str(&format!("   - Total features: {}\n", insights.features));
    out.push_str(&format!("   - Missing values: {}\n", insights.missing_cells));

    if let Some(p) = &insights.price {
        out.push_str("\nPRICE ANALYSIS:\n");
        out.push_str(&format!("   - Average price: {}\n", fmt_thousands(p.mean, 2)));
        out.push_str(&format!("   - Median price: {}\n", fmt_thousands(p.median, 2)));
        out.push_str(&format!(
            "   - Price range: {} - {}\n",
            fmt_thousands(p.min, 2),
            fmt_thousands(p.max, 2)
        ));
        out.push_str(&format!("   - Standard deviation: {}\n", fmt_thousands(p.std, 2)));
    }

    if let Some(brand) = &insights.top_brand {
        out.push_str("\nBRAND ANALYSIS:\n");
        out.push_str(&format!("   - Most common brand: {}\n", fmt_share(brand)));
        if let Some(n) = insights.n_brands {
            out.push_str(&format!("   - Total number of brands: {n}\n"));
        }
    }

    if let Some(fuel) = &insights.top_fuel {
        out.push_str("\nFUEL TYPE ANALYSIS:\n");
        out.push_str(&format!("   - Most common fuel type: {}\n", fmt_share(fuel)));
    }

    if !insights.price_correlations.is_empty() {
        out.push_str("\nCORRELATION INSIGHTS:\n");
        out.push_str("   - Strongest correlations with price:\n");
        for (name, r) in &insights.price_correlations {
            out.push_str(&format!("     - {}\n", fmt_correlation(name, *r)));
        }
    }

    out.push_str("\nADDITIONAL OBSERVATIONS:\n");
    if let Some(currency) = &insights.top_currency {
        out.push_str(&format!(
            "   - Dominant currency: {} ({:.1}% of listings)\n",
            currency.value, currency.percentage
        ));
    }
    if let Some(skew) = insights.price_skew {
        out.push_str(&format!(
            "   - Price distribution is {} (skewness {skew:.2})\n",
            skew_phrase(skew)
        ));
    }
    for d in &insights.derived {
        out.push_str(&format!(
            "   - `{}` required parsing from text: {} values recovered, {} unparseable\n",
            d.source, d.parsed, d.failed
        ));
    }
    let completeness = if insights.missing_pct < MINIMAL_MISSING_PCT {
        "minimal, making the dataset quite complete"
    } else {
        "substantial; treat per-column results with care"
    };
    out.push_str(&format!(
        "   - Missing values are {completeness} ({:.2}% of cells)\n",
        insights.missing_pct
    ));

    out
}

/// One correlation line: `name: 0.123 (weak positive correlation)`.
pub fn fmt_correlation(name: &str, r: f64) -> String {
    if r.is_nan() {
        return format!("{name}: n/a (not enough paired values)");
    }
    format!("{name}: {r:.3} ({} correlation)", CorrelationLabel::classify(r))
}

fn fmt_share(share: &Share) -> String {
    format!(
        "{} ({} cars, {:.1}%)",
        share.value,
        fmt_thousands(share.count as f64, 0),
        share.percentage
    )
}

/// Statistics column value; undefined values print as `NaN`.
fn fmt_stat(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v:.6}")
    }
}

/// Fixed-point number with `,` thousands separators.
pub fn fmt_thousands(v: f64, decimals: usize) -> String {
    if !v.is_finite() {
        return if v.is_nan() { "NaN".to_string() } else { format!("{v}") };
    }
    let fixed = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if v < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count().min(40)).max().unwrap_or(0)
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
