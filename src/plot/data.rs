//! Chart inputs, computed up front.
//!
//! All series are derived from the table before any drawing happens, so the
//! panel renderers only draw and the data prep stays testable.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::domain::{AnalysisConfig, Table, columns};
use crate::stats::{
    Bin, CorrelationMatrix, group_values, histogram, present, quantile_sorted, top_group_means,
    value_counts,
};

pub const PRICE_BINS: usize = 50;
pub const YEAR_BINS: usize = 30;
pub const TOP_BRANDS: usize = 10;
pub const BOX_GROUPS: usize = 5;

/// Box-and-whisker statistics for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Most extreme values within 1.5×IQR of the box.
    pub whisker_lo: f64,
    pub whisker_hi: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let reach = 1.5 * (q3 - q1);
        let (lo_fence, hi_fence) = (q1 - reach, q3 + reach);

        let mut inside = sorted.iter().copied().filter(|v| (lo_fence..=hi_fence).contains(v));
        let whisker_lo = inside.next().unwrap_or(q1);
        let whisker_hi = inside.last().unwrap_or(whisker_lo);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < lo_fence || *v > hi_fence)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            whisker_lo,
            whisker_hi,
            outliers,
        })
    }
}

/// One x-axis slot of the box plot. `stats` is `None` when the group has no
/// priced rows; the slot and its label are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGroup {
    pub label: String,
    pub stats: Option<BoxStats>,
}

/// Everything the nine panels draw.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub price_bins: Vec<Bin>,
    /// `(mileage, price)` pairs.
    pub scatter: Vec<(f64, f64)>,
    pub top_brands: Vec<(String, f64)>,
    pub fuel_counts: Vec<(String, usize)>,
    pub year_bins: Vec<Bin>,
    pub transmission_counts: Vec<(String, f64)>,
    pub price_by_fuel: Vec<BoxGroup>,
    pub correlations: Option<CorrelationMatrix>,
    pub avg_price_by_brand: Vec<(String, f64)>,
}

impl DashboardData {
    pub fn from_table(table: &Table, config: &AnalysisConfig) -> Self {
        let price = table.numeric(columns::PRICE);

        let price_bins = price
            .map(|p| histogram(&present(p), PRICE_BINS))
            .unwrap_or_default();

        let year_bins = table
            .numeric(columns::MODEL_DATE)
            .map(|y| histogram(&present(y), YEAR_BINS))
            .unwrap_or_default();

        let counts_f64 = |name: &str, limit: usize| -> Vec<(String, f64)> {
            table
                .column(name)
                .map(|c| {
                    value_counts(c)
                        .into_iter()
                        .take(limit)
                        .map(|(k, n)| (k, n as f64))
                        .collect()
                })
                .unwrap_or_default()
        };

        let fuel_counts = table
            .column(columns::FUEL_TYPE)
            .map(value_counts)
            .unwrap_or_default();

        let price_by_fuel = match (table.column(columns::FUEL_TYPE), price) {
            (Some(fuel), Some(price)) => box_groups(&fuel_counts, &group_values(fuel, price)),
            _ => Vec::new(),
        };

        let avg_price_by_brand = match (table.column(columns::BRAND), price) {
            (Some(brand), Some(price)) => top_group_means(brand, price, TOP_BRANDS),
            _ => Vec::new(),
        };

        let correlations = Some(CorrelationMatrix::from_table(table, &columns::NUMERICAL))
            .filter(|m| !m.is_empty());

        Self {
            price_bins,
            scatter: sample_scatter(table, config.sample_size, config.seed),
            top_brands: counts_f64(columns::BRAND, TOP_BRANDS),
            fuel_counts,
            year_bins,
            transmission_counts: counts_f64(columns::VEHICLE_TRANSMISSION, usize::MAX),
            price_by_fuel,
            correlations,
            avg_price_by_brand,
        }
    }
}

/// Box stats for the most frequent categories, in frequency order.
fn box_groups(counts: &[(String, usize)], groups: &[(String, Vec<f64>)]) -> Vec<BoxGroup> {
    counts
        .iter()
        .take(BOX_GROUPS)
        .map(|(label, _)| BoxGroup {
            label: label.clone(),
            stats: groups
                .iter()
                .find(|(k, _)| k == label)
                .and_then(|(_, values)| BoxStats::from_values(values)),
        })
        .collect()
}

/// Random `(mileage, price)` sample over rows where both are present.
///
/// Never asks for more rows than exist; the RNG is seeded for repeatable output.
pub fn sample_scatter(table: &Table, sample_size: usize, seed: u64) -> Vec<(f64, f64)> {
    let (Some(price), Some(mileage)) = (
        table.numeric(columns::PRICE),
        table.numeric(columns::MILEAGE_NUMERIC),
    ) else {
        return Vec::new();
    };

    let complete: Vec<(f64, f64)> = mileage
        .iter()
        .zip(price)
        .filter_map(|(m, p)| Some(((*m)?, (*p)?)))
        .filter(|(m, p)| m.is_finite() && p.is_finite())
        .collect();

    if complete.len() <= sample_size {
        return complete;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked: Vec<usize> = rand::seq::index::sample(&mut rng, complete.len(), sample_size)
        .into_iter()
        .collect();
    picked.sort_unstable();
    picked.into_iter().map(|i| complete[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Column, DType};

    fn numeric(name: &str, cells: Vec<Option<f64>>) -> Column {
        Column::numeric(name, DType::Float64, cells)
    }

    #[test]
    fn scatter_sample_is_bounded_and_repeatable() {
        let n = 50;
        let table = Table::new(vec![
            numeric(columns::PRICE, (0..n).map(|i| Some(i as f64)).collect()),
            numeric(
                columns::MILEAGE_NUMERIC,
                (0..n).map(|i| if i % 5 == 0 { None } else { Some(i as f64 * 10.0) }).collect(),
            ),
        ])
        .unwrap();

        // Fewer complete rows (40) than requested: take them all.
        assert_eq!(sample_scatter(&table, 2000, 1).len(), 40);

        let a = sample_scatter(&table, 10, 7);
        let b = sample_scatter(&table, 10, 7);
        assert_eq!(a.len(), 10);
        assert_eq!(a, b);
        assert!(a.iter().all(|(m, p)| (m - p * 10.0).abs() < 1e-9));
    }

    #[test]
    fn scatter_needs_both_columns() {
        let table = Table::new(vec![numeric(columns::PRICE, vec![Some(1.0)])]).unwrap();
        assert!(sample_scatter(&table, 10, 1).is_empty());
    }

    #[test]
    fn box_stats_flag_outliers() {
        let b = BoxStats::from_values(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!(b.median, 3.0);
        assert_eq!(b.q1, 2.0);
        assert_eq!(b.q3, 4.0);
        assert_eq!(b.whisker_lo, 1.0);
        assert_eq!(b.whisker_hi, 4.0);
        assert_eq!(b.outliers, vec![100.0]);
        assert!(BoxStats::from_values(&[]).is_none());
    }

    #[test]
    fn dashboard_data_tolerates_missing_columns() {
        let table = Table::new(vec![Column::text("brand", vec![Some("Kia".into())])]).unwrap();
        let data = DashboardData::from_table(&table, &AnalysisConfig::default());
        assert!(data.price_bins.is_empty());
        assert!(data.scatter.is_empty());
        assert_eq!(data.top_brands, vec![("Kia".to_string(), 1.0)]);
        assert!(data.avg_price_by_brand.is_empty());
        assert!(data.correlations.is_none());
    }

    #[test]
    fn price_boxes_follow_fuel_frequency() {
        let fuel = ["Petrol", "Diesel", "Petrol", "Hybrid", "Petrol", "Diesel"];
        let table = Table::new(vec![
            numeric(columns::PRICE, vec![Some(10.0), Some(20.0), Some(30.0), None, Some(50.0), Some(60.0)]),
            Column::text(columns::FUEL_TYPE, fuel.iter().map(|f| Some(f.to_string())).collect()),
        ])
        .unwrap();
        let data = DashboardData::from_table(&table, &AnalysisConfig::default());
        let labels: Vec<&str> = data.price_by_fuel.iter().map(|b| b.label.as_str()).collect();
        // Hybrid has no price: its slot stays, with an empty box.
        assert_eq!(labels, vec!["Petrol", "Diesel", "Hybrid"]);
        assert_eq!(data.price_by_fuel[0].stats.as_ref().map(|b| b.median), Some(30.0));
        assert!(data.price_by_fuel[2].stats.is_none());
    }
}
