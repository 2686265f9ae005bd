//! Value counts, grouping and binning.

use std::collections::HashMap;

use crate::domain::Column;

/// Distinct non-absent values with their counts.
///
/// Sorted by count descending; ties keep first-occurrence order.
pub fn value_counts(column: &Column) -> Vec<(String, usize)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for text in column.texts().flatten() {
        match index.get(text.as_ref()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(text.to_string(), counts.len());
                counts.push((text.into_owned(), 1));
            }
        }
    }

    // `sort_by` is stable, so equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Number of distinct non-absent values.
pub fn n_unique(column: &Column) -> usize {
    value_counts(column).len()
}

/// Numeric values grouped by the text form of a key column.
///
/// Rows with an absent key or value are skipped. Groups come back in
/// first-seen key order.
pub fn group_values(keys: &Column, values: &[Option<f64>]) -> Vec<(String, Vec<f64>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();

    for (key, value) in keys.texts().zip(values) {
        let (Some(key), Some(value)) = (key, value) else {
            continue;
        };
        if value.is_nan() {
            continue;
        }
        match index.get(key.as_ref()) {
            Some(&slot) => groups[slot].1.push(*value),
            None => {
                index.insert(key.to_string(), groups.len());
                groups.push((key.into_owned(), vec![*value]));
            }
        }
    }
    groups
}

/// Per-group mean of `values`, highest first, truncated to `top_n`.
pub fn top_group_means(keys: &Column, values: &[Option<f64>], top_n: usize) -> Vec<(String, f64)> {
    let mut means: Vec<(String, f64)> = group_values(keys, values)
        .into_iter()
        .map(|(key, vals)| {
            let mean = vals.iter().sum::<f64>() / vals.len() as f64;
            (key, mean)
        })
        .collect();
    means.sort_by(|a, b| b.1.total_cmp(&a.1));
    means.truncate(top_n);
    means
}

/// One equal-width histogram bin, `[lo, hi)` (the last bin is closed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Equal-width bins spanning the data range.
///
/// A constant sample gets a unit-wide range centered on its value.
pub fn histogram(values: &[f64], n_bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || n_bins == 0 {
        return Vec::new();
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / n_bins as f64;

    let mut bins: Vec<Bin> = (0..n_bins)
        .map(|i| Bin {
            lo: lo + width * i as f64,
            hi: lo + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for v in finite {
        let idx = (((v - lo) / width) as usize).min(n_bins - 1);
        bins[idx].count += 1;
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DType;

    fn text(cells: &[Option<&str>]) -> Column {
        Column::text("k", cells.iter().map(|c| c.map(str::to_string)).collect())
    }

    #[test]
    fn value_counts_sorted_with_stable_ties() {
        let col = text(&[Some("b"), Some("a"), Some("a"), None, Some("c"), Some("b"), Some("d")]);
        let counts = value_counts(&col);
        assert_eq!(
            counts,
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1),
                ("d".to_string(), 1),
            ]
        );
        assert_eq!(n_unique(&col), 4);
    }

    #[test]
    fn value_counts_on_numeric_column() {
        let col = Column::numeric("year", DType::Float64, vec![Some(2015.0), Some(2015.0), None]);
        assert_eq!(value_counts(&col), vec![("2015.0".to_string(), 2)]);
    }

    #[test]
    fn group_means_skip_absent_and_rank() {
        let keys = text(&[Some("x"), Some("y"), Some("x"), None, Some("z")]);
        let values = [Some(10.0), Some(50.0), Some(20.0), Some(1000.0), None];
        let means = top_group_means(&keys, &values, 10);
        assert_eq!(means, vec![("y".to_string(), 50.0), ("x".to_string(), 15.0)]);

        let top1 = top_group_means(&keys, &values, 1);
        assert_eq!(top1.len(), 1);
    }

    #[test]
    fn histogram_places_edges() {
        let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(bins.len(), 4);
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert_eq!(bins[0].lo, 0.0);
        assert_eq!(bins[3].hi, 4.0);
    }

    #[test]
    fn histogram_degenerate_inputs() {
        assert!(histogram(&[], 10).is_empty());
        let bins = histogram(&[5.0, 5.0], 2);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
        assert_eq!(bins[0].lo, 4.5);
    }
}
