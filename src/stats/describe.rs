//! Descriptive statistics over columns with absent cells.
//!
//! Absent cells are skipped everywhere. Undefined results (empty input, the
//! spread of a single value) are `NaN`, which the report prints as `NaN`.

/// Summary of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (`n - 1` denominator).
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

pub fn describe(values: &[Option<f64>]) -> Describe {
    let mut sorted = present(values);
    sorted.sort_by(f64::total_cmp);

    Describe {
        count: sorted.len(),
        mean: mean(&sorted),
        std: std_dev(&sorted),
        min: sorted.first().copied().unwrap_or(f64::NAN),
        q25: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q75: quantile_sorted(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

/// Present values, in input order.
pub fn present(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().flatten().copied().filter(|v| !v.is_nan()).collect()
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Quantile of ascending-sorted data with linear interpolation between the
/// two closest ranks.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Adjusted Fisher-Pearson sample skewness. `NaN` below three values or with
/// zero spread.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return f64::NAN;
    }
    let nf = n as f64;
    let m = mean(values);
    let m2 = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / nf;
    let m3 = values.iter().map(|v| (v - m).powi(3)).sum::<f64>() / nf;
    if m2 == 0.0 {
        return f64::NAN;
    }
    let g1 = m3 / m2.powf(1.5);
    g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn describe_matches_hand_computed_values() {
        let d = describe(&[Some(4.0), Some(1.0), None, Some(3.0), Some(2.0)]);
        assert_eq!(d.count, 4);
        assert!(close(d.mean, 2.5));
        assert!(close(d.std, (5.0f64 / 3.0).sqrt()));
        assert!(close(d.min, 1.0));
        assert!(close(d.q25, 1.75));
        assert!(close(d.median, 2.5));
        assert!(close(d.q75, 3.25));
        assert!(close(d.max, 4.0));
    }

    #[test]
    fn undefined_statistics_are_nan() {
        let empty = describe(&[None, None]);
        assert_eq!(empty.count, 0);
        assert!(empty.mean.is_nan() && empty.min.is_nan() && empty.q75.is_nan());

        let single = describe(&[Some(7.0)]);
        assert!(close(single.mean, 7.0));
        assert!(single.std.is_nan());
        assert!(close(single.median, 7.0));
    }

    #[test]
    fn skewness_sign_follows_tail() {
        assert!(skewness(&[1.0, 1.0, 1.0, 2.0, 10.0]) > 0.5);
        assert!(skewness(&[-10.0, 1.0, 2.0, 2.0, 2.0]) < -0.5);
        assert!(close(skewness(&[1.0, 2.0, 3.0]), 0.0));
        assert!(skewness(&[5.0, 5.0, 5.0]).is_nan());
    }
}
