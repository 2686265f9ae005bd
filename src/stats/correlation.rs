//! Pearson correlation on pairwise-complete observations.

use std::cmp::Ordering;
use std::fmt;

use crate::domain::Table;

/// Correlation between two columns using only rows where both are present.
///
/// `NaN` when fewer than two complete pairs remain or either side has zero
/// variance.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();

    let n = pairs.len();
    if n < 2 {
        return f64::NAN;
    }
    let nf = n as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / nf;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / nf;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

/// Square correlation matrix over the numeric columns that exist in a table.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub names: Vec<String>,
    /// Row-major, `names.len()` × `names.len()`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Build from the requested columns, skipping any that are absent or text.
    pub fn from_table(table: &Table, wanted: &[&str]) -> Self {
        let cols: Vec<(&str, &[Option<f64>])> = wanted
            .iter()
            .filter_map(|&name| table.numeric(name).map(|v| (name, v)))
            .collect();

        let values = cols
            .iter()
            .map(|(_, a)| cols.iter().map(|(_, b)| pearson(a, b)).collect())
            .collect();

        Self {
            names: cols.iter().map(|(n, _)| n.to_string()).collect(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == row)?;
        let j = self.names.iter().position(|n| n == col)?;
        Some(self.values[i][j])
    }

    /// Correlations of `target` with every other column, strongest first.
    ///
    /// Undefined correlations sort last.
    pub fn ranked_against(&self, target: &str) -> Vec<(String, f64)> {
        let Some(i) = self.names.iter().position(|n| n == target) else {
            return Vec::new();
        };
        let mut out: Vec<(String, f64)> = self
            .names
            .iter()
            .zip(&self.values[i])
            .filter(|(name, _)| name.as_str() != target)
            .map(|(name, &r)| (name.clone(), r))
            .collect();
        out.sort_by(|a, b| by_magnitude_desc(a.1, b.1));
        out
    }
}

fn by_magnitude_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.abs().total_cmp(&a.abs()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
}

/// Qualitative reading of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationLabel {
    pub strength: Strength,
    pub direction: Direction,
}

impl CorrelationLabel {
    /// `strong` above |0.5|, `moderate` above |0.3|, otherwise `weak`.
    /// Zero counts as negative.
    pub fn classify(r: f64) -> Self {
        let magnitude = r.abs();
        let strength = if magnitude > 0.5 {
            Strength::Strong
        } else if magnitude > 0.3 {
            Strength::Moderate
        } else {
            Strength::Weak
        };
        let direction = if r > 0.0 {
            Direction::Positive
        } else {
            Direction::Negative
        };
        Self {
            strength,
            direction,
        }
    }
}

impl fmt::Display for CorrelationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strength = match self.strength {
            Strength::Weak => "weak",
            Strength::Moderate => "moderate",
            Strength::Strong => "strong",
        };
        let direction = match self.direction {
            Direction::Positive => "positive",
            Direction::Negative => "negative",
        };
        write!(f, "{strength} {direction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Column, DType};

    #[test]
    fn labels_follow_thresholds() {
        assert_eq!(CorrelationLabel::classify(0.6).to_string(), "strong positive");
        assert_eq!(CorrelationLabel::classify(-0.4).to_string(), "moderate negative");
        assert_eq!(CorrelationLabel::classify(0.1).to_string(), "weak positive");
        // Thresholds are exclusive.
        assert_eq!(CorrelationLabel::classify(0.5).to_string(), "moderate positive");
        assert_eq!(CorrelationLabel::classify(-0.3).to_string(), "weak negative");
    }

    #[test]
    fn pearson_uses_complete_pairs() {
        let x = [Some(1.0), Some(2.0), Some(3.0), None, Some(100.0)];
        let y = [Some(2.0), Some(4.0), Some(6.0), Some(1.0), None];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);

        let inverse = [Some(3.0), Some(2.0), Some(1.0), None, None];
        assert!((pearson(&x, &inverse) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_undefined_cases() {
        assert!(pearson(&[Some(1.0)], &[Some(2.0)]).is_nan());
        assert!(pearson(&[Some(1.0), Some(1.0)], &[Some(2.0), Some(3.0)]).is_nan());
    }

    #[test]
    fn ranking_by_absolute_value() {
        let table = Table::new(vec![
            Column::numeric("price", DType::Float64, vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
            Column::numeric("age", DType::Float64, vec![Some(4.0), Some(3.0), Some(2.0), Some(1.0)]),
            Column::numeric("noise", DType::Float64, vec![Some(1.0), Some(3.0), Some(2.0), Some(1.5)]),
            Column::numeric("flat", DType::Float64, vec![Some(5.0), Some(5.0), Some(5.0), Some(5.0)]),
            Column::text("brand", vec![None, None, None, None]),
        ])
        .unwrap();

        let m = CorrelationMatrix::from_table(&table, &["price", "age", "noise", "flat", "brand", "gone"]);
        assert_eq!(m.len(), 4);
        assert!((m.get("price", "price").unwrap() - 1.0).abs() < 1e-12);

        let ranked = m.ranked_against("price");
        let names: Vec<&str> = ranked.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["age", "noise", "flat"]);
        assert!(ranked[2].1.is_nan());
    }
}
