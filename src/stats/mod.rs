//! Numeric helpers for aggregating scores.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("cannot normalize an empty sequence")]
    Empty,

    #[error("cannot normalize a constant sequence (min = max = {value})")]
    DegenerateRange { value: f64 },
}

/// Linearly rescales `values` so the minimum maps to `t_min` and the maximum to `t_max`.
///
/// Fails on empty input and on sequences whose minimum equals their maximum.
pub fn normalize(values: &[f64], t_min: f64, t_max: f64) -> Result<Vec<f64>, StatsError> {
    let (min, max) = values
        .iter()
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or(StatsError::Empty)?;

    let source_range = max - min;
    if source_range == 0.0 {
        return Err(StatsError::DegenerateRange { value: min });
    }

    let target_range = t_max - t_min;
    Ok(values
        .iter()
        .map(|&v| ((v - min) * target_range) / source_range + t_min)
        .collect())
}

/// [`normalize`] onto `[0, 1]`.
pub fn normalize_unit(values: &[f64]) -> Result<Vec<f64>, StatsError> {
    normalize(values, 0.0, 1.0)
}

/// Arithmetic mean, or `0.0` when `values` is empty or the mean is NaN or infinite.
pub fn safe_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if mean.is_finite() { mean } else { 0.0 }
}
