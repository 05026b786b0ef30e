//! Cross-image statistics of per-profile distances.

use crate::error::{Error, Result};

/// Mean and population standard deviation of one profile position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceSummary {
    pub mean: f64,
    pub std_dev: f64,
    /// Number of images that contributed a distance.
    pub count: usize,
}

/// Summarises distances position by position across images.
///
/// `series[n][p]` is the distance of profile `p` in image `n`; every image
/// must report the same number of profiles. Missing distances are left out
/// of their position, and a position without any distance yields `None`.
///
/// # Errors
///
/// [`Error::EmptyBatch`] without any series, [`Error::LengthMismatch`] when
/// the series differ in length.
///
/// # Examples
///
/// ```rust
/// use finger_width::summarize;
///
/// let series = vec![vec![Some(14), Some(10)], vec![Some(16), None]];
/// let summary = summarize(&series).unwrap();
/// let first = summary[0].unwrap();
/// assert_eq!((first.mean, first.std_dev, first.count), (15.0, 1.0, 2));
/// assert_eq!(summary[1].unwrap().count, 1);
/// ```
pub fn summarize(series: &[Vec<Option<i32>>]) -> Result<Vec<Option<DistanceSummary>>> {
    let expected = series.first().ok_or(Error::EmptyBatch)?.len();
    if let Some(other) = series.iter().find(|s| s.len() != expected) {
        return Err(Error::LengthMismatch {
            expected,
            actual: other.len(),
        });
    }

    let summaries = (0..expected)
        .map(|position| {
            let values: Vec<f64> = series
                .iter()
                .filter_map(|s| s[position])
                .map(f64::from)
                .collect();
            summarize_values(&values)
        })
        .collect();
    Ok(summaries)
}

fn summarize_values(values: &[f64]) -> Option<DistanceSummary> {
    if values.is_empty() {
        return None;
    }
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
    Some(DistanceSummary {
        mean,
        std_dev: variance.sqrt(),
        count,
    })
}
