//! Tunable parameters of the measurement pipeline.
//!
//! The defaults reproduce the calibration the measurements were originally
//! made with: anchors 40 and 80 pixels above the first line endpoint, profiles
//! spanning offsets `-21..=23` and a radius-2 extrema window.

use std::ops::RangeInclusive;

/// Vertical offsets (pixels) of the two anchors from the line's first endpoint.
pub const DEFAULT_ANCHOR_OFFSETS: [f64; 2] = [40.0, 80.0];

/// Offsets sampled along the perpendicular axis of every anchor.
pub const DEFAULT_PROFILE_OFFSETS: RangeInclusive<i32> = -21..=23;

/// Radius of the sliding extrema window.
pub const DEFAULT_WINDOW_RADIUS: usize = 2;

/// Smallest profile the landmark detector accepts.
pub const DEFAULT_MIN_SAMPLES: usize = 2;

/// Upper bound applied to the row coordinate of a profile sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalBound {
    /// Accept `0 <= y <= height`. A sample on row `height` lies outside the
    /// raster and is reported as [`crate::Error::PixelOutOfBounds`], which
    /// fails the whole profile: its in-bounds samples are discarded too. Use
    /// [`VerticalBound::Exclusive`] for images where fingers reach the bottom
    /// edge.
    #[default]
    InclusiveHeight,
    /// Accept `0 <= y < height`; row `height` is skipped like any other
    /// out-of-bounds sample.
    Exclusive,
}

impl VerticalBound {
    /// Returns `true` when row `y` passes the bound for a raster of `height` rows.
    pub fn admits(self, y: i64, height: u32) -> bool {
        match self {
            VerticalBound::InclusiveHeight => y >= 0 && y <= height as i64,
            VerticalBound::Exclusive => y >= 0 && y < height as i64,
        }
    }
}

/// Parameters of the sliding-window landmark heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandmarkConfig {
    /// Half-width of the extrema window; the window spans `2 * radius + 1` samples.
    pub window_radius: usize,
    /// Profiles shorter than this fail with [`crate::Error::InsufficientSamples`].
    pub min_samples: usize,
    /// Report [`crate::Error::NoEdgeDetected`] instead of falling back to index 0
    /// when the heuristic never selects a start or an end.
    pub require_edges: bool,
}

impl Default for LandmarkConfig {
    fn default() -> Self {
        Self {
            window_radius: DEFAULT_WINDOW_RADIUS,
            min_samples: DEFAULT_MIN_SAMPLES,
            require_edges: false,
        }
    }
}

/// Parameters of the whole width pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct WidthConfig {
    /// Vertical offsets of the near and far anchors.
    pub anchor_offsets: [f64; 2],
    /// Perpendicular offsets sampled around every anchor.
    pub profile_offsets: RangeInclusive<i32>,
    /// Row bound used when sampling profiles.
    pub vertical_bound: VerticalBound,
    /// Minimum slope magnitude substituted for horizontal lines. `None` rejects
    /// them as degenerate.
    pub min_slope: Option<f64>,
    /// Landmark heuristic parameters.
    pub landmarks: LandmarkConfig,
}

impl Default for WidthConfig {
    fn default() -> Self {
        Self {
            anchor_offsets: DEFAULT_ANCHOR_OFFSETS,
            profile_offsets: DEFAULT_PROFILE_OFFSETS,
            vertical_bound: VerticalBound::default(),
            min_slope: None,
            landmarks: LandmarkConfig::default(),
        }
    }
}

impl WidthConfig {
    pub fn with_anchor_offsets(mut self, near: f64, far: f64) -> Self {
        self.anchor_offsets = [near, far];
        self
    }

    pub fn with_profile_offsets(mut self, offsets: RangeInclusive<i32>) -> Self {
        self.profile_offsets = offsets;
        self
    }

    pub fn with_vertical_bound(mut self, bound: VerticalBound) -> Self {
        self.vertical_bound = bound;
        self
    }

    pub fn with_min_slope(mut self, min_slope: f64) -> Self {
        self.min_slope = Some(min_slope.abs());
        self
    }

    pub fn with_landmarks(mut self, landmarks: LandmarkConfig) -> Self {
        self.landmarks = landmarks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_calibration() {
        let cfg = WidthConfig::default();
        assert_eq!(cfg.anchor_offsets, [40.0, 80.0]);
        assert_eq!(cfg.profile_offsets.clone().count(), 45);
        assert_eq!(cfg.vertical_bound, VerticalBound::InclusiveHeight);
        assert_eq!(cfg.min_slope, None);
        assert_eq!(cfg.landmarks.window_radius, 2);
        assert!(!cfg.landmarks.require_edges);
    }

    #[test]
    fn vertical_bound_differs_only_on_last_row() {
        for y in -1..10 {
            assert_eq!(
                VerticalBound::InclusiveHeight.admits(y, 10),
                VerticalBound::Exclusive.admits(y, 10)
            );
        }
        assert!(VerticalBound::InclusiveHeight.admits(10, 10));
        assert!(!VerticalBound::Exclusive.admits(10, 10));
        assert!(!VerticalBound::InclusiveHeight.admits(11, 10));
    }

    #[test]
    fn min_slope_is_stored_as_magnitude() {
        let cfg = WidthConfig::default().with_min_slope(-0.5);
        assert_eq!(cfg.min_slope, Some(0.5));
    }
}
