//! Line annotations and the anchor points derived from them.

use std::fmt;

use crate::config::WidthConfig;
use crate::error::{Error, Result};

/// A reference line drawn along a finger, in integer pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Line {
    pub const fn new((x1, y1): (i32, i32), (x2, y2): (i32, i32)) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Slope `dy / dx` of the line, or `None` for a vertical line.
    pub fn slope(&self) -> Option<f64> {
        if self.x1 == self.x2 {
            return None;
        }
        Some((self.y2 - self.y1) as f64 / (self.x2 - self.x1) as f64)
    }
}

impl From<((i32, i32), (i32, i32))> for Line {
    fn from((p1, p2): ((i32, i32), (i32, i32))) -> Self {
        Self::new(p1, p2)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(({}, {}), ({}, {}))", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Which of the two anchors of a line a measurement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    /// Anchor at the first configured offset (40 px by default).
    Near,
    /// Anchor at the second configured offset (80 px by default).
    Far,
}

/// Seed position of one perpendicular profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoint {
    pub x: i64,
    pub y: i64,
    /// Slope of the owning line.
    pub slope: f64,
    pub kind: AnchorKind,
}

/// Derives the near and far anchors of `line`.
///
/// Each anchor sits `d` pixels above the first endpoint (`y1 - d`) and is
/// shifted along x by `-d / slope` so that it stays on the line. Coordinates
/// are rounded half to even.
///
/// # Errors
///
/// [`Error::DegenerateLine`] for vertical lines, for horizontal lines unless
/// [`WidthConfig::min_slope`] is set, and whenever an anchor coordinate is not
/// finite or does not fit an `i32` pixel coordinate.
///
/// # Examples
///
/// ```rust
/// use finger_width::{derive_anchors, Line, WidthConfig};
///
/// let line = Line::new((75, 182), (31, 35));
/// let [near, far] = derive_anchors(&line, &WidthConfig::default()).unwrap();
/// assert_eq!((near.x, near.y), (63, 142));
/// assert_eq!((far.x, far.y), (51, 102));
/// ```
pub fn derive_anchors(line: &Line, config: &WidthConfig) -> Result<[AnchorPoint; 2]> {
    let slope = effective_slope(line, config.min_slope)?;
    let [near, far] = config.anchor_offsets;

    let anchors = [
        anchor_at(line, slope, near, AnchorKind::Near)?,
        anchor_at(line, slope, far, AnchorKind::Far)?,
    ];
    debug!("anchors for line {}: {:?}", line, anchors);
    Ok(anchors)
}

fn effective_slope(line: &Line, min_slope: Option<f64>) -> Result<f64> {
    let slope = line.slope().ok_or(Error::DegenerateLine {
        line: *line,
        reason: "vertical line has undefined slope",
    })?;

    match min_slope {
        Some(min) if slope.abs() < min => Ok(if slope < 0.0 { -min } else { min }),
        _ if slope == 0.0 => Err(Error::DegenerateLine {
            line: *line,
            reason: "horizontal line has no perpendicular step along x",
        }),
        _ => Ok(slope),
    }
}

fn anchor_at(line: &Line, slope: f64, offset: f64, kind: AnchorKind) -> Result<AnchorPoint> {
    let x = (line.x1 as f64 - offset / slope).round_ties_even();
    let y = (line.y1 as f64 - offset).round_ties_even();

    // also rejects NaN and infinities
    let pixel_range = i32::MIN as f64..=i32::MAX as f64;
    if !pixel_range.contains(&x) || !pixel_range.contains(&y) {
        return Err(Error::DegenerateLine {
            line: *line,
            reason: "anchor coordinates out of range",
        });
    }

    Ok(AnchorPoint {
        x: x as i64,
        y: y as i64,
        slope,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_follow_line_slope() {
        // slope = -147 / -44
        let line = Line::new((75, 182), (31, 35));
        let [near, far] = derive_anchors(&line, &WidthConfig::default()).unwrap();

        assert_eq!(near.kind, AnchorKind::Near);
        assert_eq!(far.kind, AnchorKind::Far);
        assert_eq!((near.x, near.y), (63, 142));
        assert_eq!((far.x, far.y), (51, 102));
        assert!((near.slope - 147.0 / 44.0).abs() < 1e-12);
        assert_eq!(near.slope, far.slope);
    }

    #[test]
    fn anchors_round_half_to_even() {
        // -40 / -80 = 0.5, so x lands exactly on 150.5
        let line = Line::new((150, 180), (151, 100));
        let [near, _] = derive_anchors(&line, &WidthConfig::default()).unwrap();
        assert_eq!(near.x, 150);
        assert_eq!(near.y, 140);
    }

    #[test]
    fn configured_offsets_are_used() {
        let line = Line::new((100, 100), (110, 0));
        let cfg = WidthConfig::default().with_anchor_offsets(10.0, 20.0);
        let [near, far] = derive_anchors(&line, &cfg).unwrap();
        assert_eq!((near.x, near.y), (101, 90));
        assert_eq!((far.x, far.y), (102, 80));
    }

    #[test]
    fn vertical_line_is_degenerate() {
        let line = Line::new((10, 0), (10, 50));
        assert_eq!(line.slope(), None);
        let err = derive_anchors(&line, &WidthConfig::default()).unwrap_err();
        assert!(matches!(err, Error::DegenerateLine { line: l, .. } if l == line));
    }

    #[test]
    fn horizontal_line_is_degenerate_without_fallback() {
        let line = Line::new((100, 100), (200, 100));
        let err = derive_anchors(&line, &WidthConfig::default()).unwrap_err();
        assert!(matches!(err, Error::DegenerateLine { .. }));
    }

    #[test]
    fn horizontal_line_uses_min_slope_fallback() {
        let line = Line::new((100, 100), (200, 100));
        let cfg = WidthConfig::default().with_min_slope(0.5);
        let [near, far] = derive_anchors(&line, &cfg).unwrap();
        assert_eq!(near.slope, 0.5);
        assert_eq!((near.x, near.y), (20, 60));
        assert_eq!((far.x, far.y), (-60, 20));
    }

    #[test]
    fn min_slope_keeps_sign_of_shallow_lines() {
        let line = Line::new((0, 10), (100, 9));
        let cfg = WidthConfig::default().with_min_slope(0.25);
        let [near, _] = derive_anchors(&line, &cfg).unwrap();
        assert_eq!(near.slope, -0.25);
        assert_eq!(near.x, 160);
    }

    #[test]
    fn steep_lines_are_not_affected_by_min_slope() {
        let line = Line::new((75, 182), (31, 35));
        let plain = derive_anchors(&line, &WidthConfig::default()).unwrap();
        let fallback = derive_anchors(&line, &WidthConfig::default().with_min_slope(0.1)).unwrap();
        assert_eq!(plain, fallback);
    }

    #[test]
    fn tiny_min_slope_is_rejected_not_saturated() {
        // -40 / 1e-300 is finite but far beyond any pixel coordinate
        let line = Line::new((10, 50), (20, 50));
        let cfg = WidthConfig::default().with_min_slope(1e-300);
        let err = derive_anchors(&line, &cfg).unwrap_err();
        assert!(matches!(
            err,
            Error::DegenerateLine {
                reason: "anchor coordinates out of range",
                ..
            }
        ));
    }

    #[test]
    fn line_display_matches_tuple_notation() {
        let line: Line = ((1, 2), (3, 4)).into();
        assert_eq!(line.to_string(), "((1, 2), (3, 4))");
    }
}
