//! Width computation and the per-image measurement pipeline.

use std::path::Path;

use image::GrayImage;
use rayon::prelude::*;

use crate::anchors::{derive_anchors, AnchorKind, AnchorPoint, Line};
use crate::config::{LandmarkConfig, WidthConfig};
use crate::error::Result;
use crate::landmarks::{detect_landmarks, LandmarkPair};
use crate::profile::{sample_profile, Profile, ProfileOverlay};

/// Number of pixels between the landmarks, `end - start`.
///
/// The value is not clamped: a pair with `end < start` yields a negative width.
///
/// ```rust
/// use finger_width::{compute_distance, LandmarkPair};
///
/// assert_eq!(compute_distance(&LandmarkPair::new(10, 25)), 15);
/// assert_eq!(compute_distance(&LandmarkPair::new(25, 10)), -15);
/// ```
pub fn compute_distance(pair: &LandmarkPair) -> i32 {
    pair.end as i32 - pair.start as i32
}

/// Detects landmarks on every profile and returns one distance per profile,
/// in input order. A failing profile does not affect the others.
pub fn compute_widths(profiles: &[Profile], config: &LandmarkConfig) -> Vec<Result<i32>> {
    profiles
        .iter()
        .map(|profile| {
            detect_landmarks(&profile.intensities(), config).map(|pair| compute_distance(&pair))
        })
        .collect()
}

/// Everything measured at one anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileWidth {
    pub anchor: AnchorPoint,
    pub profile: Profile,
    pub landmarks: LandmarkPair,
    pub distance: i32,
}

/// Measurements of one annotated line: one per anchor.
///
/// `anchors` is an error when no anchor could be derived from the line; the
/// inner results fail independently.
#[derive(Debug)]
pub struct LineMeasurement {
    pub line: Line,
    pub anchors: Result<[Result<ProfileWidth>; 2]>,
}

impl LineMeasurement {
    pub fn anchor(&self, kind: AnchorKind) -> Option<&ProfileWidth> {
        let anchors = self.anchors.as_ref().ok()?;
        let index = match kind {
            AnchorKind::Near => 0,
            AnchorKind::Far => 1,
        };
        anchors[index].as_ref().ok()
    }

    /// Near and far distances; `None` where that anchor failed.
    pub fn distances(&self) -> [Option<i32>; 2] {
        [AnchorKind::Near, AnchorKind::Far].map(|kind| self.anchor(kind).map(|w| w.distance))
    }

    /// Mean of the successful anchor distances, the single per-line width.
    pub fn mean_distance(&self) -> Option<f64> {
        let found: Vec<i32> = self.distances().into_iter().flatten().collect();
        if found.is_empty() {
            return None;
        }
        Some(found.iter().map(|&d| d as f64).sum::<f64>() / found.len() as f64)
    }
}

/// Result of measuring all lines of one image.
#[derive(Debug)]
pub struct FingerMeasurement {
    pub lines: Vec<LineMeasurement>,
    /// Source raster with every sampled pixel blackened.
    pub overlay: GrayImage,
}

impl FingerMeasurement {
    /// Per-profile distances, two per line in line order.
    pub fn distances(&self) -> Vec<Option<i32>> {
        self.lines.iter().flat_map(|line| line.distances()).collect()
    }

    /// Per-line widths, see [`LineMeasurement::mean_distance`].
    pub fn line_widths(&self) -> Vec<Option<f64>> {
        self.lines.iter().map(LineMeasurement::mean_distance).collect()
    }

    pub fn failures(&self) -> usize {
        self.distances().iter().filter(|d| d.is_none()).count()
    }
}

/// Measures every line of `raster`, tracing sampled pixels on `overlay`.
pub fn measure_lines(
    raster: &GrayImage,
    lines: &[Line],
    overlay: &mut ProfileOverlay,
    config: &WidthConfig,
) -> Vec<LineMeasurement> {
    lines
        .iter()
        .map(|line| LineMeasurement {
            line: *line,
            anchors: derive_anchors(line, config).map(|anchors| {
                anchors.map(|anchor| measure_anchor(anchor, raster, overlay, config))
            }),
        })
        .collect()
}

fn measure_anchor(
    anchor: AnchorPoint,
    raster: &GrayImage,
    overlay: &mut ProfileOverlay,
    config: &WidthConfig,
) -> Result<ProfileWidth> {
    let profile = sample_profile(&anchor, raster, overlay, config)?;
    let landmarks = detect_landmarks(&profile.intensities(), &config.landmarks)?;
    Ok(ProfileWidth {
        anchor,
        profile,
        landmarks,
        distance: compute_distance(&landmarks),
    })
}

/// Measures finger widths along `lines` in one grayscale image.
///
/// The overlay starts as a copy of `raster`; the raster itself is only read.
///
/// # Arguments
///
/// * `raster` - Grayscale image holding the fingers
/// * `lines` - One annotated reference line per finger
/// * `config` - Anchor offsets, sampling range and landmark parameters
///
/// # Returns
///
/// A [`FingerMeasurement`] with one [`LineMeasurement`] per input line, in
/// input order, and the overlay of every pixel sampled by a successful
/// profile. Failures (degenerate lines, empty profiles) are recorded per line
/// or per anchor and never stop the remaining lines.
///
/// # Performance
///
/// Sequential within the image: two profiles of at most 45 samples per line,
/// each followed by a quadratic landmark search over its samples. Use
/// [`measure_batch`] to spread several images across threads.
///
/// # Examples
///
/// ```rust
/// use finger_width::{measure_finger_widths, Line, WidthConfig};
/// use image::{GrayImage, Luma};
///
/// // a dark vertical finger, 15 px wide, on a bright background
/// let raster = GrayImage::from_fn(300, 200, |x, _| {
///     if (143..=157).contains(&x) { Luma([40]) } else { Luma([220]) }
/// });
/// let lines = [Line::new((148, 190), (152, 10))];
///
/// let measurement = measure_finger_widths(&raster, &lines, &WidthConfig::default());
/// assert_eq!(measurement.distances(), vec![Some(15), Some(15)]);
/// ```
pub fn measure_finger_widths(
    raster: &GrayImage,
    lines: &[Line],
    config: &WidthConfig,
) -> FingerMeasurement {
    debug!(
        "measuring {} lines on {}x{} raster",
        lines.len(),
        raster.width(),
        raster.height()
    );

    let mut overlay = ProfileOverlay::new(raster);
    let measured = measure_lines(raster, lines, &mut overlay, config);

    FingerMeasurement {
        lines: measured,
        overlay: overlay.into_image(),
    }
}

/// Like [`measure_finger_widths`], then persists the overlay to `output`.
///
/// # Errors
///
/// Returns [`crate::Error::Image`] if the overlay cannot be written.
///
/// ```rust,no_run
/// use finger_width::{measure_and_save, Line, WidthConfig};
///
/// let raster = image::open("Image1.JPG").unwrap().to_luma8();
/// let lines = [Line::new((75, 182), (31, 35)), Line::new((113, 159), (127, 0))];
/// let measurement = measure_and_save(&raster, &lines, "Profiles1.JPG", &WidthConfig::default()).unwrap();
/// println!("{:?}", measurement.distances());
/// ```
pub fn measure_and_save<P: AsRef<Path>>(
    raster: &GrayImage,
    lines: &[Line],
    output: P,
    config: &WidthConfig,
) -> Result<FingerMeasurement> {
    let mut overlay = ProfileOverlay::new(raster);
    let measured = measure_lines(raster, lines, &mut overlay, config);
    let overlay = overlay.save(output)?;

    Ok(FingerMeasurement {
        lines: measured,
        overlay,
    })
}

/// Measures several independent images in parallel.
///
/// Each image gets its own overlay; results keep the input order.
pub fn measure_batch(images: &[(GrayImage, Vec<Line>)], config: &WidthConfig) -> Vec<FingerMeasurement> {
    images
        .par_iter()
        .map(|(raster, lines)| measure_finger_widths(raster, lines, config))
        .collect()
}
