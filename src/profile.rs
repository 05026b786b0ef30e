//! Perpendicular intensity profiles and the debug overlay they are traced on.

use std::path::Path;

use image::GrayImage;
use imageproc::definitions::HasBlack;

use crate::anchors::AnchorPoint;
use crate::config::WidthConfig;
use crate::error::{Error, Result};

/// One retained sample of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSample {
    /// Nominal offset from the anchor along the perpendicular axis.
    pub offset: i32,
    pub x: u32,
    pub y: u32,
    pub intensity: u8,
}

/// Ordered grayscale samples taken across a finger at one anchor.
///
/// Samples falling outside the raster are dropped, so index `i` of the
/// profile is not offset `i - 21` in general; [`Profile::offset_at`] maps a
/// retained index back to its spatial offset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    samples: Vec<ProfileSample>,
}

impl Profile {
    pub fn from_samples(samples: Vec<ProfileSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[ProfileSample] {
        &self.samples
    }

    /// Intensities in sampling order, the sequence landmark detection runs on.
    pub fn intensities(&self) -> Vec<u8> {
        self.samples.iter().map(|s| s.intensity).collect()
    }

    pub fn offset_at(&self, index: usize) -> Option<i32> {
        self.samples.get(index).map(|s| s.offset)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Debug raster collecting every pixel sampled for one image.
///
/// Created from the source raster before measuring, marked by every profile
/// of that image and persisted once at the end.
#[derive(Debug, Clone)]
pub struct ProfileOverlay {
    canvas: GrayImage,
}

impl ProfileOverlay {
    pub fn new(source: &GrayImage) -> Self {
        Self {
            canvas: source.clone(),
        }
    }

    /// Blackens `(x, y)`. Coordinates outside the canvas are ignored.
    pub fn mark(&mut self, x: u32, y: u32) {
        if x < self.canvas.width() && y < self.canvas.height() {
            self.canvas.put_pixel(x, y, image::Luma::<u8>::black());
        }
    }

    pub fn image(&self) -> &GrayImage {
        &self.canvas
    }

    pub fn into_image(self) -> GrayImage {
        self.canvas
    }

    /// Writes the overlay; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<GrayImage> {
        self.canvas.save(path.as_ref())?;
        debug!("profile overlay saved to {}", path.as_ref().display());
        Ok(self.canvas)
    }
}

/// Samples the intensity profile perpendicular to the line through `anchor`.
///
/// For every offset `i` the sample position is `x = anchor.x + i`,
/// `y = round(anchor.y - i / slope)`. Columns outside `[0, width)` and rows
/// rejected by [`WidthConfig::vertical_bound`] are skipped, as are offsets
/// whose column does not fit an `i64`.
///
/// # Arguments
///
/// * `anchor` - Seed position and slope of the annotated line
/// * `raster` - Source grayscale image, only read
/// * `overlay` - Debug raster of the current image; every retained sample is
///   blackened once the whole profile has been read
/// * `config` - Offset range and vertical bound to sample with
///
/// # Returns
///
/// The retained samples in offset order. The profile is shorter than the
/// offset range when samples fall outside the raster; it is never padded.
///
/// # Errors
///
/// [`Error::PixelOutOfBounds`] when the inclusive vertical bound admits row
/// `height`, which does not exist in the raster. Nothing is marked on
/// `overlay` in that case.
///
/// # Examples
///
/// ```rust
/// use finger_width::{sample_profile, AnchorKind, AnchorPoint, ProfileOverlay, WidthConfig};
/// use image::GrayImage;
///
/// let raster = GrayImage::from_fn(100, 60, |x, _| image::Luma([x as u8]));
/// let mut overlay = ProfileOverlay::new(&raster);
/// let anchor = AnchorPoint { x: 50, y: 30, slope: -1000.0, kind: AnchorKind::Near };
///
/// let profile = sample_profile(&anchor, &raster, &mut overlay, &WidthConfig::default()).unwrap();
/// assert_eq!(profile.len(), 45);
/// assert_eq!(profile.intensities()[21], 50);
/// ```
pub fn sample_profile(
    anchor: &AnchorPoint,
    raster: &GrayImage,
    overlay: &mut ProfileOverlay,
    config: &WidthConfig,
) -> Result<Profile> {
    let (width, height) = raster.dimensions();
    let mut samples = Vec::with_capacity(config.profile_offsets.clone().count());

    for offset in config.profile_offsets.clone() {
        let Some(x) = anchor.x.checked_add(offset as i64) else {
            continue;
        };
        let y = (anchor.y as f64 - offset as f64 / anchor.slope).round_ties_even() as i64;

        if x < 0 || x >= width as i64 || !config.vertical_bound.admits(y, height) {
            continue;
        }
        if y >= height as i64 {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width,
                height,
            });
        }

        let (x, y) = (x as u32, y as u32);
        samples.push(ProfileSample {
            offset,
            x,
            y,
            intensity: raster.get_pixel(x, y)[0],
        });
    }

    // mark only once the whole profile has been read
    for sample in &samples {
        overlay.mark(sample.x, sample.y);
    }

    debug!(
        "profile at ({}, {}) {:?}: {} samples",
        anchor.x,
        anchor.y,
        anchor.kind,
        samples.len()
    );
    Ok(Profile::from_samples(samples))
}
