//! Sliding-window landmark detection on a single intensity profile.

use crate::config::LandmarkConfig;
use crate::error::{Error, Result};
use crate::profile::Profile;

/// Extrema of the window centred on one profile index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowExtrema {
    pub max_val: u8,
    /// First index in the window holding `max_val`.
    pub max_index: usize,
    pub min_val: u8,
    /// First index in the window holding `min_val`.
    pub min_index: usize,
}

impl WindowExtrema {
    /// Local contrast, the salience score of the window.
    pub fn contrast(&self) -> u8 {
        self.max_val - self.min_val
    }

    /// Bright-to-dark transition: the minimum comes after the maximum.
    pub fn is_falling(&self) -> bool {
        self.min_index > self.max_index
    }

    /// Dark-to-bright transition: the maximum comes after the minimum.
    pub fn is_rising(&self) -> bool {
        self.max_index > self.min_index
    }
}

/// Start and end indices bounding the feature within a profile.
///
/// `start` is picked among falling windows and `end` among rising ones,
/// independently, so `end < start` is possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LandmarkPair {
    pub start: usize,
    pub end: usize,
}

impl LandmarkPair {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Distance between the landmarks in nominal perpendicular offsets.
    ///
    /// Differs from the index distance when samples between the landmarks were
    /// dropped at the raster border. `None` if an index is outside `profile`.
    pub fn offset_span(&self, profile: &Profile) -> Option<i32> {
        Some(profile.offset_at(self.end)? - profile.offset_at(self.start)?)
    }
}

/// Computes the extrema of the window `[i - radius, i + radius]` for every
/// index `i`, clipped to the profile bounds.
///
/// # Examples
///
/// ```rust
/// use finger_width::window_extrema;
///
/// let extrema = window_extrema(&[10, 40, 40, 5, 20], 2);
/// assert_eq!(extrema[0].max_index, 1);
/// assert_eq!(extrema[2].min_index, 3);
/// assert_eq!(extrema[4].contrast(), 35);
/// ```
pub fn window_extrema(profile: &[u8], radius: usize) -> Vec<WindowExtrema> {
    let last = profile.len().saturating_sub(1);

    (0..profile.len())
        .map(|i| {
            let lo = i.saturating_sub(radius);
            let hi = i.saturating_add(radius).min(last);

            let mut extrema = WindowExtrema {
                max_val: profile[lo],
                max_index: lo,
                min_val: profile[lo],
                min_index: lo,
            };
            for (j, &value) in profile.iter().enumerate().take(hi + 1).skip(lo + 1) {
                // strict comparisons keep the leftmost index on ties
                if value > extrema.max_val {
                    extrema.max_val = value;
                    extrema.max_index = j;
                }
                if value < extrema.min_val {
                    extrema.min_val = value;
                    extrema.min_index = j;
                }
            }
            extrema
        })
        .collect()
}

/// Locates the proximal and distal edges of the feature crossed by `profile`.
///
/// Every index `k` is compared against every other index `i`. A falling window
/// at `k` becomes the start when its contrast beats both the window at `i` and
/// the current start; a rising window becomes the end under the same rule
/// against the current end. Both begin at index 0, which is kept when no
/// window qualifies unless [`LandmarkConfig::require_edges`] is set.
///
/// # Arguments
///
/// * `profile` - Intensities in sampling order
/// * `config` - Window radius, minimum profile length and edge requirement
///
/// # Returns
///
/// The selected [`LandmarkPair`]. `start` and `end` are chosen independently,
/// so `end < start` is a valid result; `(0, 0)` is also what a profile without
/// any qualifying window returns.
///
/// # Performance
///
/// Every index is compared with every other one, `O(n²)` for `n` samples.
/// With the default 45-sample profiles this is about 2000 comparisons.
///
/// # Errors
///
/// * [`Error::InsufficientSamples`] if the profile is shorter than
///   [`LandmarkConfig::min_samples`] (never less than one sample).
/// * [`Error::NoEdgeDetected`] if edges are required and one was not found.
///
/// # Examples
///
/// ```rust
/// use finger_width::{detect_landmarks, LandmarkConfig, LandmarkPair};
///
/// // a dark band between two bright regions
/// let mut profile = vec![200u8; 8];
/// profile.extend([50u8; 8]);
/// profile.extend([200u8; 4]);
///
/// let pair = detect_landmarks(&profile, &LandmarkConfig::default()).unwrap();
/// assert_eq!(pair, LandmarkPair::new(6, 14));
/// ```
pub fn detect_landmarks(profile: &[u8], config: &LandmarkConfig) -> Result<LandmarkPair> {
    let required = config.min_samples.max(1);
    if profile.len() < required {
        return Err(Error::InsufficientSamples {
            required,
            actual: profile.len(),
        });
    }

    let extrema = window_extrema(profile, config.window_radius);

    let mut pair = LandmarkPair::default();
    let mut start_found = false;
    let mut end_found = false;

    for (k, at_k) in extrema.iter().enumerate() {
        let contrast = at_k.contrast();
        for (i, at_i) in extrema.iter().enumerate() {
            if i == k || contrast <= at_i.contrast() {
                continue;
            }
            if at_k.is_falling() && contrast > extrema[pair.start].contrast() {
                pair.start = k;
                start_found = true;
            }
            if at_k.is_rising() && contrast > extrema[pair.end].contrast() {
                pair.end = k;
                end_found = true;
            }
        }
    }

    if config.require_edges && !(start_found && end_found) {
        return Err(Error::NoEdgeDetected {
            start_found,
            end_found,
        });
    }

    debug!(
        "landmarks over {} samples: start {} end {}",
        profile.len(),
        pair.start,
        pair.end
    );
    Ok(pair)
}
