//! # Finger Width Measurement Library
//!
//! This crate measures the width of finger-like structures in grayscale images. Intensity
//! profiles are sampled perpendicular to manually annotated reference lines, and a
//! sliding-window extrema heuristic picks the pair of profile indices bounding the finger.
//!
//! ## Features
//!
//! - Anchor derivation at configurable offsets along each annotated line
//! - Perpendicular profile sampling with explicit offset bookkeeping
//! - Sliding-window landmark detection (radius-2 extrema, global contrast selection)
//! - Per-anchor and per-line widths, with failures kept local to one profile
//! - Debug overlay of every sampled pixel, persisted once per image
//! - Parallel batch measurement and cross-image statistics
//! - Optional debug logging (enable with `logger` feature)
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use finger_width::{measure_and_save, Line, WidthConfig};
//!
//! // Load image and annotate one line along each finger
//! let image = image::open("Image1.JPG").unwrap().to_luma8();
//! let lines = [
//!     Line::new((75, 182), (31, 35)),
//!     Line::new((113, 159), (127, 0)),
//!     Line::new((152, 153), (193, 0)),
//!     Line::new((194, 169), (259, 27)),
//! ];
//!
//! // Measure and write the sampled pixels to a debug raster
//! let measurement = measure_and_save(&image, &lines, "Profiles1.JPG", &WidthConfig::default()).unwrap();
//!
//! for distance in measurement.distances() {
//!     println!("{distance:?}");
//! }
//! ```
//!
//! ## Optional Features
//!
//! ### Logger Feature
//!
//! Enable debug logging to follow the measurement pipeline:
//!
//! ```toml
//! [dependencies]
//! finger-width = { version = "0.1.0", features = ["logger"] }
//! log = "0.4"
//! env_logger = "0.11"
//! ```
//!
//! ```rust,no_run
//! use finger_width::{measure_finger_widths, Line, WidthConfig};
//!
//! // Initialize logger to see debug output
//! env_logger::init();
//!
//! let image = image::open("Image1.JPG").unwrap().to_luma8();
//! let lines = [Line::new((75, 182), (31, 35))];
//! let measurement = measure_finger_widths(&image, &lines, &WidthConfig::default());
//! // With logger feature, you'll see debug messages like:
//! // DEBUG finger_width::anchors: anchors for line ((75, 182), (31, 35)): [...]
//! // DEBUG finger_width::profile: profile at (63, 142) Near: 45 samples
//! // DEBUG finger_width::landmarks: landmarks over 45 samples: start 12 end 27
//! ```
//!
//! ## Advanced Usage
//!
//! ```rust,no_run
//! use finger_width::{
//!     measure_batch, summarize, LandmarkConfig, Line, VerticalBound, WidthConfig,
//! };
//!
//! // Tighter sampling window, strict row bound, explicit "no edge" errors
//! let config = WidthConfig::default()
//!     .with_profile_offsets(-15..=15)
//!     .with_vertical_bound(VerticalBound::Exclusive)
//!     .with_landmarks(LandmarkConfig {
//!         require_edges: true,
//!         ..LandmarkConfig::default()
//!     });
//!
//! let images: Vec<_> = ["Image1.JPG", "Image2.JPG"]
//!     .iter()
//!     .map(|path| {
//!         let image = image::open(path).unwrap().to_luma8();
//!         (image, vec![Line::new((75, 182), (31, 35))])
//!     })
//!     .collect();
//!
//! // Images are measured in parallel, each with its own overlay
//! let measurements = measure_batch(&images, &config);
//! let series: Vec<_> = measurements.iter().map(|m| m.distances()).collect();
//!
//! for summary in summarize(&series).unwrap().into_iter().flatten() {
//!     println!("mean {:.2} std {:.2}", summary.mean, summary.std_dev);
//! }
//! ```

// Conditional logging macros
#[cfg(feature = "logger")]
macro_rules! debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(feature = "logger"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

mod anchors;
mod config;
mod error;
mod landmarks;
mod profile;
mod summary;
mod visualize;
mod width;

pub use anchors::{derive_anchors, AnchorKind, AnchorPoint, Line};
pub use config::{
    LandmarkConfig, VerticalBound, WidthConfig, DEFAULT_ANCHOR_OFFSETS, DEFAULT_MIN_SAMPLES,
    DEFAULT_PROFILE_OFFSETS, DEFAULT_WINDOW_RADIUS,
};
pub use error::{Error, Result};
pub use landmarks::{detect_landmarks, window_extrema, LandmarkPair, WindowExtrema};
pub use profile::{sample_profile, Profile, ProfileOverlay, ProfileSample};
pub use summary::{summarize, DistanceSummary};
pub use visualize::visualize_measurement;
pub use width::{
    compute_distance, compute_widths, measure_and_save, measure_batch, measure_finger_widths,
    measure_lines, FingerMeasurement, LineMeasurement, ProfileWidth,
};
