//! Color rendering of a measurement over its source image.

use image::{buffer::ConvertBuffer, GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use rayon::prelude::*;

use crate::width::FingerMeasurement;

const LINE_COLOR: Rgb<u8> = Rgb([0, 200, 0]);
const SAMPLE_COLOR: Rgb<u8> = Rgb([0, 120, 255]);
const START_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const END_COLOR: Rgb<u8> = Rgb([255, 200, 0]);

/// Draws a measurement on top of the image it was taken from.
///
/// # Color Scheme
///
/// - **Annotated lines**: green
/// - **Sampled profile pixels**: blue
/// - **Start landmark**: red
/// - **End landmark**: yellow
///
/// # Examples
///
/// ```rust,no_run
/// use finger_width::{measure_finger_widths, visualize_measurement, Line, WidthConfig};
///
/// let image = image::open("Image1.JPG").unwrap().to_luma8();
/// let lines = [Line::new((75, 182), (31, 35))];
/// let measurement = measure_finger_widths(&image, &lines, &WidthConfig::default());
/// visualize_measurement(&image, &measurement).save("measurement.png").unwrap();
/// ```
pub fn visualize_measurement(image: &GrayImage, measurement: &FingerMeasurement) -> RgbImage {
    let mut canvas: RgbImage = image.convert();

    for measured in &measurement.lines {
        let line = measured.line;
        draw_line_segment_mut(
            &mut canvas,
            (line.x1 as f32, line.y1 as f32),
            (line.x2 as f32, line.y2 as f32),
            LINE_COLOR,
        );
    }

    // Gather pixels in parallel, draw serially
    let points: Vec<(u32, u32, Rgb<u8>)> = measurement
        .lines
        .par_iter()
        .filter_map(|measured| measured.anchors.as_ref().ok())
        .flat_map_iter(|anchors| anchors.iter().filter_map(|width| width.as_ref().ok()))
        .flat_map_iter(|width| {
            let samples = width.profile.samples();
            let landmark = |index: usize, color| samples.get(index).map(|s| (s.x, s.y, color));
            samples
                .iter()
                .map(|s| (s.x, s.y, SAMPLE_COLOR))
                .chain(landmark(width.landmarks.start, START_COLOR))
                .chain(landmark(width.landmarks.end, END_COLOR))
                .collect::<Vec<_>>()
        })
        .collect();

    for (x, y, color) in points {
        if x < canvas.width() && y < canvas.height() {
            canvas.put_pixel(x, y, color);
        }
    }

    canvas
}
