//! End-to-end measurements on synthetic finger images.

use finger_width::{
    derive_anchors, measure_and_save, measure_finger_widths, sample_profile, summarize,
    AnchorKind, Error, Line, ProfileOverlay, VerticalBound, WidthConfig,
};
use image::{GrayImage, Luma};

const BRIGHT: u8 = 220;
const DARK: u8 = 40;

/// 300x200 bright field with a dark vertical stripe of `width` px centred at x = 150.
fn stripe_image(width: u32) -> GrayImage {
    let left = 150 - width / 2;
    let right = left + width - 1;
    GrayImage::from_fn(300, 200, |x, _| {
        if (left..=right).contains(&x) {
            Luma([DARK])
        } else {
            Luma([BRIGHT])
        }
    })
}

#[test]
fn stripe_of_width_15_measures_15() {
    let image = stripe_image(15);
    // annotation runs along the stripe, so profiles cross it
    let lines = [Line::new((148, 190), (152, 10))];

    let measurement = measure_finger_widths(&image, &lines, &WidthConfig::default());
    for distance in measurement.distances() {
        let distance = distance.expect("both anchors measure the stripe");
        assert!((distance - 15).abs() <= 2, "distance {distance}");
    }
}

#[test]
fn wider_stripes_measure_wider() {
    let lines = [Line::new((148, 190), (152, 10))];
    let cfg = WidthConfig::default();

    let narrow = measure_finger_widths(&stripe_image(9), &lines, &cfg);
    let wide = measure_finger_widths(&stripe_image(21), &lines, &cfg);

    for (n, w) in narrow.distances().into_iter().zip(wide.distances()) {
        let (n, w) = (n.unwrap(), w.unwrap());
        assert!((n - 9).abs() <= 2, "narrow {n}");
        assert!((w - 21).abs() <= 2, "wide {w}");
        assert!(w > n);
    }
}

#[test]
fn horizontal_annotation_is_degenerate() {
    let image = stripe_image(15);
    let lines = [Line::new((100, 100), (200, 100))];

    let measurement = measure_finger_widths(&image, &lines, &WidthConfig::default());
    assert!(matches!(
        measurement.lines[0].anchors,
        Err(Error::DegenerateLine { .. })
    ));
    assert_eq!(measurement.distances(), vec![None, None]);
}

#[test]
fn horizontal_annotation_with_min_slope_leaves_the_raster() {
    // A 0.01 slope floor pushes both anchors thousands of pixels off the image.
    let image = stripe_image(15);
    let lines = [Line::new((100, 100), (200, 100))];
    let cfg = WidthConfig::default().with_min_slope(0.01);

    let measurement = measure_finger_widths(&image, &lines, &cfg);
    let anchors = measurement.lines[0].anchors.as_ref().unwrap();
    for anchor in anchors {
        assert!(matches!(
            anchor,
            Err(Error::InsufficientSamples { actual: 0, .. })
        ));
    }
}

#[test]
fn zero_offset_sample_is_the_anchor_pixel() {
    let image = GrayImage::from_fn(200, 200, |x, y| Luma([((x * 3 + y * 5) % 256) as u8]));
    let line = Line::new((120, 180), (90, 20));
    let cfg = WidthConfig::default();

    let mut overlay = ProfileOverlay::new(&image);
    for anchor in derive_anchors(&line, &cfg).unwrap() {
        let profile = sample_profile(&anchor, &image, &mut overlay, &cfg).unwrap();
        let center = profile
            .samples()
            .iter()
            .find(|s| s.offset == 0)
            .expect("anchor lies inside the image");
        assert_eq!(
            center.intensity,
            image.get_pixel(anchor.x as u32, anchor.y as u32)[0]
        );
    }
}

#[test]
fn small_raster_keeps_only_in_bounds_offsets() {
    let image = GrayImage::from_pixel(12, 12, Luma([90]));
    let line = Line::new((6, 60), (7, 0));
    let cfg = WidthConfig::default()
        .with_anchor_offsets(54.0, 56.0)
        .with_vertical_bound(VerticalBound::Exclusive);

    let [near, far] = derive_anchors(&line, &cfg).unwrap();
    assert_eq!(near.kind, AnchorKind::Near);

    let mut overlay = ProfileOverlay::new(&image);
    for anchor in [near, far] {
        let profile = sample_profile(&anchor, &image, &mut overlay, &cfg).unwrap();
        let expected = (-21..=23)
            .filter(|i| {
                let x = anchor.x + *i as i64;
                let y = (anchor.y as f64 - *i as f64 / anchor.slope).round_ties_even() as i64;
                (0..12).contains(&x) && (0..12).contains(&y)
            })
            .count();
        assert_eq!(profile.len(), expected);
        assert!(profile.len() < 45);
    }
}

#[test]
fn overlay_is_persisted_once_per_image() {
    let image = stripe_image(15);
    let lines = [
        Line::new((148, 190), (152, 10)),
        Line::new((60, 190), (64, 10)),
    ];
    let path = std::env::temp_dir().join(format!("finger-width-overlay-{}.png", std::process::id()));

    let measurement = measure_and_save(&image, &lines, &path, &WidthConfig::default()).unwrap();
    let saved = image::open(&path).unwrap().to_luma8();
    std::fs::remove_file(&path).ok();

    assert_eq!(saved, measurement.overlay);
    assert_eq!(saved.pixels().filter(|p| p[0] == 0).count(), 4 * 45);
}

#[test]
fn measurements_summarize_across_images() {
    let lines = [Line::new((148, 190), (152, 10))];
    let cfg = WidthConfig::default();

    let series: Vec<_> = [13, 15, 17]
        .into_iter()
        .map(|w| measure_finger_widths(&stripe_image(w), &lines, &cfg).distances())
        .collect();
    let summary = summarize(&series).unwrap();

    assert_eq!(summary.len(), 2);
    for position in summary {
        let position = position.unwrap();
        assert_eq!(position.count, 3);
        assert!((position.mean - 15.0).abs() <= 2.0);
        assert!(position.std_dev > 0.0);
    }
}
