use std::path::PathBuf;

use clap::Parser;
use env_logger::Builder;
use finger_width::{measure_and_save, summarize, Line, WidthConfig};
use log::{info, warn};

/// Reference lines drawn along the four fingers of each hand image.
const IMAGE_LINES: [[((i32, i32), (i32, i32)); 4]; 5] = [
    [
        ((75, 182), (31, 35)),
        ((113, 159), (127, 0)),
        ((152, 153), (193, 0)),
        ((194, 169), (259, 27)),
    ],
    [
        ((87, 177), (45, 40)),
        ((124, 161), (135, 0)),
        ((159, 159), (199, 0)),
        ((203, 166), (267, 20)),
    ],
    [
        ((97, 172), (53, 34)),
        ((131, 162), (144, 0)),
        ((164, 156), (205, 0)),
        ((207, 167), (274, 21)),
    ],
    [
        ((98, 173), (55, 36)),
        ((133, 159), (145, 0)),
        ((168, 157), (207, 0)),
        ((207, 167), (277, 27)),
    ],
    [
        ((98, 175), (54, 38)),
        ((132, 163), (144, 0)),
        ((166, 159), (206, 5)),
        ((208, 165), (273, 26)),
    ],
];

#[derive(Parser, Debug)]
#[command(name = "finger_widths")]
#[command(about = "Measure finger widths on Image1.JPG..Image5.JPG", long_about = None)]
struct Args {
    /// Directory holding Image1.JPG .. Image5.JPG
    #[arg(default_value = ".")]
    input: PathBuf,

    /// Directory for the Profiles<n>.JPG overlays (default: input directory)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    Builder::from_default_env().format_timestamp_nanos().init();
    let args = Args::parse();
    let output = args.output.clone().unwrap_or_else(|| args.input.clone());
    let config = WidthConfig::default();

    let mut series = Vec::new();
    for (n, lines) in IMAGE_LINES.iter().enumerate() {
        let number = n + 1;
        let path = args.input.join(format!("Image{number}.JPG"));
        let image = match image::open(&path) {
            Ok(image) => image.to_luma8(),
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                continue;
            }
        };

        let lines: Vec<Line> = lines.iter().copied().map(Line::from).collect();
        let overlay = output.join(format!("Profiles{number}.JPG"));
        let measurement = match measure_and_save(&image, &lines, &overlay, &config) {
            Ok(measurement) => measurement,
            Err(e) => {
                warn!("image {number}: {e}");
                continue;
            }
        };

        for line in &measurement.lines {
            if let Err(e) = &line.anchors {
                warn!("image {number}: {e}");
            }
        }

        println!("Image{number} distances:");
        for distance in measurement.distances() {
            match distance {
                Some(d) => println!("{d}"),
                None => println!("-"),
            }
        }
        println!();
        info!("overlay written to {}", overlay.display());
        series.push(measurement.distances());
    }

    let summary = match summarize(&series) {
        Ok(summary) => summary,
        Err(e) => {
            warn!("no summary: {e}");
            return;
        }
    };

    println!("Mean distances:");
    for position in &summary {
        match position {
            Some(s) => println!("{}", s.mean),
            None => println!("-"),
        }
    }

    println!("\nStandard deviations:");
    for position in &summary {
        match position {
            Some(s) => println!("{}", s.std_dev),
            None => println!("-"),
        }
    }
}
