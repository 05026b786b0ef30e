use std::path::PathBuf;

use clap::Parser;
use finger_width::{measure_finger_widths, visualize_measurement, Line, VerticalBound, WidthConfig};

#[derive(Parser, Debug)]
#[command(name = "profile_overlay")]
#[command(about = "Measure one image and draw lines, profiles and landmarks", long_about = None)]
struct Args {
    /// Input image file
    image: PathBuf,

    /// Annotated lines as x1,y1,x2,y2
    #[arg(short, long = "line", required = true, value_parser = parse_line)]
    lines: Vec<Line>,

    /// Output visualization
    #[arg(short, long, default_value = "measurement.png")]
    output: PathBuf,

    /// Skip samples on row `height` instead of reporting them
    #[arg(long)]
    exclusive_rows: bool,
}

fn parse_line(s: &str) -> Result<Line, String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<i32>().map_err(|e| format!("{v:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match values[..] {
        [x1, y1, x2, y2] => Ok(Line::new((x1, y1), (x2, y2))),
        _ => Err(format!("expected x1,y1,x2,y2, got {s:?}")),
    }
}

fn main() {
    let args = Args::parse();

    let image = image::open(&args.image).unwrap().to_luma8();
    let mut config = WidthConfig::default();
    if args.exclusive_rows {
        config = config.with_vertical_bound(VerticalBound::Exclusive);
    }

    let measurement = measure_finger_widths(&image, &args.lines, &config);
    for line in &measurement.lines {
        let [near, far] = line.distances();
        println!(
            "{}: near {:?} far {:?} mean {:?}",
            line.line,
            near,
            far,
            line.mean_distance()
        );
    }

    visualize_measurement(&image, &measurement)
        .save(&args.output)
        .unwrap();
    println!("visualization written to {}", args.output.display());
}
