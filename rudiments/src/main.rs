// Example runner for the `rudiments` library: reads an image, simulates a
// color vision deficiency, writes the result as PNG and prints a short color
// report for both versions.
//
//     rudiments <input> <output.png> [p|d|t]

use anyhow::{Context, Result, bail};
use rudiments::{ColorblindMode, Image, Pixmap};

fn init_logging() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn report(label: &str, pixmap: &Pixmap) {
    let summary = pixmap.count_colors();
    println!(
        "{label}: {}x{} px, {} colors, darkest {:#010x}, brightest {:#010x}",
        pixmap.width(),
        pixmap.height(),
        summary.distinct,
        summary.darkest,
        summary.brightest,
    );
    if let Some(dominant) = pixmap.dominant_color() {
        println!(
            "{label}: dominant {:#010x} covering {} px",
            dominant,
            pixmap.color_count(dominant)
        );
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        let program = args.first().map_or("rudiments", String::as_str);
        bail!("usage: {} <input> <output.png> [p|d|t]", program);
    }
    let mode = args
        .get(3)
        .map_or(ColorblindMode::Protanopia, |code| ColorblindMode::from_code(code));

    let mut image =
        Image::open(&args[1]).with_context(|| format!("reading image '{}'", args[1]))?;
    report("input", image.pixmap());

    image
        .recolor(mode)
        .with_context(|| format!("recoloring with mode '{}'", mode.code()))?;
    report("output", image.pixmap());

    image
        .write_png(&args[2])
        .with_context(|| format!("writing '{}'", args[2]))?;
    println!("wrote {}", args[2]);
    Ok(())
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
