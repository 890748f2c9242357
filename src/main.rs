//! Command-line front end for the `mapscale` library.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, fmt};

use mapscale::{
    ImageSpec, MapScale, PaperSize, PrintConfig, Selection, TracingTrace, compute_traced, text,
};

/// Calculate scaling factors for terrain images on A-series paper
#[derive(Debug, Parser)]
#[command(
    name = "mapscale",
    about = "Calculate scaling factors for terrain images on A-series paper",
    after_help = "Examples:\n  \
        mapscale --width 2500 --height 1800 --pixels 1000 --meters 50\n  \
        mapscale -w 3000 --height 2000 -p 500 -m 25 --dpi 600\n  \
        mapscale -w 1920 --height 1080 -p 100 -m 10 --paper A2 --scale 2000"
)]
struct Cli {
    /// Original image width in pixels
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Original image height in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Number of pixels in the image spanning the reference distance
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pixels: u32,

    /// Reference distance in meters that the pixel count represents
    #[arg(short, long, allow_negative_numbers = true)]
    meters: f64,

    /// Target DPI for printing
    #[arg(long, default_value_t = mapscale::calculator::DEFAULT_DPI,
          value_parser = clap::value_parser!(u32).range(1..))]
    dpi: u32,

    /// Show results only for this paper size (A0, A1, A2, A3)
    #[arg(long, value_name = "SIZE")]
    paper: Option<PaperSize>,

    /// Show results only for this scale (e.g. 2000 or 1:2000)
    #[arg(long, value_name = "DENOMINATOR")]
    scale: Option<MapScale>,

    /// Largest share of each paper axis the image may cover, in percent
    #[arg(long, value_name = "PERCENT", allow_negative_numbers = true,
          default_value_t = mapscale::calculator::DEFAULT_MAX_COVERAGE)]
    max_coverage: f64,

    /// Print the selected results as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Show paper dimensions; repeat to raise log verbosity
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(
        format!("mapscale={level}")
            .parse()
            .context("building log filter")?,
    );
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let image = ImageSpec::new(cli.width, cli.height, cli.pixels, cli.meters);
    let config = PrintConfig::new()
        .dpi(cli.dpi)
        .max_coverage(cli.max_coverage);
    let selection = Selection {
        paper: cli.paper,
        scale: cli.scale,
    };
    debug!(?image, ?config, ?selection, "computing");

    let table = compute_traced(image, config, &mut TracingTrace).context("invalid input")?;

    if cli.json {
        let selected = table.select(&selection)?;
        let json = serde_json::to_string_pretty(&selected).context("serializing results")?;
        println!("{json}");
    } else {
        let report = text::render(&table, &selection, cli.verbose > 0)?;
        print!("{report}");
    }
    Ok(())
}
