use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use rlekit::config::{
    DEFAULT_ASSET_DIR, DEFAULT_COUNT, DEFAULT_PREFIX, DEFAULT_ROUNDTRIP_INPUT, DEFAULT_SCALE,
    DownsampleConfig, RoundTripConfig,
};
use rlekit::rlekit_scale::plan::ResampleFilter;
use rlekit::{HasRecoverySuggestion, KitError, channels, downsample, roundtrip, table};

/// Run-length round-trip checks and downsampling reports for images.
#[derive(Parser, Debug)]
#[command(name = "rlekit", version)]
#[command(about = "RLE round-trip check and nearest-neighbor downsampling report")]
struct Args {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode and decode every color channel of an image and verify the result
    Roundtrip {
        /// Image to check
        #[arg(default_value = DEFAULT_ROUNDTRIP_INPUT)]
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Also write the image rebuilt from the decoded channels
        #[arg(long, value_name = "PATH")]
        rebuild: Option<PathBuf>,
    },

    /// Resize a batch of images and tabulate raw size before and after
    Downsample {
        /// Images to process. When empty, uses <ASSET_DIR>/<PREFIX><i>.jpg for i in 0..COUNT
        files: Vec<PathBuf>,

        /// Directory of the default batch
        #[arg(long, default_value = DEFAULT_ASSET_DIR)]
        asset_dir: PathBuf,

        /// File name prefix of the default batch
        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,

        /// Number of files in the default batch
        #[arg(long, default_value_t = DEFAULT_COUNT)]
        count: usize,

        /// Linear scale factor for both axes
        #[arg(short, long, default_value_t = DEFAULT_SCALE)]
        scale: f64,

        /// Resampling filter
        #[arg(short, long, value_enum, default_value_t = ResampleFilter::Nearest)]
        filter: ResampleFilter,

        /// Write each resized image as <name>_resized.png into this directory
        #[arg(long, value_name = "DIR")]
        save_dir: Option<PathBuf>,

        /// Skip images that cannot be read or written instead of stopping
        #[arg(long)]
        skip_failed: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            if let Some(hint) = err
                .downcast_ref::<KitError>()
                .and_then(|e| e.recovery_suggestion())
            {
                eprintln!("Hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Roundtrip {
            input,
            json,
            rebuild,
        } => run_roundtrip(RoundTripConfig::new(input), json, rebuild),
        Command::Downsample {
            files,
            asset_dir,
            prefix,
            count,
            scale,
            filter,
            save_dir,
            skip_failed,
            json,
        } => {
            let inputs = if files.is_empty() {
                DownsampleConfig::default_batch(&asset_dir, &prefix, count)
            } else {
                files
            };
            let config = DownsampleConfig::new(inputs, scale, filter, save_dir)
                .with_skip_failed(skip_failed);
            config.validate().map_err(anyhow::Error::msg)?;
            run_downsample(&config, json)
        }
    }
}

fn run_roundtrip(config: RoundTripConfig, json: bool, rebuild: Option<PathBuf>) -> Result<()> {
    config.validate().map_err(anyhow::Error::msg)?;

    log::info!("round trip: {}", config.input.display());
    let img = channels::load_rgb(&config.input)?;
    let report = roundtrip::check_image(&img)
        .with_context(|| format!("round trip of {}", config.input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    if let Some(path) = rebuild {
        let rebuilt = roundtrip::rebuild_image(&img)?;
        rebuilt
            .save(&path)
            .map_err(|e| KitError::image_save(&path, e))?;
        log::info!("rebuilt image written to {}", path.display());
    }

    roundtrip::ensure_identical(&report)?;
    Ok(())
}

fn run_downsample(config: &DownsampleConfig, json: bool) -> Result<()> {
    let rows = downsample::run(config)?;

    if json {
        println!("{}", table::render_json(&rows)?);
    } else {
        print!("{}", table::render_table(&rows));
    }
    Ok(())
}

/// Initialise `env_logger` once: `[LEVEL] message` lines on stderr.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.parse_default_env();
    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(buf, "[{}] {}", record.level(), record.args())
    });
    let _ = builder.try_init();
}
