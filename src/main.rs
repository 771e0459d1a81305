use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use framepal::config::{
    AggregationSetting, Config, ConfigOverrides, DisposalSetting, OutputFormat, CONFIG_ENV,
};
use framepal::pipeline::{self, PaletteReport};

#[derive(Parser)]
#[command(name = "framepal")]
#[command(about = "Shared-palette median cut quantizer for animated PNGs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Quantize PNG frames onto one palette and write an animation
    Encode {
        /// Input PNG frames, in display order
        #[arg(required = true)]
        frames: Vec<PathBuf>,

        /// Output path (APNG file, or stem of the frame sequence)
        #[arg(short, long)]
        output: PathBuf,

        /// Output container
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Frame delay in milliseconds
        #[arg(long)]
        delay: Option<u32>,

        /// Frame disposal method
        #[arg(long, value_enum)]
        disposal: Option<DisposalSetting>,

        /// Number of plays (0 = forever)
        #[arg(long)]
        loops: Option<u32>,

        /// Re-compress frame sequence files with oxipng
        #[arg(long)]
        optimize: bool,

        #[command(flatten)]
        quantize: QuantizeArgs,
    },
    /// Print the shared palette of PNG frames
    Palette {
        /// Input PNG frames
        #[arg(required = true)]
        frames: Vec<PathBuf>,

        /// Print JSON instead of one hex color per line
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        quantize: QuantizeArgs,
    },
}

#[derive(Args)]
struct QuantizeArgs {
    /// Palette size (1-256), transparent slot included
    #[arg(short, long)]
    colors: Option<usize>,

    /// Bucket aggregation
    #[arg(short, long, value_enum)]
    aggregation: Option<AggregationSetting>,

    /// Always reserve a transparent palette slot
    #[arg(long)]
    reserve_transparent: bool,

    /// Bits per channel in palette lookup cache keys (1-8)
    #[arg(long)]
    key_bits: Option<u8>,

    /// YAML config file (defaults to $FRAMEPAL_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl QuantizeArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            colors: self.colors,
            aggregation: self.aggregation,
            reserve_transparent: self.reserve_transparent,
            key_bits: self.key_bits,
            ..Default::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Encode {
            frames,
            output,
            format,
            delay,
            disposal,
            loops,
            optimize,
            quantize,
        }) => {
            init_tracing();
            let overrides = ConfigOverrides {
                format,
                delay_ms: delay,
                disposal,
                loops,
                optimize,
                ..quantize.overrides()
            };
            let config = load_config(quantize.config, &overrides)?;
            run_encode_command(&frames, &output, &config)
        }
        Some(Commands::Palette {
            frames,
            json,
            quantize,
        }) => {
            init_tracing();
            let overrides = quantize.overrides();
            let config = load_config(quantize.config, &overrides)?;
            run_palette_command(&frames, json, &config)
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Log to stderr so stdout stays clean for palette output.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "framepal=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_config(path: Option<PathBuf>, overrides: &ConfigOverrides) -> anyhow::Result<Config> {
    let mut config = Config::load_or_default(path.as_deref())?;
    config.apply(overrides)?;
    Ok(config)
}

fn run_encode_command(frames: &[PathBuf], output: &Path, config: &Config) -> anyhow::Result<()> {
    let summary = pipeline::encode_files(frames, output, config)?;

    let transparency = match summary.transparent_index {
        Some(index) => format!(", transparent index {index}"),
        None => String::new(),
    };
    println!(
        "Encoded {} frame(s) at {}x{} with {} color(s){} -> {}",
        summary.frames,
        summary.width,
        summary.height,
        summary.colors,
        transparency,
        output.display()
    );
    Ok(())
}

fn run_palette_command(frames: &[PathBuf], json: bool, config: &Config) -> anyhow::Result<()> {
    let palette = pipeline::palette_files(frames, config)?;

    if json {
        let report = PaletteReport::from(&palette);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (index, color) in palette.colors().iter().enumerate() {
            if palette.transparent_index() == Some(index as u8) {
                println!("{color} (transparent)");
            } else {
                println!("{color}");
            }
        }
    }
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var(CONFIG_ENV).ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    println!("framepal v{VERSION}");
    println!("Shared-palette median cut quantizer for animated PNGs\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG        = {}",
        rust_log.as_deref().unwrap_or("framepal=info (default)")
    );

    println!("\nDefaults:");
    let defaults = Config::default();
    println!("  colors      = {}", defaults.colors);
    println!("  aggregation = mode");
    println!("  format      = apng");
    println!("  delay       = {} ms", defaults.output.delay_ms);
    println!("  disposal    = background");

    println!("\nUsage:");
    println!("  framepal encode <frames...> -o out.png   Write an animated PNG");
    println!("  framepal encode <frames...> -o out.png --format frames");
    println!("                                           Write a PNG sequence and manifest");
    println!("  framepal palette <frames...> [--json]    Print the shared palette");
    println!("  framepal --help                          Show all options");
}
