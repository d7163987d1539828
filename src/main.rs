// Vectrex Emulator - Main Entry Point
//
// Opens a window running the built-in test pattern core, optionally with a
// cartridge image inserted.

use clap::Parser;
use std::path::PathBuf;
use vecx_rs::demo::TestPatternCore;
use vecx_rs::display::{run_emulator, WindowConfig};
use vecx_rs::emulator::{Emulator, EmulatorConfig, CONFIG_FILE};
use vecx_rs::input::config::INPUT_CONFIG_FILE;
use vecx_rs::input::InputConfig;
use vecx_rs::vector::DiscAnchor;

#[derive(Parser, Debug)]
#[command(name = "vecx-rs", version, about = "Vectrex vector display emulator")]
struct Args {
    /// Cartridge image (.bin or .vec)
    cartridge: Option<PathBuf>,

    /// Window scale (1-8), overrides the configuration file
    #[arg(short, long)]
    scale: Option<u32>,

    /// Dot radius in pixels
    #[arg(long)]
    point_radius: Option<u32>,

    /// Line width setting, stored in the configuration (lines use the dot radius)
    #[arg(long)]
    line_radius: Option<u32>,

    /// Measure thick dots from their center instead of the corner
    #[arg(long)]
    centered_dots: bool,

    /// Emulator configuration file
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Input configuration file
    #[arg(long, default_value = INPUT_CONFIG_FILE)]
    input_config: PathBuf,

    /// Run without sound
    #[arg(long)]
    no_audio: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("vecx-rs v{}", env!("CARGO_PKG_VERSION"));

    let mut config = EmulatorConfig::load_or_default(&args.config);
    if let Some(scale) = args.scale {
        config.video.scale = scale;
    }
    if let Some(radius) = args.point_radius {
        config.beam.point_radius = radius;
    }
    if let Some(radius) = args.line_radius {
        config.beam.line_radius = radius;
    }
    if args.centered_dots {
        config.beam.anchor = DiscAnchor::Center;
    }
    if args.no_audio {
        config.audio.enabled = false;
    }

    let input_config = InputConfig::load_or_default(&args.input_config);
    let window_config = WindowConfig::from_video(&config.video);

    let mut emulator = Emulator::new(TestPatternCore::new(), config);
    if let Some(path) = &args.cartridge {
        emulator.load_cartridge_file(path)?;
    }

    run_emulator(window_config, emulator, Some(&input_config))?;

    log::info!("Window closed");
    Ok(())
}
