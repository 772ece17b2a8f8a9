use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{info, warn, Level};

use neopixel_spi::color::parse_hex;
use neopixel_spi::{Bus, Config, PixelBuffer, Transport};

#[derive(Parser)]
#[command(name = "neopixel-spi")]
#[command(about = "Count and light WS2812 pixels over a Linux SPI bus", long_about = None)]
struct Cli {
    /// Colors to show, one per pixel, as RRGGBB or RGB hex
    colors: Vec<String>,

    /// Path to configuration file (JSON)
    #[arg(long)]
    config: Option<String>,

    /// Pixel count to use when probing fails or is skipped
    #[arg(long)]
    count: Option<usize>,

    /// Skip counting the pixels
    #[arg(long)]
    no_probe: bool,

    /// Keep the colors lit until Ctrl-C, then turn the strip off
    #[arg(long)]
    hold: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Enable detailed debug (hex dumps of every frame)
    #[arg(long)]
    ddebug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ddebug implies debug
    let level = if cli.ddebug {
        Level::TRACE
    } else if cli.debug {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config: Config = match &cli.config {
        Some(path) => {
            let config_data = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path))?;
            serde_json::from_str(&config_data)
                .with_context(|| format!("Failed to parse config {}", path))?
        }
        None => Config::default(),
    };

    open_and_run(&cli, &config)
}

#[cfg(target_os = "linux")]
fn open_and_run(cli: &Cli, config: &Config) -> Result<()> {
    let bus = neopixel_spi::SpidevBus::open(&config.bus)
        .with_context(|| format!("Failed to open SPI bus {}", config.bus.device))?;
    info!(device = bus.device(), "bus ready");
    let transport = Transport::new(bus).with_probe_capacity(config.probe_capacity);
    run(transport, cli, config)
}

#[cfg(not(target_os = "linux"))]
fn open_and_run(_cli: &Cli, config: &Config) -> Result<()> {
    anyhow::bail!("SPI output needs Linux spidev (wanted {})", config.bus.device)
}

fn run<B: Bus>(mut transport: Transport<B>, cli: &Cli, config: &Config) -> Result<()> {
    let fallback = cli.count.or(config.led_count);

    let count = if cli.no_probe {
        fallback.unwrap_or(cli.colors.len())
    } else {
        match transport.probe() {
            Ok(count) => count,
            Err(e) if e.is_count_indeterminate() => {
                eprintln!("Counting failed: {}", e);
                fallback.unwrap_or(0)
            }
            Err(e) => return Err(e).context("Failed to probe pixels"),
        }
    };
    println!("There are {} lights.", count);

    let mut pixels = PixelBuffer::new(cli.colors.len());
    for (index, text) in cli.colors.iter().enumerate() {
        match parse_hex(text) {
            Some(color) => pixels.set_pixel(index, color),
            None => warn!("Skipping pixel {}: unrecognized color {:?}", index, text),
        }
    }
    transport.send(&pixels).context("Failed to display pixels")?;

    if cli.hold && hold_until_interrupted() {
        // Graceful shutdown - turn off everything we know about
        info!("Turning off LEDs...");
        transport
            .blank(count.max(pixels.len()))
            .context("Failed to turn off pixels")?;
    }

    Ok(())
}

/// Block until Ctrl-C. Returns false if the handler could not be installed.
fn hold_until_interrupted() -> bool {
    let running = Arc::new(AtomicBool::new(true));
    let handler_running = Arc::clone(&running);
    let result = ctrlc::set_handler(move || {
        handler_running.store(false, Ordering::Relaxed);
    });

    if let Err(e) = result {
        eprintln!("Warning: Could not set Ctrl-C handler: {}", e);
        return false;
    }

    info!("Holding colors (press Ctrl-C to stop)");
    while running.load(Ordering::Relaxed) {
        thread::sleep(Duration::from_millis(100));
    }
    info!("Shutting down...");
    true
}
