/// Host configuration, parsed from the command line.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Smallest playfield edge that still fits the player and a sweeping enemy.
const MIN_DIMENSION: f64 = 100.0;

#[derive(Parser, Debug, Clone)]
#[command(name = "sweep_shooter")]
#[command(about = "Terminal arcade shooter: hold the line against sweeping enemies")]
pub struct Config {
    /// Playfield width in simulation units
    #[arg(long, default_value_t = 600.0, value_parser = parse_dimension)]
    pub width: f64,

    /// Playfield height in simulation units
    #[arg(long, default_value_t = 800.0, value_parser = parse_dimension)]
    pub height: f64,

    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(10..=240))]
    pub fps: u32,

    /// Fixed RNG seed; omit for a different game every run
    #[arg(long)]
    pub seed: Option<u64>,

    /// File that receives the game log
    #[arg(long, default_value = "sweep_shooter.log")]
    pub log_file: PathBuf,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn parse_dimension(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{s:?} is not a number: {e}"))?;
    if !value.is_finite() || value < MIN_DIMENSION {
        return Err(format!("must be a finite number >= {MIN_DIMENSION}"));
    }
    Ok(value)
}

impl Config {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps))
    }
}
