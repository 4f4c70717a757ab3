use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prism_renderer::{tonemap::DEFAULT_GAMMA, Aov, ToneMap};
use std::path::PathBuf;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ToneMapArg {
    Clamp,
    Reinhard,
    Aces,
    Uncharted2,
}

impl From<ToneMapArg> for ToneMap {
    fn from(arg: ToneMapArg) -> Self {
        match arg {
            ToneMapArg::Clamp => ToneMap::Clamp,
            ToneMapArg::Reinhard => ToneMap::Reinhard,
            ToneMapArg::Aces => ToneMap::Aces,
            ToneMapArg::Uncharted2 => ToneMap::Uncharted2,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AovArg {
    Beauty,
    Depth,
    Normal,
    Albedo,
    Light,
}

impl From<AovArg> for Aov {
    fn from(arg: AovArg) -> Self {
        match arg {
            AovArg::Beauty => Aov::Beauty,
            AovArg::Depth => Aov::Depth,
            AovArg::Normal => Aov::Normal,
            AovArg::Albedo => Aov::Albedo,
            AovArg::Light => Aov::Light,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(version, about = "A Whitted-style ray tracer")]
pub struct Args {
    /// JSON scene file (renders the built-in demo room when omitted)
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Output image; the format follows the extension (.png, .ppm, .bmp...)
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Override the camera's image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Override the camera's image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Override the anti-aliasing sample count per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Override the maximum reflection/refraction depth
    #[arg(long)]
    pub max_recursion: Option<u32>,

    #[arg(long, value_enum, default_value_t = ToneMapArg::Clamp)]
    pub tonemap: ToneMapArg,

    /// Display gamma applied after tone mapping
    #[arg(long, default_value_t = DEFAULT_GAMMA)]
    pub gamma: f64,

    /// Which pass to write
    #[arg(long, value_enum, default_value_t = AovArg::Beauty)]
    pub aov: AovArg,

    /// Seed for anti-aliasing jitter
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}
