use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

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

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Progressive Whitted ray tracer for JSON scene files")]
pub struct Args {
    /// Scene files to render
    #[arg(short, long = "infile", required = true, num_args = 1..)]
    pub infiles: Vec<PathBuf>,

    /// Directory the PNG images are written to
    #[arg(short, long, default_value = "out")]
    pub outdir: PathBuf,

    /// Scale applied to every scene's resolution
    #[arg(short, long, default_value_t = 1.0)]
    pub factor: f32,

    /// Override the sample count given by each scene
    #[arg(short, long, allow_negative_numbers = true)]
    pub samples: Option<i32>,

    /// Number of render threads (all cores when omitted)
    #[arg(short, long)]
    pub threads: Option<usize>,

    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}

/// Output image path for scene file `infile`.
pub fn output_path(outdir: &std::path::Path, infile: &std::path::Path) -> PathBuf {
    let stem = infile
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("scene"));
    outdir.join(format!("{}.png", stem))
}
