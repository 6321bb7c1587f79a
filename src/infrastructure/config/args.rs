use super::app_config::LogLevel;
use crate::domain::entities::FilterKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "peekaboo",
    version,
    about = "Resize, orient and filter images; browse image directories",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Directory processed images are saved to.
    #[arg(long, value_name = "DIR", global = true)]
    pub output_dir: Option<PathBuf>,

    /// Share of process memory for the raster cache.
    #[arg(long, global = true)]
    pub cache_fraction: Option<f64>,

    /// Maximum decodes running at once.
    #[arg(long, global = true)]
    pub max_concurrent_decodes: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

/// Work to perform.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resize a single image.
    Resize {
        /// Source image.
        path: PathBuf,

        #[command(flatten)]
        resize: ResizeArgs,

        /// Output file; defaults to a new file in the output directory.
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Pick the newest images from a directory and resize them.
    Pick {
        /// Directory to pick from.
        dir: PathBuf,

        /// Maximum number of images; 0 means unlimited.
        #[arg(long, default_value_t = 1)]
        max: usize,

        #[command(flatten)]
        resize: ResizeArgs,
    },
    /// List a page of images in a directory.
    Gallery {
        /// Directory to list.
        dir: PathBuf,

        /// Page number.
        #[arg(long, default_value_t = 0)]
        page: usize,

        /// Entries per page.
        #[arg(long)]
        page_size: Option<usize>,
    },
}

/// Per-request overrides of the configured resize defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct ResizeArgs {
    /// Bounding box width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Bounding box height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Colour filter: default, grayscale, sepia or invert.
    #[arg(long)]
    pub filter: Option<FilterKind>,

    /// JPEG quality in [0, 1].
    #[arg(long)]
    pub quality: Option<f64>,

    /// Sources at or below this many bytes are not downsampled.
    #[arg(long)]
    pub threshold: Option<u64>,
}
