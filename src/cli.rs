use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "Preview Android vector drawables as raster icons.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Prints the SVG document generated from a vector drawable.
    Svg(SvgArgs),

    /// Renders icons to PNG files.
    Render(RenderArgs),
}

#[derive(Args)]
pub struct SvgArgs {
    /// The vector drawable to convert.
    pub path: PathBuf,
}

#[derive(Args, Clone)]
pub struct RenderArgs {
    /// Files or directories to render. Directories are searched recursively.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Render at native size instead of as a 24x24 thumbnail.
    #[arg(long)]
    pub original: bool,

    /// Where the PNG files are written.
    /// Overrides `output_path` from vdpreview.toml.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Where intermediate SVG files are created.
    /// Overrides `temp_dir` from vdpreview.toml.
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,
}
