use clap::Parser;
use cli::{Cli, Commands};
use commands::{render::render, svg::svg};
use indicatif::MultiProgress;
use log::LevelFilter;

mod cli;
mod commands;
mod config;
mod progress_bar;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut binding = env_logger::Builder::new();
    let logger = binding
        .filter_level(LevelFilter::Info)
        .filter_module("vdpreview", args.verbose.log_level_filter())
        .format_timestamp(None)
        .format_module_path(false)
        .build();

    let level = logger.filter();

    let multi_progress = MultiProgress::new();
    indicatif_log_bridge::LogWrapper::new(multi_progress.clone(), logger).try_init()?;

    log::set_max_level(level);

    match args.command {
        Commands::Svg(args) => svg(args).await,
        Commands::Render(args) => render(args, multi_progress).await,
    }
}
