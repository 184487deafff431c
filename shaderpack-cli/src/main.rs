mod cli;
mod config;

use anyhow::Context;
use clap::Parser;
use shaderpack::Packer;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "warn,shaderpack=debug"
    } else {
        "warn,shaderpack=info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let loaded = if cli.no_config {
        None
    } else if let Some(path) = &cli.config {
        Some(config::load_config(path)?)
    } else {
        config::find_config_from(&std::env::current_dir()?)?
    };
    if let Some(loaded) = &loaded {
        log::debug!("Using config {}", loaded.path.display());
    }

    let options = config::resolve_options(&cli, loaded.as_ref());
    log::debug!(
        "Packing {} -> {} (escape: {}, encoding: {})",
        options.input_dir.display(),
        options.output_dir.display(),
        options.escape.label(),
        options.encoding.label()
    );

    let input_dir = options.input_dir.clone();
    let report = Packer::new(options)
        .run()
        .with_context(|| format!("Failed to pack shaders from {}", input_dir.display()))?;

    if !report.skipped.is_empty() {
        log::warn!("{} shader file(s) skipped", report.skipped.len());
    }
    Ok(())
}
