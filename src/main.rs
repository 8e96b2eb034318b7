//! Skiff - a static site generator for a personal portfolio/blog.

mod catalog;
mod cli;
mod config;
mod feed;
mod logger;
mod newsletter;
mod render;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{BuildArgs, Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let mut config = SiteConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Build { build_args } => {
            apply_build_args(&mut config, build_args)?;
            cli::build::build_site(&config, build_args.clean).map(|_| ())
        }
        Commands::Serve {
            build_args,
            interface,
            port,
        } => {
            apply_build_args(&mut config, build_args)?;
            if let Some(interface) = interface {
                config.serve.interface = *interface;
            }
            if let Some(port) = port {
                config.serve.port = *port;
            }

            cli::build::build_site(&config, build_args.clean)?;
            cli::serve::run(&config)
        }
    }
}

/// Apply CLI overrides, then validate the merged configuration.
fn apply_build_args(config: &mut SiteConfig, args: &BuildArgs) -> Result<()> {
    logger::set_verbose(args.verbose);
    if let Some(rss) = args.rss {
        config.build.feed.enable = rss;
    }
    config.validate()?;
    Ok(())
}
