//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Skiff static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: skiff.toml)
    #[arg(short = 'C', long, default_value = "skiff.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the site for production
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Build the site, then serve it with the newsletter endpoint
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(short, long)]
    pub clean: bool,

    /// Enable RSS feed generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub rss: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from(["skiff", "build", "--clean"]);
        match cli.command {
            Commands::Build { build_args } => assert!(build_args.clean),
            Commands::Serve { .. } => panic!("expected build"),
        }
    }

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::parse_from(["skiff", "serve", "-p", "3000"]);
        match cli.command {
            Commands::Serve { port, .. } => assert_eq!(port, Some(3000)),
            Commands::Build { .. } => panic!("expected serve"),
        }
    }

    #[test]
    fn test_rss_flag_forms() {
        let on = Cli::parse_from(["skiff", "build", "--rss"]);
        let off = Cli::parse_from(["skiff", "build", "--rss", "false"]);
        let (Commands::Build { build_args: on }, Commands::Build { build_args: off }) =
            (on.command, off.command)
        else {
            panic!("expected build");
        };
        assert_eq!(on.rss, Some(true));
        assert_eq!(off.rss, Some(false));
    }
}
