//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Inspect document trees and look up translations
#[derive(Parser, Debug)]
#[command(name = "doctree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Directory searched for a local .doctree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a JSON document as a tree
    Tree {
        /// Document file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show the node at a path: JSON snapshot, depth and siblings
    Node {
        /// Document file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Child indices from the document root
        path: Vec<usize>,
    },

    /// Translate a source text
    Translate {
        /// Source text, optionally ending in " [context: ...]"
        key: String,
        /// Language (default: configured default_language)
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print a config template
    Template,

    /// Show config paths
    Path,
}
