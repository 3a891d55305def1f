//! CLI command and subcommand definitions

use crate::format::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// modpanel Module Controller CLI
#[derive(Parser, Debug)]
#[command(name = "modpanelctl")]
#[command(version, about = "Module Controller CLI", long_about = None)]
pub struct Cli {
    /// Server URL (overrides config file and MODPANEL_SERVER)
    #[arg(short, long)]
    pub server: Option<String>,

    /// Output format (overrides config file and MODPANEL_FORMAT)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output (overrides config file)
    #[arg(short, long)]
    pub verbose: Option<bool>,

    /// Don't load config file
    #[arg(long)]
    pub no_config: bool,

    /// Config file path (default: <config dir>/modpanel/cli.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show device information
    Device,

    /// Show or change the module mode
    Mode {
        #[command(subcommand)]
        command: ModeCommands,
    },

    /// Show module and developer information
    About,

    /// Check server connectivity and health
    Health,

    /// Show or manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ModeCommands {
    /// Show the current mode
    Get,

    /// Set the mode
    Set {
        /// New mode: otomatis or statis (case-insensitive)
        mode: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write the effective configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
