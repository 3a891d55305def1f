//! modpanel CLI
//!
//! Command-line interface for a device running the modpanel server.

use anyhow::Result;
use clap::Parser;
use modpanelctl::cli::{
    generate_completion, handle_about, handle_config, handle_device, handle_health, handle_mode,
    Cli, Commands,
};
use modpanelctl::client::ModPanelClient;
use modpanelctl::config::CliConfig;
use modpanelctl::format::OutputFormat;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Completion needs neither config nor server
    if let Commands::Completion { shell } = cli.command {
        generate_completion(shell);
        return Ok(());
    }

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => CliConfig::default_path()?,
    };

    // Priority chain: CLI args → env → file → defaults
    let mut builder = CliConfig::builder();

    if let Some(ref server) = cli.server {
        builder = builder.with_server_url(server)?;
    }
    if let Some(format) = cli.format {
        let format_str = match format {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        };
        builder = builder.with_output_format(format_str)?;
    }
    if let Some(verbose) = cli.verbose {
        builder = builder.with_verbose(verbose);
    }

    builder = builder.with_env_overrides();

    if !cli.no_config {
        builder = builder.with_config_file(&config_path);
    }

    let config = match builder.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            if cli.verbose.unwrap_or(false) {
                eprintln!("Error details: {:?}", e);
            }
            std::process::exit(1);
        }
    };

    let output_format = OutputFormat::from_config(&config.output_format);
    let verbose = config.verbose;

    if verbose {
        eprintln!("Verbose mode enabled");
        eprintln!("Server URL: {}", config.server_url);
        eprintln!("Output format: {:?}", output_format);
    }

    let client = ModPanelClient::with_config(
        config.server_url.clone(),
        config.timeout,
        3,
        Duration::from_millis(500),
    )?;

    let result = match cli.command {
        Commands::Device => handle_device(&client, output_format).await,
        Commands::Mode { command } => handle_mode(&client, command, output_format).await,
        Commands::About => handle_about(&client, output_format).await,
        Commands::Health => handle_health(&client, output_format).await,
        Commands::Config { command } => {
            handle_config(command, &config, &config_path, output_format)
        }
        Commands::Completion { .. } => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if verbose {
            eprintln!("Error details: {:?}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}
