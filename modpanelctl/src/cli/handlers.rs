//! Command execution handlers

use anyhow::{Context, Result};
use std::path::Path;

use crate::client::ModPanelClient;
use crate::config::CliConfig;
use crate::format::{self, format_success, OutputFormat};

use super::commands::*;

/// Handle device command
pub async fn handle_device(client: &ModPanelClient, format: OutputFormat) -> Result<()> {
    let device = client.get_device().await?;
    println!("{}", format::format_device(&device, format)?);
    Ok(())
}

/// Handle mode commands
pub async fn handle_mode(
    client: &ModPanelClient,
    command: ModeCommands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        ModeCommands::Get => {
            let mode = client.get_mode().await?;
            println!("{}", format::format_mode(&mode, format)?);
        }
        ModeCommands::Set { mode } => {
            let update = client.set_mode(&mode).await?;
            println!("{}", format::format_mode_updated(&update, format)?);
        }
    }

    Ok(())
}

/// Handle about command
pub async fn handle_about(client: &ModPanelClient, format: OutputFormat) -> Result<()> {
    let about = client.get_about().await?;
    println!("{}", format::format_about(&about, format)?);
    Ok(())
}

/// Handle health command
///
/// An unreachable server is reported, not treated as an error.
pub async fn handle_health(client: &ModPanelClient, format: OutputFormat) -> Result<()> {
    let reachable = client.ping().await?;
    let health = if reachable {
        Some(client.health().await?)
    } else {
        None
    };

    println!("{}", format::format_health(reachable, health.as_ref(), format)?);
    Ok(())
}

/// Handle config commands
pub fn handle_config(
    command: ConfigCommands,
    config: &CliConfig,
    config_path: &Path,
    format: OutputFormat,
) -> Result<()> {
    match command {
        ConfigCommands::Show => match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
            OutputFormat::Table => {
                println!("Server URL: {}", config.server_url);
                println!("Output format: {}", config.output_format);
                println!("Verbose: {}", config.verbose);
                println!("Timeout: {}s", config.timeout);
                println!("Config file: {}", config_path.display());
            }
        },
        ConfigCommands::Path => println!("{}", config_path.display()),
        ConfigCommands::Init { force } => {
            if config_path.exists() && !force {
                return Err(anyhow::anyhow!(
                    "Config file {} already exists (use --force to overwrite)",
                    config_path.display()
                ));
            }
            config
                .save_to(config_path)
                .with_context(|| format!("Cannot write {}", config_path.display()))?;
            println!(
                "{}",
                format_success(&format!("Wrote {}", config_path.display()))
            );
        }
    }

    Ok(())
}

/// Generate shell completion script
pub fn generate_completion(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
