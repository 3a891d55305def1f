//! Output formatting utilities for the CLI
//!
//! Provides table and JSON formatting with colors.

use anyhow::Result;
use colored::*;
use modpanel_core::api::{
    AboutResponse, DeviceResponse, HealthResponse, ModeResponse, ModeUpdateResponse,
};
use modpanel_core::{ModeStatus, NOT_AVAILABLE};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty table output
    Table,
    /// JSON output
    Json,
}

impl OutputFormat {
    /// Parse a validated config value; anything but `json` is a table.
    pub fn from_config(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Format device information
pub fn format_device(device: &DeviceResponse, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(device),
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct DeviceRow {
                #[tabled(rename = "Property")]
                label: String,
                #[tabled(rename = "Value")]
                value: String,
            }

            let rows: Vec<DeviceRow> = device
                .info
                .entries()
                .iter()
                .map(|(label, value)| DeviceRow {
                    label: label.to_string(),
                    value: if *value == NOT_AVAILABLE {
                        value.dimmed().to_string()
                    } else {
                        value.cyan().to_string()
                    },
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", "Device Information:".bold(), table))
        }
    }
}

fn colored_mode(mode: ModeStatus) -> ColoredString {
    match mode {
        ModeStatus::Otomatis => mode.as_str().green(),
        ModeStatus::Statis => mode.as_str().cyan(),
        ModeStatus::Unknown => mode.as_str().yellow(),
    }
}

/// Format the current mode
pub fn format_mode(mode: &ModeResponse, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(mode),
        OutputFormat::Table => {
            let mut output = format!("Mode: {}", colored_mode(mode.mode).bold());
            output.push('\n');
            output.push_str(&format!("Config: {}", mode.config_path.dimmed()));
            if mode.mode == ModeStatus::Unknown {
                output.push('\n');
                output.push_str(
                    &"Config file is unreadable or holds no recognised mode"
                        .yellow()
                        .to_string(),
                );
            }
            Ok(output)
        }
    }
}

/// Format the result of a mode update
pub fn format_mode_updated(update: &ModeUpdateResponse, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(update),
        OutputFormat::Table => Ok(format_success(&format!(
            "Mode set to {}",
            update.mode.bold()
        ))),
    }
}

/// Format the about descriptor
pub fn format_about(about: &AboutResponse, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(about),
        OutputFormat::Table => {
            let mut output = String::new();
            output.push_str(&about.module.name.bold().to_string());
            output.push('\n');
            output.push_str(&about.module.description);
            output.push('\n');
            output.push_str(&format!("Config: {}", about.module.config_path.dimmed()));
            output.push_str("\n\n");
            output.push_str(&"Developer".bold().to_string());
            output.push('\n');
            output.push_str(&format!("Name: {}", about.developer.name.cyan()));
            output.push('\n');
            output.push_str(&format!("Contact: {}", about.developer.contact.cyan()));
            output.push('\n');
            output.push_str(&format!("Website: {}", about.developer.website.cyan()));
            Ok(output)
        }
    }
}

/// Format the health check, including whether the server was reachable
pub fn format_health(
    reachable: bool,
    health: Option<&HealthResponse>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "connected": reachable,
            "backend": health.map(|h| h.backend.as_str()),
        })),
        OutputFormat::Table => {
            let connected = if reachable {
                "Yes".green()
            } else {
                "No".red()
            };
            let mut output = format!("Connected: {}", connected);
            if let Some(health) = health {
                output.push('\n');
                output.push_str(&format!("Backend: {}", health.backend));
            }
            Ok(output)
        }
    }
}

/// Format a success message with a check mark
pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message)
}
