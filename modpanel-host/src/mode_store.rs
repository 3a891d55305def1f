//! Read and write the `mode=` entry of the module's `config.conf`
//!
//! All file access goes through the [`CommandRunner`] so that privilege
//! escalation is attempted transparently for protected module paths.
//! Read-modify-write is not locked: concurrent writers race and the last
//! write wins.

use crate::command::{shell_quote, CommandRunner, Privilege};
use modpanel_core::{apply_mode, parse_mode, Mode, ModPanelError, ModeStatus, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Persists the module mode in a line-oriented config file.
#[derive(Debug, Clone)]
pub struct ConfigModeStore {
    runner: Arc<CommandRunner>,
    path: PathBuf,
}

impl ConfigModeStore {
    pub fn new(runner: Arc<CommandRunner>, path: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current file content, or `None` if unreadable or empty.
    ///
    /// The runner trims output, so a leading indent on the first line and
    /// trailing blank lines do not survive a rewrite.
    async fn read_content(&self) -> Option<String> {
        let command = format!("cat {}", shell_quote(&self.path.to_string_lossy()));
        let content = self.runner.run(&command, Privilege::Elevated).await.output();
        if content.is_none() {
            debug!("config file {} unreadable or empty", self.path.display());
        }
        content
    }

    /// Raw value of the first `mode=` line, not validated.
    pub async fn read_mode(&self) -> Option<String> {
        self.read_content().await.and_then(|c| parse_mode(&c))
    }

    /// Current mode classified into a [`ModeStatus`].
    pub async fn status(&self) -> ModeStatus {
        ModeStatus::from_raw(self.read_mode().await.as_deref())
    }

    /// Set the mode from its exact literal (`otomatis` or `statis`).
    ///
    /// # Errors
    ///
    /// - [`ModPanelError::InvalidMode`] if `candidate` is not a recognised literal
    /// - [`ModPanelError::ConfigWrite`] if the file could not be written
    pub async fn write_mode(&self, candidate: &str) -> Result<Mode> {
        let mode: Mode = candidate.parse()?;
        self.write(mode).await?;
        Ok(mode)
    }

    /// Rewrite the config file with `mode`, preserving every other line.
    pub async fn write(&self, mode: Mode) -> Result<()> {
        let existing = self.read_content().await;
        let content = apply_mode(existing.as_deref(), mode);

        let command = format!(
            "printf '%s' {} > {}",
            shell_quote(&content),
            shell_quote(&self.path.to_string_lossy())
        );
        let result = self.runner.run(&command, Privilege::Elevated).await;

        if result.is_success() {
            info!("Mode set to {} in {}", mode, self.path.display());
            Ok(())
        } else {
            warn!("Failed to write mode to {}", self.path.display());
            Err(ModPanelError::ConfigWrite(self.path.display().to_string()))
        }
    }
}
