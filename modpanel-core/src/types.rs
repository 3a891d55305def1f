//! Core types and data structures for modpanel

use crate::error::{ModPanelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder shown for any device fact that cannot be determined.
pub const NOT_AVAILABLE: &str = "Tidak tersedia";

/// Module operating mode, persisted as `mode=<value>` in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Configuration adapts to system conditions
    Otomatis,
    /// Fixed, user-defined configuration
    Statis,
}

impl Mode {
    /// Literal used in the config file and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Otomatis => "otomatis",
            Mode::Statis => "statis",
        }
    }

    /// Parse user input leniently: surrounding whitespace and case are ignored.
    ///
    /// `" OTOMATIS "` parses as [`Mode::Otomatis`]; anything that is not one
    /// of the two literals after normalisation is rejected.
    pub fn normalize(input: &str) -> Result<Self> {
        input.trim().to_lowercase().parse()
    }
}

impl FromStr for Mode {
    type Err = ModPanelError;

    /// Strict parse: only the exact lowercase literals are accepted.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "otomatis" => Ok(Mode::Otomatis),
            "statis" => Ok(Mode::Statis),
            other => Err(ModPanelError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode as reported by the read endpoint.
///
/// `Unknown` covers both an unreadable config file and a stored value that
/// is not one of the recognised modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeStatus {
    Otomatis,
    Statis,
    Unknown,
}

impl ModeStatus {
    /// Classify a raw value read from the config file.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::parse::<Mode>) {
            Some(Ok(mode)) => mode.into(),
            _ => ModeStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeStatus::Otomatis => "otomatis",
            ModeStatus::Statis => "statis",
            ModeStatus::Unknown => "unknown",
        }
    }
}

impl From<Mode> for ModeStatus {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Otomatis => ModeStatus::Otomatis,
            Mode::Statis => ModeStatus::Statis,
        }
    }
}

impl fmt::Display for ModeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hardware and software facts about the host device.
///
/// Every field is a display string; facts that could not be resolved hold
/// [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub model: String,
    pub board: String,
    pub brand: String,
    /// Android release version
    pub android: String,
    /// Kernel release (`uname -r`)
    pub kernel: String,
    /// Hardware/CPU identifier
    pub cpu: String,
    /// Total memory, e.g. `"3891232 kB"`
    pub ram: String,
}

impl DeviceInfo {
    /// A record where every fact is unavailable.
    pub fn unavailable() -> Self {
        Self {
            model: NOT_AVAILABLE.to_string(),
            board: NOT_AVAILABLE.to_string(),
            brand: NOT_AVAILABLE.to_string(),
            android: NOT_AVAILABLE.to_string(),
            kernel: NOT_AVAILABLE.to_string(),
            cpu: NOT_AVAILABLE.to_string(),
            ram: NOT_AVAILABLE.to_string(),
        }
    }

    /// Label/value pairs in display order.
    pub fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("Model", &self.model),
            ("Board", &self.board),
            ("Brand", &self.brand),
            ("Android", &self.android),
            ("Kernel", &self.kernel),
            ("CPU", &self.cpu),
            ("RAM", &self.ram),
        ]
    }

    /// Bullet-prefixed lines in the style of a module installer's `ui_print`.
    pub fn pretty_lines(&self) -> Vec<String> {
        self.entries()
            .iter()
            .map(|(label, value)| format!("• {:<11}: {}", label, value))
            .collect()
    }
}
