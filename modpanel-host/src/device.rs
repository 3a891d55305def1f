//! Device information collection
//!
//! Each fact is resolved in order from a live query, then the configured
//! override, then the [`NOT_AVAILABLE`] placeholder.

use crate::command::{CommandRunner, Privilege};
use crate::props::PropertyReader;
use modpanel_core::{DeviceInfo, DeviceOverrides, NOT_AVAILABLE};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Kernel memory summary read when `free` is unavailable.
pub const MEMINFO_PATH: &str = "/proc/meminfo";

const RAM_PIPELINE: &str = "free | grep Mem | awk '{print $2}'";

/// System properties backing each overridable field.
const PROP_MODEL: &str = "ro.product.model";
const PROP_BOARD: &str = "ro.product.board";
const PROP_BRAND: &str = "ro.product.manufacturer";
const PROP_ANDROID: &str = "ro.build.version.release";
const PROP_CPU: &str = "ro.hardware";

/// Gathers [`DeviceInfo`] from the host.
#[derive(Debug, Clone)]
pub struct DeviceInfoCollector {
    runner: Arc<CommandRunner>,
    props: PropertyReader,
    overrides: DeviceOverrides,
    meminfo_path: PathBuf,
}

impl DeviceInfoCollector {
    pub fn new(runner: Arc<CommandRunner>, overrides: DeviceOverrides) -> Self {
        Self {
            props: PropertyReader::new(runner.clone()),
            runner,
            overrides,
            meminfo_path: PathBuf::from(MEMINFO_PATH),
        }
    }

    /// Read memory totals from `path` instead of `/proc/meminfo`.
    pub fn with_meminfo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.meminfo_path = path.into();
        self
    }

    /// Collect every device fact. Never fails.
    pub async fn collect(&self) -> DeviceInfo {
        let model = self.property_or(PROP_MODEL, &self.overrides.model).await;
        let board = self.property_or(PROP_BOARD, &self.overrides.board).await;
        let brand = self.property_or(PROP_BRAND, &self.overrides.brand).await;
        let android = self.property_or(PROP_ANDROID, &self.overrides.android).await;
        let kernel = or_placeholder(self.kernel_release().await);
        let cpu = self.property_or(PROP_CPU, &self.overrides.cpu).await;
        let ram = or_placeholder(self.total_ram_kb().await.map(|kb| format!("{} kB", kb)));

        DeviceInfo {
            model,
            board,
            brand,
            android,
            kernel,
            cpu,
            ram,
        }
    }

    async fn property_or(&self, name: &str, fallback: &Option<String>) -> String {
        or_placeholder(self.props.get(name).await.or_else(|| fallback.clone()))
    }

    /// `uname -r`, never elevated.
    async fn kernel_release(&self) -> Option<String> {
        self.runner.run("uname -r", Privilege::Plain).await.output()
    }

    /// Total memory in kB: `free` first, then the meminfo file.
    async fn total_ram_kb(&self) -> Option<String> {
        if let Some(kb) = self.runner.run(RAM_PIPELINE, Privilege::Plain).await.output() {
            return Some(kb);
        }
        debug!("free unavailable, reading {}", self.meminfo_path.display());
        read_meminfo_total(&self.meminfo_path).await
    }
}

fn or_placeholder(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

async fn read_meminfo_total(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => parse_meminfo_total(&content),
        Err(e) => {
            debug!("cannot read {}: {}", path.display(), e);
            None
        }
    }
}

/// Numeric token of the `MemTotal:` line, e.g. `"3891232"`.
pub fn parse_meminfo_total(content: &str) -> Option<String> {
    content
        .lines()
        .find(|line| line.starts_with("MemTotal:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .map(str::to_string)
}
