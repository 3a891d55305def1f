//! Android system property lookup via `getprop`

use crate::command::{shell_quote, CommandRunner, Privilege};
use std::sync::Arc;
use tracing::debug;

/// Binary used to query system properties.
pub const GETPROP: &str = "getprop";

/// Reads system properties by shelling out to `getprop`.
#[derive(Debug, Clone)]
pub struct PropertyReader {
    runner: Arc<CommandRunner>,
}

impl PropertyReader {
    pub fn new(runner: Arc<CommandRunner>) -> Self {
        Self { runner }
    }

    /// Check whether `name` resolves on the shell's `PATH`.
    pub async fn binary_available(&self, name: &str) -> bool {
        let result = self
            .runner
            .run(&format!("which {}", shell_quote(name)), Privilege::Elevated)
            .await;
        result.output().is_some()
    }

    /// Value of property `name`, or `None` if it is unset or cannot be read.
    ///
    /// The `getprop` binary is looked up on every call.
    pub async fn get(&self, name: &str) -> Option<String> {
        if !self.binary_available(GETPROP).await {
            debug!("{} not available, skipping {}", GETPROP, name);
            return None;
        }

        let value = self
            .runner
            .run(
                &format!("{} {}", GETPROP, shell_quote(name)),
                Privilege::Elevated,
            )
            .await
            .output();
        debug!("property {} = {:?}", name, value);
        value
    }
}
