//! Fixtures for tests that run real shell commands against fake binaries

use crate::command::{CommandRunner, ShellStrategy};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Runner whose `sh` resolves binaries from `dir` before the system ones.
pub fn runner_with_path(dir: &TempDir) -> Arc<CommandRunner> {
    let script = format!(
        "PATH={}:/usr/bin:/bin; export PATH; eval \"$1\"",
        dir.path().display()
    );
    Arc::new(CommandRunner::with_strategies(
        vec![Box::new(ShellStrategy::new(
            "sh",
            &["-c", script.as_str(), "sh"],
            false,
        ))],
        Duration::from_secs(5),
    ))
}

/// Write an executable shell script named `name` into `dir`.
pub fn install_fake_binary(dir: &TempDir, name: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
}
