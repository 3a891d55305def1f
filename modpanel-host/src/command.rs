//! Shell command execution with privilege fallback
//!
//! A [`CommandRunner`] holds an ordered list of [`InvocationStrategy`]
//! values (by default `su -c` followed by `sh -c`) and tries them in turn
//! until one exits with status 0.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Error text reported when every strategy failed.
pub const COMMAND_FAILED: &str = "Command failed";

/// Outcome of a shell invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Standard output, whitespace-trimmed
    pub stdout: String,
    /// Standard error, trimmed; `None` when empty
    pub stderr: Option<String>,
    pub exit_code: i32,
}

impl CommandResult {
    /// The result reported once all strategies are exhausted.
    pub fn failed() -> Self {
        Self {
            stdout: String::new(),
            stderr: Some(COMMAND_FAILED.to_string()),
            exit_code: 1,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout of a successful invocation, or `None` if it failed or printed nothing.
    pub fn output(&self) -> Option<String> {
        (self.is_success() && !self.stdout.is_empty()).then(|| self.stdout.clone())
    }
}

/// Reasons a single attempt did not produce a result.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("{program} not found")]
    NotFound { program: String },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
}

/// Whether a command may be run with elevated privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    /// Try elevated strategies first, then fall back to plain ones
    Elevated,
    /// Only use strategies that do not elevate
    Plain,
}

/// One way of invoking a shell command.
///
/// Implementations return `Ok` for any invocation that ran to completion,
/// whatever its exit status; the runner decides whether to accept it.
#[async_trait]
pub trait InvocationStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Whether this strategy runs the command with superuser rights.
    fn is_elevated(&self) -> bool;

    /// Run `command`, killing the process if it exceeds `limit`.
    async fn attempt(
        &self,
        command: &str,
        limit: Duration,
    ) -> Result<CommandResult, AttemptError>;
}

/// Runs a command string through a shell-like program: `<program> <args..> <command>`.
#[derive(Debug, Clone)]
pub struct ShellStrategy {
    program: String,
    args: Vec<String>,
    elevated: bool,
}

impl ShellStrategy {
    pub fn new(program: impl Into<String>, args: &[&str], elevated: bool) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            elevated,
        }
    }

    /// `su -c <command>`
    pub fn su() -> Self {
        Self::new("su", &["-c"], true)
    }

    /// `sh -c <command>`
    pub fn sh() -> Self {
        Self::new("sh", &["-c"], false)
    }
}

#[async_trait]
impl InvocationStrategy for ShellStrategy {
    fn name(&self) -> &str {
        &self.program
    }

    fn is_elevated(&self) -> bool {
        self.elevated
    }

    async fn attempt(
        &self,
        command: &str,
        limit: Duration,
    ) -> Result<CommandResult, AttemptError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Dropping the output future on timeout drops the child, which kills it.
        let output = match timeout(limit, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(AttemptError::NotFound {
                    program: self.program.clone(),
                })
            }
            Ok(Err(e)) => {
                return Err(AttemptError::Spawn {
                    program: self.program.clone(),
                    source: e,
                })
            }
            Err(_) => {
                return Err(AttemptError::TimedOut {
                    program: self.program.clone(),
                    timeout: limit,
                })
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        Ok(CommandResult {
            stdout,
            stderr: (!stderr.is_empty()).then_some(stderr),
            // Killed by a signal: no exit code
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}

/// Executes shell commands, falling back across strategies.
pub struct CommandRunner {
    strategies: Vec<Box<dyn InvocationStrategy>>,
    timeout: Duration,
}

impl CommandRunner {
    /// Runner with the standard `su -c` then `sh -c` strategies.
    pub fn new(timeout: Duration) -> Self {
        Self::with_strategies(
            vec![Box::new(ShellStrategy::su()), Box::new(ShellStrategy::sh())],
            timeout,
        )
    }

    /// Runner with a custom, ordered strategy list.
    pub fn with_strategies(strategies: Vec<Box<dyn InvocationStrategy>>, timeout: Duration) -> Self {
        Self {
            strategies,
            timeout,
        }
    }

    /// Run `command`, returning the first zero-exit result.
    ///
    /// Never fails: when no strategy succeeds the result is
    /// [`CommandResult::failed`]. Individual attempt failures are only logged.
    pub async fn run(&self, command: &str, privilege: Privilege) -> CommandResult {
        let candidates = self
            .strategies
            .iter()
            .filter(|s| privilege == Privilege::Elevated || !s.is_elevated());

        for strategy in candidates {
            match strategy.attempt(command, self.timeout).await {
                Ok(result) if result.is_success() => {
                    debug!("`{}` succeeded via {}", command, strategy.name());
                    return result;
                }
                Ok(result) => {
                    debug!(
                        "`{}` via {} exited with code {}{}",
                        command,
                        strategy.name(),
                        result.exit_code,
                        result
                            .stderr
                            .as_ref()
                            .map(|e| format!(": {}", e))
                            .unwrap_or_default()
                    );
                }
                Err(e) => {
                    debug!("`{}` attempt failed: {}", command, e);
                }
            }
        }

        debug!("`{}` failed with every strategy", command);
        CommandResult::failed()
    }
}

impl std::fmt::Debug for CommandRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRunner")
            .field(
                "strategies",
                &self.strategies.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Quote `value` as a single POSIX shell word.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    /// Strategy that returns a canned outcome and counts calls.
    struct Scripted {
        name: &'static str,
        elevated: bool,
        outcome: fn() -> Result<CommandResult, AttemptError>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl InvocationStrategy for Scripted {
        fn name(&self) -> &str {
            self.name
        }

        fn is_elevated(&self) -> bool {
            self.elevated
        }

        async fn attempt(&self, _: &str, _: Duration) -> Result<CommandResult, AttemptError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    fn ok(stdout: &str) -> CommandResult {
        CommandResult {
            stdout: stdout.to_string(),
            stderr: None,
            exit_code: 0,
        }
    }

    fn plain_sh() -> CommandRunner {
        CommandRunner::with_strategies(vec![Box::new(ShellStrategy::sh())], Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_elevated_success_short_circuits() {
        let su_calls = Arc::new(AtomicUsize::new(0));
        let sh_calls = Arc::new(AtomicUsize::new(0));
        let runner = CommandRunner::with_strategies(
            vec![
                Box::new(Scripted {
                    name: "su",
                    elevated: true,
                    outcome: || Ok(ok("root")),
                    calls: su_calls.clone(),
                }),
                Box::new(Scripted {
                    name: "sh",
                    elevated: false,
                    outcome: || Ok(ok("user")),
                    calls: sh_calls.clone(),
                }),
            ],
            Duration::from_secs(1),
        );

        let result = runner.run("id -un", Privilege::Elevated).await;
        assert_eq!(result.stdout, "root");
        assert_eq!(su_calls.load(Ordering::SeqCst), 1);
        assert_eq!(sh_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_back_when_elevated_missing() {
        let sh_calls = Arc::new(AtomicUsize::new(0));
        let runner = CommandRunner::with_strategies(
            vec![
                Box::new(Scripted {
                    name: "su",
                    elevated: true,
                    outcome: || {
                        Err(AttemptError::NotFound {
                            program: "su".to_string(),
                        })
                    },
                    calls: Arc::new(AtomicUsize::new(0)),
                }),
                Box::new(Scripted {
                    name: "sh",
                    elevated: false,
                    outcome: || Ok(ok("user")),
                    calls: sh_calls.clone(),
                }),
            ],
            Duration::from_secs(1),
        );

        let result = runner.run("id -un", Privilege::Elevated).await;
        assert_eq!(result, ok("user"));
        assert_eq!(sh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_plain_privilege_skips_elevated() {
        let su_calls = Arc::new(AtomicUsize::new(0));
        let runner = CommandRunner::with_strategies(
            vec![
                Box::new(Scripted {
                    name: "su",
                    elevated: true,
                    outcome: || Ok(ok("root")),
                    calls: su_calls.clone(),
                }),
                Box::new(Scripted {
                    name: "sh",
                    elevated: false,
                    outcome: || Ok(ok("user")),
                    calls: Arc::new(AtomicUsize::new(0)),
                }),
            ],
            Duration::from_secs(1),
        );

        let result = runner.run("uname -r", Privilege::Plain).await;
        assert_eq!(result.stdout, "user");
        assert_eq!(su_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_exhausted_strategies_report_generic_failure() {
        let runner = CommandRunner::with_strategies(
            vec![
                Box::new(Scripted {
                    name: "su",
                    elevated: true,
                    outcome: || {
                        Ok(CommandResult {
                            stdout: String::new(),
                            stderr: Some("permission denied".to_string()),
                            exit_code: 13,
                        })
                    },
                    calls: Arc::new(AtomicUsize::new(0)),
                }),
                Box::new(Scripted {
                    name: "sh",
                    elevated: false,
                    outcome: || {
                        Err(AttemptError::TimedOut {
                            program: "sh".to_string(),
                            timeout: Duration::from_secs(5),
                        })
                    },
                    calls: Arc::new(AtomicUsize::new(0)),
                }),
            ],
            Duration::from_secs(1),
        );

        let result = runner.run("cat /secret", Privilege::Elevated).await;
        assert_eq!(result, CommandResult::failed());
        assert_eq!(result.stderr.as_deref(), Some(COMMAND_FAILED));
        assert_eq!(result.exit_code, 1);
        assert!(result.output().is_none());
    }

    #[tokio::test]
    async fn test_sh_output_is_trimmed() {
        let result = plain_sh().run("printf '  hello\\n\\n'", Privilege::Plain).await;
        assert!(result.is_success());
        assert_eq!(result.stdout, "hello");
        assert_eq!(result.stderr, None);
    }

    #[tokio::test]
    async fn test_sh_non_zero_exit_is_failure() {
        let result = plain_sh().run("echo oops >&2; exit 3", Privilege::Plain).await;
        assert_eq!(result, CommandResult::failed());
    }

    #[tokio::test]
    async fn test_missing_program_is_not_found() {
        let strategy = ShellStrategy::new("/nonexistent/modpanel-shell", &["-c"], false);
        let err = strategy
            .attempt("true", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AttemptError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_timeout_kills_slow_command() {
        let runner = CommandRunner::with_strategies(
            vec![Box::new(ShellStrategy::sh())],
            Duration::from_millis(200),
        );

        let start = Instant::now();
        let result = runner.run("sleep 10", Privilege::Plain).await;
        assert_eq!(result, CommandResult::failed());
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("plain"), "'plain'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote("a b\nc"), "'a b\nc'");
    }
}
