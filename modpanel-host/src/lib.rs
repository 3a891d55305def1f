//! modpanel-host
//!
//! Host access layer: everything that touches the operating system lives
//! here so the server only deals in typed values.
//!
//! Public API:
//! - `command::CommandRunner` - runs shell commands, `su -c` first, then `sh -c`
//! - `props::PropertyReader` - Android system properties via `getprop`
//! - `device::DeviceInfoCollector` - assembles `DeviceInfo` with fallbacks
//! - `mode_store::ConfigModeStore` - reads and rewrites the `mode=` entry

pub mod command;
pub mod device;
pub mod mode_store;
pub mod props;

#[cfg(test)]
mod test_support;

pub use command::{
    shell_quote, AttemptError, CommandResult, CommandRunner, InvocationStrategy, Privilege,
    ShellStrategy,
};
pub use device::DeviceInfoCollector;
pub use mode_store::ConfigModeStore;
pub use props::PropertyReader;
