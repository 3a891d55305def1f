//! Path resolution for the module configuration file

use std::path::{Path, PathBuf};

/// File name of the per-module configuration file.
pub const CONFIG_FILE_NAME: &str = "config.conf";

/// Returns the directory Magisk-style module managers install modules into.
pub fn default_module_root() -> PathBuf {
    PathBuf::from("/data/adb/modules")
}

/// Returns `<module_root>/<module_name>/config.conf`.
pub fn config_path_for(module_root: &Path, module_name: &str) -> PathBuf {
    module_root.join(module_name).join(CONFIG_FILE_NAME)
}
