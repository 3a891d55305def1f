//! Line-level handling of the `mode=<value>` entry in `config.conf`
//!
//! The file is treated as opaque text: only lines whose trimmed form starts
//! with `mode=` are interpreted, everything else is carried through verbatim.

use crate::types::Mode;

/// Key of the only interpreted entry.
pub const MODE_KEY: &str = "mode";

fn is_mode_line(line: &str) -> bool {
    line.trim()
        .strip_prefix(MODE_KEY)
        .is_some_and(|rest| rest.starts_with('='))
}

/// Extract the raw mode value from file content.
///
/// Returns the text after the first `=` of the first `mode=` line, trimmed.
/// The value is not validated here; see [`crate::ModeStatus::from_raw`].
pub fn parse_mode(content: &str) -> Option<String> {
    content
        .lines()
        .find(|line| is_mode_line(line))
        .and_then(|line| line.split_once('='))
        .map(|(_, value)| value.trim().to_string())
}

/// Produce new file content with `mode` set.
///
/// `existing` is the current content, or `None` when the file could not be
/// read. The first `mode=` line is replaced in place and any later ones are
/// dropped; when no such line exists one is appended. The result always ends
/// with a newline.
pub fn apply_mode(existing: Option<&str>, mode: Mode) -> String {
    let mode_line = format!("{}={}", MODE_KEY, mode);

    let Some(existing) = existing.filter(|content| !content.is_empty()) else {
        return format!("{}\n", mode_line);
    };

    let mut replaced = false;
    let mut lines: Vec<&str> = Vec::new();
    for line in existing.lines() {
        if is_mode_line(line) {
            if !replaced {
                lines.push(&mode_line);
                replaced = true;
            }
        } else {
            lines.push(line);
        }
    }
    if !replaced {
        lines.push(&mode_line);
    }

    let mut content = lines.join("\n");
    content.push('\n');
    content
}
