//! Utility functions for path resolution, ANSI stripping, and time formatting.
use std::fs;
use std::path::PathBuf;

/// Strip ANSI escape sequences from a string.
///
/// Handles SGR sequences (ending in `m`) and other CSI sequences (ending
/// in any letter in the `@`..`~` range), so cursor movement, erase, etc.
/// are also stripped without consuming unrelated text.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if let Some(next) = chars.next()
                && next == '['
            {
                for inner in chars.by_ref() {
                    if ('@'..='~').contains(&inner) {
                        break;
                    }
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Resolve the cache root from `$XDG_CACHE_HOME`, falling back to `$HOME/.cache`.
fn cache_root(xdg_cache_home: Option<String>, home: Option<String>) -> PathBuf {
    xdg_cache_home.filter(|v| !v.is_empty()).map_or_else(
        || {
            home.map_or_else(|| PathBuf::from("."), PathBuf::from)
                .join(".cache")
        },
        PathBuf::from,
    )
}

/// Return the `$XDG_CACHE_HOME/no/` directory, creating it if needed.
pub(super) fn no_cache_dir() -> Option<PathBuf> {
    let dir = cache_root(
        std::env::var("XDG_CACHE_HOME").ok(),
        std::env::var("HOME").ok(),
    )
    .join("no");
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Return the log file path under `$XDG_CACHE_HOME/no/` (or `~/.cache/no/`).
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    Some(no_cache_dir()?.join(format!("{command}.log")))
}

/// Format the current local time as `YYYY-MM-DD HH:MM:SS`.
pub(super) fn format_local_datetime() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format the current local time as `HH:MM:SS`.
pub(super) fn format_local_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
