//! Log file location, timestamps and colour stripping for the file layer.
use std::ffi::OsString;
use std::path::PathBuf;

/// Timestamp format of the run header.
pub(super) const DATETIME: &str = "%Y-%m-%d %H:%M:%S";
/// Timestamp format of each log line.
pub(super) const TIME: &str = "%H:%M:%S";

/// Remove SGR colour sequences (`ESC [ ... m`) as written by the console
/// formatter.  An unterminated sequence swallows the rest of the string.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some((before, after)) = rest.split_once("\x1b[") {
        out.push_str(before);
        rest = after.split_once('m').map_or("", |(_, tail)| tail);
    }
    out.push_str(rest);
    out
}

fn non_empty_var(name: &str) -> Option<OsString> {
    std::env::var_os(name).filter(|v| !v.is_empty())
}

/// `$XDG_CACHE_HOME`, else `$HOME/.cache` (`%USERPROFILE%` on Windows).
fn cache_root() -> PathBuf {
    non_empty_var("XDG_CACHE_HOME").map_or_else(
        || {
            non_empty_var("HOME")
                .or_else(|| non_empty_var("USERPROFILE"))
                .map_or_else(|| PathBuf::from("."), PathBuf::from)
                .join(".cache")
        },
        PathBuf::from,
    )
}

/// `<cache>/linker/<command>.log`, creating the directory.
///
/// `None` if the directory cannot be created; the caller then runs without a
/// log file.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let dir = cache_root().join("linker");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC time rendered with a `chrono` format string.
pub(super) fn utc_now(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}
