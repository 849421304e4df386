//! `ExecStart=` command lines: executable lookup and systemd quoting.

use std::ffi::OsStr;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use sysgen_core::Environment;

/// Resolve `command` against the current `PATH`.
///
/// See [`resolve_command_in`].
pub fn resolve_command(command: &str) -> String {
    resolve_command_in(command, std::env::var_os("PATH").as_deref())
}

/// Resolve `command` against `search_path` and return it as an absolute path.
///
/// A command containing `/` is checked directly instead of searched for.
/// When nothing executable is found the raw token is returned and a warning
/// is logged: the binary may still exist on the host the units are installed
/// on.
pub fn resolve_command_in(command: &str, search_path: Option<&OsStr>) -> String {
    match lookup(command, search_path) {
        Some(found) => {
            let absolute = std::path::absolute(&found).unwrap_or(found);
            tracing::debug!(command, resolved = %absolute.display(), "resolved executable");
            absolute.display().to_string()
        }
        None => {
            tracing::warn!(
                command,
                "cannot resolve executable on PATH; using it verbatim (is the path correct?)"
            );
            command.to_owned()
        }
    }
}

fn lookup(command: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    if command.is_empty() {
        return None;
    }
    if command.contains('/') {
        let path = Path::new(command);
        return is_executable(path).then(|| path.to_path_buf());
    }
    std::env::split_paths(search_path?)
        .map(|dir| dir.join(command))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Build an `ExecStart=` value: the command followed by each argument quoted.
///
/// `$` is doubled on top of [`quote`] since systemd expands `$VAR` and
/// `${VAR}` in command lines, quoted or not.
pub fn exec_line(command: &str, args: &[String]) -> String {
    let mut line = if command.chars().any(|c| c.is_whitespace() || c == '"') {
        quote_arg(command)
    } else {
        command.replace('%', "%%").replace('$', "$$")
    };
    for arg in args {
        line.push(' ');
        line.push_str(&quote_arg(arg));
    }
    line
}

fn quote_arg(value: &str) -> String {
    quote(value).replace('$', "$$")
}

/// `Environment=` values, one quoted `KEY=VALUE` per variable in key order.
pub fn environment_assignments(environment: &Environment) -> Vec<String> {
    environment
        .iter()
        .map(|(key, value)| quote(&format!("{key}={value}")))
        .collect()
}

/// Double-quote `value` for a unit file.
///
/// Backslash, double quote and control characters are C-escaped and `%` is
/// doubled so systemd does not read it as a specifier.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '%' => out.push_str("%%"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
