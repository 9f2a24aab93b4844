use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Locate the coverage tool.
///
/// An explicit path with more than one component must point at an executable
/// file; a bare name (explicit or `default_name`) is searched on `path_env`.
#[must_use]
pub fn resolve_tool(
    explicit: Option<&Path>,
    default_name: &str,
    path_env: Option<&OsStr>,
) -> Option<PathBuf> {
    match explicit {
        Some(path) if path.components().count() > 1 => {
            is_executable(path).then(|| path.to_path_buf())
        }
        Some(name) => find_on_path(name.as_os_str(), path_env),
        None => find_on_path(OsStr::new(default_name), path_env),
    }
}

/// First executable `dir/name` over the entries of a `PATH`-style value.
#[must_use]
pub fn find_on_path(name: &OsStr, path_env: Option<&OsStr>) -> Option<PathBuf> {
    let path_env = path_env?;
    std::env::split_paths(path_env)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;
