use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` segments and fold `dir/..` pairs.
///
/// No filesystem access is performed, so symlinks are not resolved. Leading `..`
/// segments of a relative path are kept since there is nothing to fold them into.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Check if a path ends with the components of `suffix`.
///
/// Separators in `suffix` may be `/` or `\\`. The full suffix must match trailing
/// components, so `"lib/Foo.pm"` matches `"project/lib/Foo.pm"` but not
/// `"project/xlib/Foo.pm"`.
#[must_use]
pub fn path_matches_suffix(actual_path: &Path, suffix: &str) -> bool {
    let suffix_components: Vec<&str> = suffix
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    let path_components: Vec<_> = actual_path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if suffix_components.is_empty() || suffix_components.len() > path_components.len() {
        return false;
    }

    path_components
        .iter()
        .rev()
        .zip(suffix_components.iter().rev())
        .all(|(path_comp, suffix_comp)| path_comp.as_os_str().to_string_lossy() == *suffix_comp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_current_dir_segments() {
        assert_eq!(
            normalize_lexically(Path::new("./lib/./Foo.pm")),
            PathBuf::from("lib/Foo.pm")
        );
    }

    #[test]
    fn normalize_folds_parent_segments() {
        assert_eq!(
            normalize_lexically(Path::new("t/../lib/Foo.pm")),
            PathBuf::from("lib/Foo.pm")
        );
    }

    #[test]
    fn normalize_keeps_leading_parent_segments() {
        assert_eq!(
            normalize_lexically(Path::new("../lib/Foo.pm")),
            PathBuf::from("../lib/Foo.pm")
        );
    }

    #[test]
    fn normalize_parent_of_root_is_root() {
        assert_eq!(
            normalize_lexically(Path::new("/../etc")),
            PathBuf::from("/etc")
        );
    }

    #[test]
    fn normalize_empty_result_is_current_dir() {
        assert_eq!(normalize_lexically(Path::new("t/..")), PathBuf::from("."));
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_lexically(Path::new("a/b/../c/./d"));
        assert_eq!(normalize_lexically(&once), once);
    }

    #[test]
    fn suffix_exact_filename_match() {
        assert!(path_matches_suffix(Path::new("lib/Foo.pm"), "Foo.pm"));
    }

    #[test]
    fn suffix_partial_path_match() {
        assert!(path_matches_suffix(
            Path::new("project/lib/Foo.pm"),
            "lib/Foo.pm"
        ));
    }

    #[test]
    fn suffix_ignores_leading_current_dir() {
        assert!(path_matches_suffix(Path::new("./t/00-load.t"), "t/00-load.t"));
        assert!(path_matches_suffix(Path::new("t/00-load.t"), "./t/00-load.t"));
    }

    #[test]
    fn suffix_requires_whole_components() {
        assert!(!path_matches_suffix(Path::new("lib/MyFoo.pm"), "Foo.pm"));
    }

    #[test]
    fn suffix_longer_than_path_no_match() {
        assert!(!path_matches_suffix(Path::new("Foo.pm"), "lib/Foo.pm"));
    }

    #[test]
    fn suffix_empty_no_match() {
        assert!(!path_matches_suffix(Path::new("lib/Foo.pm"), ""));
    }

    #[test]
    fn suffix_windows_separator() {
        assert!(path_matches_suffix(
            Path::new("project/lib/Foo.pm"),
            "lib\\Foo.pm"
        ));
    }
}
