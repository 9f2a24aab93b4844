#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the strict-guard binary, isolated from
/// the caller's `PERL5LIB`.
#[macro_export]
macro_rules! strict_guard {
    () => {{
        let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("strict-guard"));
        cmd.env_remove("PERL5LIB").env_remove("STRICT_GUARD_LOG");
        cmd
    }};
}

/// Stand-in interpreter: `-c FILE` reports `FILE syntax OK` on stderr unless the
/// path contains `BROKEN`; any other invocation appends its last argument to
/// `runs.log` next to the script.
pub const FAKE_PERL: &str = r#"#!/bin/sh
for arg in "$@"; do file="$arg"; done
for arg in "$@"; do
    if [ "$arg" = "-c" ]; then
        case "$file" in
            *BROKEN*)
                echo "syntax error at $file line 1, near \"sub {\"" >&2
                echo "$file had compilation errors." >&2
                exit 255
                ;;
        esac
        echo "$file syntax OK" >&2
        exit 0
    fi
done
echo "$file" >> "$(dirname "$0")/runs.log"
exit 0
"#;

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Creates an executable script in the temp directory.
    #[cfg(unix)]
    pub fn create_executable(&self, relative_path: &str, content: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.create_file(relative_path, content);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
        path
    }

    /// Installs the stand-in interpreter at `bin/perl`.
    #[cfg(unix)]
    pub fn fake_perl(&self) -> PathBuf {
        self.create_executable("bin/perl", FAKE_PERL)
    }

    /// Installs a stand-in coverage tool at `bin/cover` whose report ends in
    /// a `Total` line with the given percentage.
    #[cfg(unix)]
    pub fn fake_cover(&self, total: &str) -> PathBuf {
        let script = format!(
            "#!/bin/sh\nif [ \"$1\" = \"-delete\" ]; then\n    echo \"Deleting database\"\n    exit 0\nfi\necho \"File      stmt   total\"\necho \"Total     90.0   {total}\"\n"
        );
        self.create_executable("bin/cover", &script)
    }

    /// Installs a coverage tool whose reset step fails.
    #[cfg(unix)]
    pub fn broken_cover(&self) -> PathBuf {
        self.create_executable(
            "bin/cover",
            "#!/bin/sh\necho \"cannot remove cover_db\" >&2\nexit 2\n",
        )
    }

    /// Files the stand-in interpreter ran with instrumentation, in order.
    pub fn coverage_runs(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("bin/runs.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates a strict-guard config file.
    pub fn create_config(&self, content: &str) -> PathBuf {
        self.create_file(".strict-guard.toml", content)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
