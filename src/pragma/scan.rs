use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::PragmaPattern;
use crate::error::{Result, StrictGuardError};

// SAFETY: static patterns, checked by tests.
static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*#").expect("valid regex"));
static DOC_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*=\w+").expect("valid regex"));
static DOC_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*=(cut|back|end)").expect("valid regex"));
static END_OF_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(__END__|__DATA__)").expect("valid regex"));
static SHEBANG_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s-\w*[wW]").expect("valid regex"));

/// Where the scanner is within the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Code,
    InDocBlock,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Accept a `-w` style flag on a line-1 shebang as a match.
    pub check_shebang_flag: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The pattern matched on this 1-based line.
    Found { line: usize },
    /// The shebang line carried a warnings flag; no body line was examined.
    ShebangFlag,
    /// End of file or an end-of-code marker was reached without a match.
    NotFound { lines_scanned: usize },
}

impl ScanOutcome {
    #[must_use]
    pub const fn is_found(self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }
}

/// Line scanner that looks for a pragma in executable code.
///
/// Comment lines and documentation blocks (`=pod` .. `=cut`) are skipped, and
/// scanning stops at `__END__` or `__DATA__`. Detection is lexical: a pragma
/// inside a string literal still counts.
#[derive(Debug, Clone)]
pub struct PragmaScanner {
    pattern: PragmaPattern,
    shebang: Regex,
}

impl PragmaScanner {
    #[must_use]
    pub const fn new(pattern: PragmaPattern, shebang: Regex) -> Self {
        Self { pattern, shebang }
    }

    #[must_use]
    pub const fn pattern(&self) -> &PragmaPattern {
        &self.pattern
    }

    /// Scan a file on disk. The handle is closed before this returns.
    ///
    /// # Errors
    /// Returns `FileRead` if the file cannot be opened or read.
    pub fn scan_file(&self, path: &Path, options: ScanOptions) -> Result<ScanOutcome> {
        let file = File::open(path).map_err(|source| StrictGuardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let outcome = self
            .scan_reader(BufReader::new(file), options)
            .map_err(|source| StrictGuardError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(
            path = %path.display(),
            pragma = %self.pattern.kind(),
            ?outcome,
            "pragma scan finished"
        );
        Ok(outcome)
    }

    /// Scan any buffered source. Lines need not be valid UTF-8.
    ///
    /// # Errors
    /// Returns an I/O error if reading fails.
    pub fn scan_reader<R: BufRead>(
        &self,
        mut reader: R,
        options: ScanOptions,
    ) -> std::io::Result<ScanOutcome> {
        let mut state = ScanState::Code;
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_number += 1;
            let text = String::from_utf8_lossy(&buf);
            let line = text.trim_end_matches(['\n', '\r']);

            if line_number == 1
                && options.check_shebang_flag
                && self.shebang.is_match(line)
                && SHEBANG_FLAG.is_match(line)
            {
                return Ok(ScanOutcome::ShebangFlag);
            }

            match state {
                ScanState::InDocBlock => {
                    if DOC_CLOSE.is_match(line) {
                        state = ScanState::Code;
                    }
                }
                ScanState::Code => {
                    if COMMENT.is_match(line) {
                        continue;
                    }
                    if DOC_OPEN.is_match(line) {
                        if !DOC_CLOSE.is_match(line) {
                            state = ScanState::InDocBlock;
                        }
                        continue;
                    }
                    if END_OF_CODE.is_match(line) {
                        break;
                    }
                    if self.pattern.is_match(line) {
                        return Ok(ScanOutcome::Found { line: line_number });
                    }
                }
            }
        }

        Ok(ScanOutcome::NotFound {
            lines_scanned: line_number,
        })
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
