//! Lexical detection of `strict` and `warnings` pragmas.

mod pattern;
mod scan;

pub use pattern::{
    MODULES_ENABLING_STRICT, MODULES_ENABLING_WARNINGS, PerlVersion, PragmaKind, PragmaPattern,
    STRICT_BY_VERSION, WARNINGS_BY_VERSION,
};
pub use scan::{PragmaScanner, ScanOptions, ScanOutcome, ScanState};
