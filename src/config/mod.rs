mod loader;
mod model;
mod validation;

pub use loader::{ConfigLoader, FileConfigLoader, FileSystem, LOCAL_CONFIG_NAME, RealFileSystem};
pub use model::{
    CONFIG_VERSION, ChecksConfig, Config, CoverageConfig, DEFAULT_COVER_THRESHOLD,
    InterpreterConfig, ScannerConfig,
};
pub use validation::validate_config_semantics;
