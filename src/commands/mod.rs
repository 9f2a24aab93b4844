pub mod check;
pub mod config;
pub mod context;
pub mod cover;
pub mod init;

pub use check::{CheckKind, run_all, run_check};
pub use config::{format_config, format_config_text, run_config};
pub use context::{CliAuditor, exit_code};
pub use cover::{describe_outcome, run_cover};
pub use init::{generate_config_template, run_init, run_init_impl};
