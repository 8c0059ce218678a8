pub mod config;
pub mod logging;
pub mod shell;

pub use config::{AppConfig, ConfigError};
pub use shell::{Command, Shell};
