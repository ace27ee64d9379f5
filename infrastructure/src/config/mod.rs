//! Configuration file loading for ark-runtime
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./ark.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/ark-runtime/config.toml`
//! 4. `ARK_`-prefixed environment variables
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileEvaluatorsConfig, FileMcpConfig, FileRuntimeConfig,
    FileToolsConfig,
};
pub use loader::ConfigLoader;
