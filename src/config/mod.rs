//! Configuration module for onsave
//!
//! Configuration hierarchy (first file found wins, env applies on top):
//! 1. Environment variables (ONSAVE_*)
//! 2. Project config (`<workspace>/.onsave.toml`)
//! 3. User config (`<config dir>/onsave/config.toml`)
//! 4. Built-in defaults
//!
//! Configuration is loaded again for every save event, so edits take effect
//! on the next save without restarting the watcher.

mod loader;
mod types;

pub use loader::{default_config_template, ConfigSource, ConfigWarning, LoadedConfig};
pub use types::{
    normalize_out_ext, CompileConfig, DeclarationConfig, TranspilerConfig, WatchConfig,
    PROJECT_CONFIG_FILE,
};
