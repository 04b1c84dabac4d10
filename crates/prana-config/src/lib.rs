//! Breath configuration discovery and loading.
//!
//! Resolves where the configuration lives, parses TOML or JSON, and hands
//! the document to `prana-core` for eager validation. A malformed document
//! is a startup failure.

pub mod error;
pub mod loader;
pub mod source;

pub use error::{LoadError, Result};
pub use loader::{
    DEFAULT_CONFIG, Format, LoadedConfig, default_config, load_config, load_from, parse_config,
    parse_document,
};
pub use source::{
    CONFIG_ENV, CONFIG_FILE_NAME, ConfigSource, HOME_ENV, default_base_dir, resolve_source,
};
