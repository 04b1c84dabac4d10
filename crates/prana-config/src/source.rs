use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "PRANA_CONFIG";

/// Environment variable overriding the base directory (tests use this).
pub const HOME_ENV: &str = "PRANA_HOME";

/// File name looked up inside the base directory.
pub const CONFIG_FILE_NAME: &str = "breath.toml";

/// Where the breath configuration came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Env(PathBuf),
    Home(PathBuf),
    Builtin,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(p) | ConfigSource::Env(p) | ConfigSource::Home(p) => Some(p),
            ConfigSource::Builtin => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit(p) => write!(f, "{} (--config)", p.display()),
            ConfigSource::Env(p) => write!(f, "{} (${CONFIG_ENV})", p.display()),
            ConfigSource::Home(p) => write!(f, "{}", p.display()),
            ConfigSource::Builtin => write!(f, "built-in defaults"),
        }
    }
}

/// Base directory for user files: `$PRANA_HOME`, else `~/.prana`.
pub fn default_base_dir() -> PathBuf {
    if let Ok(dir) = env::var(HOME_ENV) {
        return PathBuf::from(dir);
    }
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".prana")
}

/// Priority chain, no I/O:
/// 1. Explicit path
/// 2. `$PRANA_CONFIG` (ignored when empty)
/// 3. `<base>/breath.toml` if it exists
/// 4. Built-in defaults
fn choose_source(
    explicit: Option<&Path>,
    env_path: Option<String>,
    home_file: Option<PathBuf>,
) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }
    if let Some(path) = env_path.filter(|p| !p.trim().is_empty()) {
        return ConfigSource::Env(PathBuf::from(path));
    }
    match home_file {
        Some(path) => ConfigSource::Home(path),
        None => ConfigSource::Builtin,
    }
}

pub fn resolve_source(explicit: Option<&Path>) -> ConfigSource {
    let home_file = default_base_dir().join(CONFIG_FILE_NAME);
    choose_source(
        explicit,
        env::var(CONFIG_ENV).ok(),
        home_file.is_file().then_some(home_file),
    )
}
