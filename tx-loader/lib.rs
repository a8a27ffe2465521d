//! Locations of the files `tx` reads and writes outside the edited file:
//! the configuration file and the log file.

pub mod config;

use std::{
  path::{
    Path,
    PathBuf,
  },
  sync::OnceLock,
};

use etcetera::base_strategy::{
  BaseStrategy,
  choose_base_strategy,
};

pub use config::Config;

static CONFIG_FILE: OnceLock<PathBuf> = OnceLock::new();

static LOG_FILE: OnceLock<PathBuf> = OnceLock::new();

pub fn initialize_config_file(specified_file: Option<PathBuf>) {
  let config_file = specified_file.unwrap_or_else(default_config_file);
  ensure_parent_dir(&config_file);
  CONFIG_FILE.set(config_file).ok();
}

pub fn initialize_log_file(specified_file: Option<PathBuf>) {
  let log_file = specified_file.unwrap_or_else(default_log_file);
  ensure_parent_dir(&log_file);
  LOG_FILE.set(log_file).ok();
}

/// `$TX_CONFIG_DIR` if set, otherwise `tx` inside the platform's config
/// directory.
pub fn config_dir() -> PathBuf {
  if let Ok(dir) = std::env::var("TX_CONFIG_DIR") {
    return PathBuf::from(dir);
  }
  let mut path = match choose_base_strategy() {
    Ok(strategy) => strategy.config_dir(),
    Err(err) => {
      log::warn!("no config directory ({err}), using the working directory");
      PathBuf::new()
    },
  };
  path.push("tx");
  path
}

pub fn cache_dir() -> PathBuf {
  let mut path = match choose_base_strategy() {
    Ok(strategy) => strategy.cache_dir(),
    Err(err) => {
      log::warn!("no cache directory ({err}), using the working directory");
      PathBuf::new()
    },
  };
  path.push("tx");
  path
}

pub fn config_file() -> PathBuf {
  CONFIG_FILE
    .get_or_init(|| {
      let path = default_config_file();
      ensure_parent_dir(&path);
      path
    })
    .clone()
}

pub fn log_file() -> PathBuf {
  LOG_FILE
    .get_or_init(|| {
      let path = default_log_file();
      ensure_parent_dir(&path);
      path
    })
    .clone()
}

pub fn default_log_file() -> PathBuf {
  cache_dir().join("tx.log")
}

fn default_config_file() -> PathBuf {
  config_dir().join("config.toml")
}

fn ensure_parent_dir(path: &Path) {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    std::fs::create_dir_all(parent).ok();
  }
}
