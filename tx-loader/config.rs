use std::{
  fs,
  io,
  path::Path,
};

use anyhow::{
  Context,
  Result,
};
use serde::Deserialize;

/// User settings read from `config.toml`.
///
/// ```toml
/// file-default-mode = 0o644
/// tab-width = 4
/// snippet-lines = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Permission bits for files created by the editor.
  pub file_default_mode: u32,
  pub tab_width:         usize,
  /// Lines shown around a selection.
  pub snippet_lines:     usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      file_default_mode: 0o600,
      tab_width:         8,
      snippet_lines:     20,
    }
  }
}

impl Config {
  /// Loads the process-wide config file. A missing file yields the defaults.
  pub fn load() -> Result<Self> {
    Self::load_from(&crate::config_file())
  }

  pub fn load_from(path: &Path) -> Result<Self> {
    let text = match fs::read_to_string(path) {
      Ok(text) => text,
      Err(err) if err.kind() == io::ErrorKind::NotFound => {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(Self::default());
      },
      Err(err) => {
        return Err(err).with_context(|| format!("failed to read {}", path.display()));
      },
    };

    let config: Self =
      toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    log::debug!("loaded config from {}: {config:?}", path.display());
    Ok(config)
  }
}
