use std::path::{Path, PathBuf};

use dirs::home_dir;
use log::{error, info};
use thiserror::Error;

use crate::controller::TextDirection;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Failed to read config file {path}: {source}")]
  Read {
    path: PathBuf,
    source: std::io::Error,
  },
  #[error("Failed to parse config file {path}: {source}")]
  Parse {
    path: PathBuf,
    source: serde_json::Error,
  },
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
  #[serde(skip)]
  pub config_path: Option<PathBuf>,
  pub direction: Option<TextDirection>,
  pub dark_mode: Option<bool>,
}

const CONFIG_FILE: &str = "config.json";

fn default_config_dir() -> Option<PathBuf> {
  home_dir().map(|p| p.join(".config").join("peektime"))
}

impl Config {
  /// Environment first, then the config file, then defaults.
  #[must_use]
  pub fn new() -> Self {
    Self::layered(Self::from_env(), None)
  }

  /// Like [`Config::new`], but reads the config file from `dir`.
  #[must_use]
  pub fn with_dir(dir: PathBuf) -> Self {
    Self::layered(Self::from_env(), Some(dir))
  }

  fn layered(from_env: Self, dir: Option<PathBuf>) -> Self {
    let dir = dir
      .or_else(|| from_env.config_path.clone())
      .or_else(default_config_dir);
    let from_file = dir.as_deref().and_then(|dir| {
      Self::from_file(dir)
        .inspect_err(|e| error!("{e}"))
        .ok()
        .flatten()
    });

    let mut merged = from_env;
    merged.config_path = dir;
    if let Some(from_file) = &from_file {
      merged = merged.merge(from_file);
    } else {
      merged.init_cfg_file();
    }
    merged
  }

  fn from_env() -> Self {
    let config_path = std::env::var("PEEKTIME_CONFIG").ok().map(PathBuf::from);
    let direction = std::env::var("PEEKTIME_RTL")
      .ok()
      .map(|v| match v.as_str() {
        "1" | "true" | "yes" => TextDirection::Rtl,
        _ => TextDirection::Ltr,
      });

    Self {
      config_path,
      direction,
      dark_mode: None,
    }
  }

  /// Reads `config.json` from `dir`. A missing file is `Ok(None)`.
  pub fn from_file(dir: &Path) -> Result<Option<Self>, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
      return Ok(None);
    }
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
      path: path.clone(),
      source,
    })?;
    let config: Self =
      serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path, source })?;
    Ok(Some(config))
  }

  /// Fills unset values from `other`.
  #[must_use]
  pub fn merge(mut self, other: &Self) -> Self {
    self.config_path = self.config_path.or(other.config_path.clone());
    self.direction = self.direction.or(other.direction);
    self.dark_mode = self.dark_mode.or(other.dark_mode);
    self
  }

  #[must_use]
  pub fn direction(&self) -> TextDirection {
    self.direction.unwrap_or_default()
  }

  fn init_cfg_file(&self) {
    let Some(dir) = &self.config_path else { return };
    if !dir.exists() {
      let _ = std::fs::create_dir_all(dir).inspect_err(|e| {
        error!("Failed to create config directory: {e}");
      });
    }
    let path = dir.join(CONFIG_FILE);
    if path.exists() {
      return;
    }
    match serde_json::to_string_pretty(&Self::default()) {
      Ok(content) => {
        if std::fs::write(&path, content)
          .inspect_err(|e| error!("Failed to write config file: {e}"))
          .is_ok()
        {
          info!("Wrote default config to {}", path.display());
        }
      }
      Err(e) => error!("Failed to serialize config: {e}"),
    }
  }
}
