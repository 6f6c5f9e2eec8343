//! Server configuration, layered from a TOML file and `ROSTER_*` environment
//! variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Public URL clients reach the server under; prefixes every href.
  pub base_url:   String,
  pub store_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       8080,
      base_url:   "http://localhost:8080".to_string(),
      store_path: PathBuf::from("roster.db"),
    }
  }
}

impl ServerConfig {
  /// Read `path` (if it exists) and then the environment, later sources
  /// overriding earlier ones.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::load_with_env(path, config::Environment::with_prefix("ROSTER"))
  }

  fn load_with_env(path: &Path, env: config::Environment) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(env.try_parsing(true))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// `store_path` with a leading `~` expanded to the user's home directory.
  pub fn resolved_store_path(&self) -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    expand_tilde(&self.store_path, home.as_deref())
  }
}

/// Expand a leading `~/` to `home`, if known.
fn expand_tilde(path: &Path, home: Option<&Path>) -> PathBuf {
  if let Ok(rest) = path.strip_prefix("~")
    && let Some(home) = home
  {
    return home.join(rest);
  }
  path.to_path_buf()
}
