use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::pool::DEFAULT_POOL_SIZE;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeagueConfig {
    pub database: Option<String>,
    pub pool_size: Option<u32>,
}

impl LeagueConfig {
    /// Database path: explicit override, then config file, then default
    pub fn database_path(&self, override_path: Option<&Path>, base: &Path) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| default_database_path_in(base))
    }

    pub fn pool_size(&self) -> u32 {
        self.pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("leaguedb.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".leaguedb").join("league.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<LeagueConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: LeagueConfig = toml::from_str(&contents)?;
    if config.pool_size == Some(0) {
        anyhow::bail!("pool_size in {} must be at least 1", path.display());
    }
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &LeagueConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
