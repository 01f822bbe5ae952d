use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{ChainConfig, GameplayConfig, ServerConfig, WorldGenConfig};

const CONFIG_FILE: &str = "blockcraft.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub server: ServerConfig,
    pub chain: ChainConfig,
    pub gameplay: GameplayConfig,
    pub worldgen: WorldGenConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            server: ServerConfig::default(),
            chain: ChainConfig::default(),
            gameplay: GameplayConfig::default(),
            worldgen: WorldGenConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads `path`, writing the defaults there first when it doesn't exist.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        if !path.exists() {
            let default_config = Self::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            std::fs::write(path, toml_content).context("Failed to write default config")?;
            info!("Wrote default config to {}", path.display());
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;
        config
            .worldgen
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Overlays environment variables on top of the file settings.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("PORT is not a valid port: {port}"))?;
        }
        if let Some(host) = lookup("BLOCKCRAFT_HOST") {
            self.server.host = host
                .parse()
                .with_context(|| format!("BLOCKCRAFT_HOST is not an IP address: {host}"))?;
        }
        if let Some(dir) = lookup("BLOCKCRAFT_DATA_DIR") {
            self.server.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = lookup("BLOCKCRAFT_LOG") {
            self.log_level = level;
        }
        if let Some(rpc) = lookup("BASE_SEPOLIA_RPC") {
            self.chain.rpc_url = rpc;
        }

        let contracts = &mut self.chain.contracts;
        for (var, slot) in [
            ("BLOCKCRAFT_OUTFITS_ADDRESS", &mut contracts.outfits),
            ("BLOCKCRAFT_LAND_ADDRESS", &mut contracts.land),
            ("BLOCKCRAFT_RESOURCES_ADDRESS", &mut contracts.resources),
            ("BLOCKCRAFT_MARKETPLACE_ADDRESS", &mut contracts.marketplace),
        ] {
            if let Some(address) = lookup(var) {
                *slot = Some(address);
            }
        }
        Ok(())
    }

    pub fn log_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Directory for player documents, honouring the configured override.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.server.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().join("players")),
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("org", "blockcraft", "Blockcraft")
        .context("Couldn't determine project directory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_creates_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/blockcraft.toml");

        let config = AppConfig::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.server.port, 3001);

        let reloaded = AppConfig::load_or_create(&path).unwrap();
        assert_eq!(reloaded.chain.chain_id, 84532);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blockcraft.toml");
        std::fs::write(&path, "log_level = \"debug\"\n[server]\nport = 8080\n").unwrap();

        let config = AppConfig::load_or_create(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.leaderboard_limit, 10);
        assert_eq!(config.log_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_out_of_range_tree_chance_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blockcraft.toml");
        std::fs::write(&path, "[worldgen]\ntree_chance = 1.5\n").unwrap();
        assert!(AppConfig::load_or_create(&path).is_err());

        std::fs::write(&path, "[worldgen]\ntree_chance = 0.0\n").unwrap();
        let config = AppConfig::load_or_create(&path).unwrap();
        assert_eq!(config.worldgen.tree_chance, 0.0);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("PORT", "4000"),
            ("BASE_SEPOLIA_RPC", "http://localhost:8545"),
            ("BLOCKCRAFT_LAND_ADDRESS", "0xabc"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_env_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.chain.rpc_url, "http://localhost:8545");
        assert_eq!(config.chain.contracts.land.as_deref(), Some("0xabc"));
        assert!(config.chain.contracts.outfits.is_none());
    }

    #[test]
    fn test_bad_port_is_reported() {
        let mut config = AppConfig::default();
        let result = config.apply_env_overrides(|k| (k == "PORT").then(|| "nope".to_string()));
        assert!(result.is_err());
    }
}
