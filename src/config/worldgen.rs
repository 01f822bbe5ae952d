use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    pub world_seed: u64,
    /// Chunks generated in each direction around the origin.
    pub load_distance: i32,
    pub spawn_safe_radius: f64,
    pub spawn_platform_height: i32,
    pub base_height: f64,
    pub base_frequency: f64,
    pub base_amplitude: f64,
    pub detail_frequency: f64,
    pub detail_amplitude: f64,
    pub biome_frequency: f64,
    pub tree_chance: f64,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            world_seed: 0,
            load_distance: 3,
            spawn_safe_radius: 3.0,
            spawn_platform_height: 10,
            base_height: 10.0,
            base_frequency: 0.05,
            base_amplitude: 15.0,
            detail_frequency: 0.2,
            detail_amplitude: 3.0,
            biome_frequency: 0.01,
            tree_chance: 0.1,
        }
    }
}

impl WorldGenConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.tree_chance),
            "worldgen.tree_chance must be between 0 and 1, got {}",
            self.tree_chance
        );
        ensure!(
            self.load_distance >= 0,
            "worldgen.load_distance can't be negative, got {}",
            self.load_distance
        );
        Ok(())
    }
}
