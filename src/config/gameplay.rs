use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub move_speed: f32,
    pub jump_force: f32,
    /// Downward acceleration, applied as a positive magnitude.
    pub gravity: f32,
    pub eye_height: f32,
    /// Blocks above the spawn platform the player appears at.
    pub spawn_clearance: f32,
    pub walk_threshold: f32,
    pub third_person_offset: [f32; 3],
    pub top_down_height: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_force: 10.0,
            gravity: 25.0,
            eye_height: 1.8,
            spawn_clearance: 3.0,
            walk_threshold: 0.01,
            third_person_offset: [0.0, 3.0, 5.0],
            top_down_height: 30.0,
        }
    }
}
