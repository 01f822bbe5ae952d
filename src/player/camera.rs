use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::GameplayConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraMode {
    FirstPerson,
    #[default]
    ThirdPerson,
    TopDown,
}

impl CameraMode {
    /// First-person view only takes input while the pointer is captured.
    pub fn needs_pointer_lock(&self) -> bool {
        matches!(self, Self::FirstPerson)
    }

    /// Positions the camera for a player whose eye is at `eye`.
    pub fn place(&self, eye: Vec3, orientation: Quat, config: &GameplayConfig) -> CameraRig {
        match self {
            Self::FirstPerson => CameraRig {
                position: eye,
                look_at: None,
            },
            Self::ThirdPerson => {
                let offset = orientation * Vec3::from(config.third_person_offset);
                CameraRig {
                    position: eye + offset,
                    look_at: Some(eye),
                }
            }
            Self::TopDown => CameraRig {
                position: eye + Vec3::Y * config.top_down_height,
                look_at: Some(eye),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    /// `None` keeps the camera's own orientation.
    pub look_at: Option<Vec3>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placements() {
        let config = GameplayConfig::default();
        let eye = Vec3::new(1.0, 12.0, -3.0);

        let fp = CameraMode::FirstPerson.place(eye, Quat::IDENTITY, &config);
        assert_eq!(fp.position, eye);

        let tp = CameraMode::ThirdPerson.place(eye, Quat::IDENTITY, &config);
        assert_eq!(tp.position, eye + Vec3::new(0.0, 3.0, 5.0));
        assert_eq!(tp.look_at, Some(eye));

        let td = CameraMode::TopDown.place(eye, Quat::IDENTITY, &config);
        assert_eq!(td.position, eye + Vec3::new(0.0, 30.0, 0.0));
    }
}
