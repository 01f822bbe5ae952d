pub mod camera;
pub mod controller;
pub mod input;

pub use camera::{CameraMode, CameraRig};
pub use controller::Player;
pub use input::PlayerInput;
