use glam::{Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

use crate::config::GameplayConfig;
use crate::player::camera::{CameraMode, CameraRig};
use crate::player::input::PlayerInput;

const MOUSE_SENSITIVITY: f32 = 0.002;

#[derive(Debug)]
pub struct Player {
    /// Eye position. The avatar's feet are `eye_height` below it.
    pub position: Vec3,
    pub velocity: Vec3,
    /// Yaw, pitch in radians.
    pub rotation: Vec2,
    pub grounded: bool,
    pub walking: bool,
    pub camera_mode: CameraMode,
    pub config: GameplayConfig,
}

impl Player {
    pub fn new(config: GameplayConfig, spawn_ground: f32) -> Self {
        Self {
            position: Vec3::new(0.0, spawn_ground + config.spawn_clearance, 0.0),
            velocity: Vec3::ZERO,
            rotation: Vec2::ZERO,
            grounded: false,
            walking: false,
            camera_mode: CameraMode::default(),
            config,
        }
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.rotation.x) * Quat::from_rotation_x(self.rotation.y)
    }

    /// Horizontal look direction. Yaw 0 faces -Z.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.rotation.x.sin(), 0.0, -self.rotation.x.cos())
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn model_position(&self) -> Vec3 {
        self.position - Vec3::Y * self.config.eye_height
    }

    pub fn camera(&self) -> CameraRig {
        self.camera_mode
            .place(self.position, self.orientation(), &self.config)
    }

    /// Switching views keeps the player where they are.
    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        self.camera_mode = mode;
    }

    /// Advances one frame. `ground` returns the terrain surface height at (x, z).
    pub fn update<F>(&mut self, dt: f32, input: &PlayerInput, ground: F)
    where
        F: Fn(f32, f32) -> f32,
    {
        if self.camera_mode.needs_pointer_lock() && !input.pointer_locked {
            return;
        }

        self.handle_rotation(input);

        let previous = self.position;
        let movement = self.movement_vector(input) * self.config.move_speed;
        self.velocity.x = movement.x;
        self.velocity.z = movement.z;

        if input.jump && self.grounded {
            self.velocity.y = self.config.jump_force;
            self.grounded = false;
        }

        if !self.grounded {
            self.velocity.y -= self.config.gravity * dt;
        }

        let mut next = self.position + self.velocity * dt;
        let ground_y = ground(next.x, next.z) + self.config.eye_height;
        if next.y <= ground_y {
            next.y = ground_y;
            self.velocity.y = 0.0;
            self.grounded = true;
        } else {
            // walked off an edge or still rising
            self.grounded = false;
        }
        self.position = next;

        let horizontal = Vec2::new(next.x - previous.x, next.z - previous.z);
        self.walking = horizontal.length() > self.config.walk_threshold;
    }

    fn handle_rotation(&mut self, input: &PlayerInput) {
        let delta = input.mouse_delta * MOUSE_SENSITIVITY;
        self.rotation.x -= delta.x;
        self.rotation.y = (self.rotation.y - delta.y).clamp(-FRAC_PI_2 + 0.01, FRAC_PI_2 - 0.01);
    }

    fn movement_vector(&self, input: &PlayerInput) -> Vec3 {
        let forward = self.forward();
        let right = self.right();

        let mut move_vec = Vec3::ZERO;
        if input.forward {
            move_vec += forward;
        }
        if input.backward {
            move_vec -= forward;
        }
        if input.left {
            move_vec -= right;
        }
        if input.right {
            move_vec += right;
        }

        move_vec.normalize_or_zero()
    }
}
