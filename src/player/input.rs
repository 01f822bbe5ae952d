use glam::Vec2;

/// Keyboard and mouse state sampled once per frame. Keys use DOM `KeyboardEvent.code` names.
#[derive(Debug, Default, Clone)]
pub struct PlayerInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub pointer_locked: bool,
    pub mouse_delta: Vec2,
    /// Hotbar slot chosen this frame with the number keys (0-based).
    pub selected_slot: Option<usize>,
}

impl PlayerInput {
    pub fn handle_key(&mut self, code: &str, pressed: bool) {
        match code {
            "KeyW" => self.forward = pressed,
            "KeyS" => self.backward = pressed,
            "KeyA" => self.left = pressed,
            "KeyD" => self.right = pressed,
            "Space" => self.jump = pressed,
            _ => {
                if pressed {
                    self.handle_digit(code);
                }
            }
        }
    }

    fn handle_digit(&mut self, code: &str) {
        let digit = code
            .strip_prefix("Digit")
            .and_then(|d| d.parse::<usize>().ok());
        if let Some(n @ 1..=9) = digit {
            self.selected_slot = Some(n - 1);
        }
    }

    pub fn handle_mouse_move(&mut self, delta: Vec2) {
        self.mouse_delta += delta;
    }

    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Clears per-frame deltas; held keys stay pressed.
    pub fn reset(&mut self) {
        self.mouse_delta = Vec2::ZERO;
        self.selected_slot = None;
    }
}
