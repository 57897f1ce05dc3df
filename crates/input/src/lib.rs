//! Input handling for keyboard and mouse.
//!
//! Events from the platform are folded into [`InputState`]; the game loop
//! reads held keys and drains the mouse accumulator once per tick.

use glam::Vec2;
use std::collections::HashSet;

/// Which physical keys and buttons drive each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub strafe_left: KeyCode,
    pub strafe_right: KeyCode,
    pub reload: KeyCode,
    pub fire: MouseButton,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            strafe_left: KeyCode::KeyA,
            strafe_right: KeyCode::KeyD,
            reload: KeyCode::KeyR,
            fire: MouseButton::Left,
        }
    }
}

/// Manages input state between ticks.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Whether the fire button is held.
    fire_held: bool,
    /// Mouse movement accumulated since the last `consume_mouse`.
    accumulated_delta: Vec2,
    /// Whether the pointer is captured; mouse motion is ignored otherwise.
    pointer_locked: bool,
    bindings: Bindings,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: Bindings) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == self.bindings.fire {
            self.fire_held = state.is_pressed();
        }
    }

    /// Process raw mouse movement. Dropped unless the pointer is locked.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        if !self.pointer_locked {
            return;
        }
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    /// Take the mouse movement accumulated since the last call and reset it.
    pub fn consume_mouse(&mut self) -> Vec2 {
        std::mem::take(&mut self.accumulated_delta)
    }

    /// Mouse movement waiting to be consumed.
    pub fn pending_mouse(&self) -> Vec2 {
        self.accumulated_delta
    }

    /// Update pointer lock. Losing the lock discards pending mouse movement.
    pub fn set_pointer_locked(&mut self, locked: bool) {
        if self.pointer_locked != locked {
            log::debug!("Pointer lock {}", if locked { "acquired" } else { "released" });
        }
        self.pointer_locked = locked;
        if !locked {
            self.accumulated_delta = Vec2::ZERO;
        }
    }

    /// Check if the pointer is locked (aim control active).
    pub fn is_pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Forget every held key, the fire button, and pending mouse movement.
    /// Call when focus or pointer lock is lost so nothing stays stuck down.
    pub fn reset(&mut self) {
        self.keys_held.clear();
        self.fire_held = false;
        self.accumulated_delta = Vec2::ZERO;
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if fire is held.
    pub fn is_fire_held(&self) -> bool {
        self.fire_held
    }

    /// Check if reload is held.
    pub fn is_reload_held(&self) -> bool {
        self.is_key_held(self.bindings.reload)
    }

    /// Raw movement axes from held keys: `x` strafe (+right), `y` forward.
    /// Opposite keys cancel; the result is not normalized.
    pub fn movement_axes(&self) -> Vec2 {
        let mut axes = Vec2::ZERO;

        if self.is_key_held(self.bindings.forward) {
            axes.y += 1.0;
        }
        if self.is_key_held(self.bindings.back) {
            axes.y -= 1.0;
        }
        if self.is_key_held(self.bindings.strafe_right) {
            axes.x += 1.0;
        }
        if self.is_key_held(self.bindings.strafe_left) {
            axes.x -= 1.0;
        }

        axes
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
