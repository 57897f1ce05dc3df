//! The training room: an axis-aligned box centred on the origin, floor at y = 0.

use glam::Vec3;

pub const ROOM_WIDTH: f32 = 20.0;
pub const ROOM_DEPTH: f32 = 20.0;
pub const ROOM_HEIGHT: f32 = 4.0;

/// Interior extents of the room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Room {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
}

impl Default for Room {
    fn default() -> Self {
        Self {
            width: ROOM_WIDTH,
            depth: ROOM_DEPTH,
            height: ROOM_HEIGHT,
        }
    }
}

impl Room {
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }

    pub fn half_depth(&self) -> f32 {
        self.depth * 0.5
    }

    /// Clamp X/Z so a body of `radius` stays inside the walls. Y is untouched.
    pub fn clamp_horizontal(&self, position: Vec3, radius: f32) -> Vec3 {
        let hw = (self.half_width() - radius).max(0.0);
        let hd = (self.half_depth() - radius).max(0.0);
        Vec3::new(position.x.clamp(-hw, hw), position.y, position.z.clamp(-hd, hd))
    }
}
