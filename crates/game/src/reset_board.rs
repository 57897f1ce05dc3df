//! The RESET panel on the floor. Shooting it clears stats and refills ammo.

use glam::Vec3;
use physics::{raycast_floor_panel, FloorPanel, DEFAULT_RAY_LENGTH};

use crate::player::CameraPose;

pub const RESET_BOARD_WIDTH: f32 = 1.2;
pub const RESET_BOARD_DEPTH: f32 = 0.6;
/// Raised slightly off the floor.
pub const RESET_BOARD_POSITION: Vec3 = Vec3::new(0.0, 0.01, 0.0);

/// Static floor panel; always present, never removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResetBoard {
    panel: FloorPanel,
}

impl Default for ResetBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ResetBoard {
    pub fn new() -> Self {
        Self {
            panel: FloorPanel::new(RESET_BOARD_POSITION, RESET_BOARD_WIDTH, RESET_BOARD_DEPTH),
        }
    }

    pub fn panel(&self) -> &FloorPanel {
        &self.panel
    }

    /// True if the crosshair ray lands on the board.
    pub fn check_hit(&self, pose: &CameraPose) -> bool {
        pose.aim_ray()
            .and_then(|ray| raycast_floor_panel(&ray, &self.panel, DEFAULT_RAY_LENGTH))
            .is_some()
    }
}
