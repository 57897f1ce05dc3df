//! Session state: the simulation pieces one tick advances, and the sinks it reports to.

use crate::audio::AudioSink;
use crate::config::GameConfig;
use crate::hud::HudSink;
use crate::player::PlayerController;
use crate::render::{RenderSink, SceneFrame};
use crate::reset_board::ResetBoard;
use crate::room::Room;
use crate::targets::TargetPopulation;
use crate::viewmodel::ViewmodelPose;
use crate::weapons::Weapon;

/// Where the tick's reports go.
pub struct Sinks<'a> {
    pub hud: &'a mut dyn HudSink,
    pub audio: &'a mut dyn AudioSink,
    pub render: &'a mut dyn RenderSink,
}

/// What a fired shot struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// The RESET panel; not counted toward accuracy.
    ResetBoard,
    Hit(hecs::Entity),
    Miss,
}

/// One training session in the room.
pub struct Session {
    pub room: Room,
    pub player: PlayerController,
    pub weapon: Weapon,
    pub targets: TargetPopulation,
    pub reset_board: ResetBoard,
}

impl Session {
    pub fn new() -> Self {
        let room = Room::default();
        Self::with_targets(room, TargetPopulation::new(room))
    }

    /// Session with a prepared target population (seeded layouts in tests).
    pub fn with_targets(room: Room, targets: TargetPopulation) -> Self {
        Self {
            room,
            player: PlayerController::new(room),
            weapon: Weapon::new(),
            targets,
            reset_board: ResetBoard::new(),
        }
    }

    /// Snapshot of the scene for the render sink.
    pub fn scene_frame(&self, config: &GameConfig) -> SceneFrame {
        SceneFrame {
            camera: *self.player.pose(),
            fov_degrees: config.fov(),
            targets: self.targets.views(),
            reset_board: *self.reset_board.panel(),
            viewmodel: ViewmodelPose::from_weapon(&self.weapon, self.player.is_moving()),
            weapon_phase: self.weapon.phase(),
            muzzle_intensity: self.weapon.muzzle_intensity(),
            post_processing: config.muzzle_flash_fx,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
