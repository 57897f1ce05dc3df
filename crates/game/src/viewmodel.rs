//! First-person weapon viewmodel placement. Cosmetic only.

use glam::Vec3;
use std::f32::consts::PI;

use crate::weapons::Weapon;

/// Rest position of the rifle in camera space.
pub const VIEWMODEL_BASE: Vec3 = Vec3::new(0.3, -0.3, -0.6);
const BOB_AMPLITUDE_X: f32 = 0.01;
const BOB_AMPLITUDE_Y: f32 = 0.008;
/// Camera-space pushback per radian of recoil.
const RECOIL_PUSHBACK: f32 = 0.5;
/// How far the rifle dips at the middle of a reload.
const RELOAD_DIP: f32 = 0.15;

/// Camera-space offset and pitch of the rifle model for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewmodelPose {
    pub offset: Vec3,
    /// Muzzle-up rotation in radians (negative = kicked up).
    pub pitch: f32,
}

impl Default for ViewmodelPose {
    fn default() -> Self {
        Self {
            offset: VIEWMODEL_BASE,
            pitch: 0.0,
        }
    }
}

impl ViewmodelPose {
    /// Pose for the weapon's current bob, recoil, and reload state.
    pub fn from_weapon(weapon: &Weapon, is_moving: bool) -> Self {
        let phase = weapon.bob_phase();
        let (bob_x, bob_y) = if is_moving {
            (phase.sin() * BOB_AMPLITUDE_X, (phase * 2.0).sin() * BOB_AMPLITUDE_Y)
        } else {
            (0.0, 0.0)
        };

        let recoil = weapon.recoil_offset();
        let mut offset = VIEWMODEL_BASE + Vec3::new(bob_x, bob_y, recoil * RECOIL_PUSHBACK);

        if weapon.is_reloading() {
            offset.y -= (weapon.reload_progress() * PI).sin() * RELOAD_DIP;
        }

        Self {
            offset,
            pitch: -recoil,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapons::RELOAD_TIME;

    #[test]
    fn idle_weapon_sits_at_rest() {
        let pose = ViewmodelPose::from_weapon(&Weapon::new(), false);
        assert_eq!(pose, ViewmodelPose::default());
    }

    #[test]
    fn recoil_pushes_back_and_tilts_up() {
        let mut weapon = Weapon::new();
        weapon.fire(false);
        let pose = ViewmodelPose::from_weapon(&weapon, false);
        assert!(pose.offset.z > VIEWMODEL_BASE.z);
        assert!(pose.pitch < 0.0);
    }

    #[test]
    fn reload_dips_deepest_halfway() {
        let mut weapon = Weapon::new();
        weapon.fire(false);
        weapon.start_reload();
        weapon.update(RELOAD_TIME * 0.5, false);
        let pose = ViewmodelPose::from_weapon(&weapon, false);
        assert!((pose.offset.y - (VIEWMODEL_BASE.y - RELOAD_DIP)).abs() < 1e-4);
    }

    #[test]
    fn bob_only_when_moving() {
        let mut weapon = Weapon::new();
        weapon.update(0.1, true);
        let moving = ViewmodelPose::from_weapon(&weapon, true);
        assert!((moving.offset.x - (VIEWMODEL_BASE.x + 1.0f32.sin() * BOB_AMPLITUDE_X)).abs() < 1e-6);
        let still = ViewmodelPose::from_weapon(&weapon, false);
        assert_eq!(still.offset.x, VIEWMODEL_BASE.x);
    }
}
