//! Per-tick gameplay update: look and move, fire and resolve the shot, reload,
//! advance the weapon and targets, then hand the frame to the renderer.

use engine_core::{clamp_delta, MAX_FRAME_DELTA};
use input::InputState;

use crate::config::GameConfig;
use crate::state::{Session, ShotOutcome, Sinks};

impl Session {
    /// Run one tick. `dt` is clamped to [`MAX_FRAME_DELTA`].
    ///
    /// Player input only applies while the pointer is locked; the weapon's
    /// timers and the target animations advance either way.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &mut InputState,
        config: &GameConfig,
        sinks: &mut Sinks<'_>,
    ) -> Option<ShotOutcome> {
        let dt = clamp_delta(dt, MAX_FRAME_DELTA);
        let aiming = input.is_pointer_locked();
        let mut outcome = None;

        if aiming {
            self.player.update(input, config.look_scale(), dt);

            if input.is_fire_held() && self.weapon.can_fire(config.unlimited_ammo) {
                outcome = Some(self.fire(config, sinks));
            }

            if input.is_reload_held() {
                self.weapon.start_reload();
            }
        }

        self.weapon.update(dt, aiming && self.player.is_moving());

        if aiming {
            sinks.hud.update_ammo(self.weapon.current_ammo(), self.weapon.reserve_ammo());
            sinks.hud.update_reload_msg(self.weapon.is_reloading(), self.weapon.is_empty());
            sinks.hud.tick(dt);
        }

        self.targets.update(dt);
        sinks.render.render(&self.scene_frame(config));

        outcome
    }

    /// Fire one round and resolve what it hit. Caller has checked `can_fire`.
    fn fire(&mut self, config: &GameConfig, sinks: &mut Sinks<'_>) -> ShotOutcome {
        self.weapon.fire(config.unlimited_ammo);
        sinks.audio.play_gunshot();

        let pose = *self.player.pose();

        // The reset panel takes priority and stays out of the accuracy count.
        if self.reset_board.check_hit(&pose) {
            sinks.hud.reset_stats();
            self.weapon.reset_ammo();
            return ShotOutcome::ResetBoard;
        }

        match self.targets.check_hit(&pose) {
            Some(id) => {
                sinks.hud.record_shot(true);
                sinks.audio.play_hit_sound();
                sinks.hud.show_hitmarker();
                ShotOutcome::Hit(id)
            }
            None => {
                sinks.hud.record_shot(false);
                ShotOutcome::Miss
            }
        }
    }
}
