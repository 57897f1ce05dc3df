//! Semi-automatic rifle: ammo, fire cooldown, reload, recoil, and muzzle flash.

use engine_core::DecayingScalar;

/// Seconds between shots.
pub const FIRE_INTERVAL: f32 = 0.1;
pub const MAG_SIZE: u32 = 30;
pub const STARTING_RESERVE: u32 = 90;
/// Seconds to swap a magazine.
pub const RELOAD_TIME: f32 = 2.5;
/// Radians of kick added per shot.
pub const RECOIL_AMOUNT: f32 = 0.03;
/// Radians per second of recoil recovery.
pub const RECOIL_RECOVERY: f32 = 6.0;
pub const MUZZLE_FLASH_PEAK_INTENSITY: f32 = 12.0;
pub const MUZZLE_FLASH_DECAY_RATE: f32 = 20.0;
pub const MUZZLE_FLASH_DURATION: f32 = 0.1;
/// Bob phase advance in radians per second while moving.
pub const BOB_RATE: f32 = 10.0;

/// Coarse weapon state, for display and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponPhase {
    /// Ready to fire (ammo permitting).
    Idle,
    /// Waiting out the interval after a shot.
    Cooldown,
    /// Magazine swap in progress.
    Reloading,
}

/// Weapon instance with current state.
#[derive(Debug, Clone)]
pub struct Weapon {
    pub magazine_size: u32,
    pub starting_reserve: u32,
    pub fire_interval: f32,
    pub reload_time: f32,
    pub recoil_per_shot: f32,

    current_ammo: u32,
    reserve_ammo: u32,

    // State
    fire_cooldown: f32,
    reload_timer: f32,
    is_reloading: bool,
    recoil: DecayingScalar,
    muzzle: DecayingScalar,
    bob_phase: f32,
}

impl Default for Weapon {
    fn default() -> Self {
        Self::new()
    }
}

impl Weapon {
    pub fn new() -> Self {
        Self::with_ammo(MAG_SIZE, STARTING_RESERVE)
    }

    /// A full magazine of `magazine_size` with `reserve` rounds spare.
    pub fn with_ammo(magazine_size: u32, reserve: u32) -> Self {
        Self {
            magazine_size,
            starting_reserve: reserve,
            fire_interval: FIRE_INTERVAL,
            reload_time: RELOAD_TIME,
            recoil_per_shot: RECOIL_AMOUNT,
            current_ammo: magazine_size,
            reserve_ammo: reserve,
            fire_cooldown: 0.0,
            reload_timer: 0.0,
            is_reloading: false,
            recoil: DecayingScalar::linear(RECOIL_RECOVERY),
            muzzle: DecayingScalar::exponential(MUZZLE_FLASH_DECAY_RATE, MUZZLE_FLASH_DURATION),
            bob_phase: 0.0,
        }
    }

    /// Update weapon state.
    pub fn update(&mut self, dt: f32, is_moving: bool) {
        // Update cooldowns
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);

        // Handle reloading
        if self.is_reloading {
            self.reload_timer -= dt;
            if self.reload_timer <= 0.0 {
                self.finish_reload();
            }
        }

        self.recoil.update(dt);
        self.muzzle.update(dt);

        if is_moving {
            self.bob_phase += dt * BOB_RATE;
        } else {
            self.bob_phase = 0.0;
        }
    }

    /// Check if weapon can fire.
    pub fn can_fire(&self, unlimited_ammo: bool) -> bool {
        self.fire_cooldown <= 0.0 && !self.is_reloading && (self.current_ammo > 0 || unlimited_ammo)
    }

    /// Fire the weapon. Does nothing and returns false when `can_fire` is false.
    pub fn fire(&mut self, unlimited_ammo: bool) -> bool {
        if !self.can_fire(unlimited_ammo) {
            return false;
        }

        if !unlimited_ammo {
            self.current_ammo -= 1;
        }
        self.fire_cooldown = self.fire_interval;
        self.recoil.add(self.recoil_per_shot);
        self.muzzle.trigger(MUZZLE_FLASH_PEAK_INTENSITY);
        true
    }

    /// Start reloading. Ignored while reloading, with a full magazine, or with no reserve.
    pub fn start_reload(&mut self) -> bool {
        if self.is_reloading || self.reserve_ammo == 0 || self.current_ammo >= self.magazine_size {
            return false;
        }

        self.is_reloading = true;
        self.reload_timer = self.reload_time;
        log::info!("Reloading ({} / {})", self.current_ammo, self.reserve_ammo);
        true
    }

    /// Finish reloading.
    fn finish_reload(&mut self) {
        let needed = self.magazine_size.saturating_sub(self.current_ammo);
        let available = needed.min(self.reserve_ammo);

        self.current_ammo += available;
        self.reserve_ammo -= available;
        self.is_reloading = false;
        self.reload_timer = 0.0;
        log::info!("Reload complete ({} / {})", self.current_ammo, self.reserve_ammo);
    }

    /// Refill magazine and reserve to their starting values and cancel any reload.
    pub fn reset_ammo(&mut self) {
        self.current_ammo = self.magazine_size;
        self.reserve_ammo = self.starting_reserve;
        self.is_reloading = false;
        self.reload_timer = 0.0;
    }

    pub fn phase(&self) -> WeaponPhase {
        if self.is_reloading {
            WeaponPhase::Reloading
        } else if self.fire_cooldown > 0.0 {
            WeaponPhase::Cooldown
        } else {
            WeaponPhase::Idle
        }
    }

    pub fn current_ammo(&self) -> u32 {
        self.current_ammo
    }

    pub fn reserve_ammo(&self) -> u32 {
        self.reserve_ammo
    }

    pub fn is_empty(&self) -> bool {
        self.current_ammo == 0
    }

    /// Check if reloading.
    pub fn is_reloading(&self) -> bool {
        self.is_reloading
    }

    /// Reload progress in [0, 1]; zero when not reloading.
    pub fn reload_progress(&self) -> f32 {
        if !self.is_reloading || self.reload_time <= 0.0 {
            return 0.0;
        }
        (1.0 - self.reload_timer / self.reload_time).clamp(0.0, 1.0)
    }

    /// Accumulated recoil kick in radians.
    pub fn recoil_offset(&self) -> f32 {
        self.recoil.value()
    }

    pub fn muzzle_intensity(&self) -> f32 {
        self.muzzle.value()
    }

    pub fn bob_phase(&self) -> f32 {
        self.bob_phase
    }

}
