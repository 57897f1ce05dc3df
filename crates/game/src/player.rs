//! Player controller: mouse look and flat-floor locomotion.

use engine_core::{Transform, Vec3};
use input::InputState;
use physics::Ray;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::room::Room;

/// Eye height above the floor.
pub const PLAYER_HEIGHT: f32 = 1.7;
/// Top speed in units per second.
pub const PLAYER_SPEED: f32 = 6.0;
pub const ACCELERATION: f32 = 50.0;
pub const FRICTION: f32 = 8.0;
/// Collision radius against the walls.
pub const PLAYER_RADIUS: f32 = 0.4;
/// Speed above which the player counts as moving (weapon bob).
pub const MOVING_THRESHOLD: f32 = 0.5;

/// Eye position and look angles. Roll is always zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    /// Radians around +Y; zero faces -Z, negative turns right.
    pub yaw: f32,
    /// Radians, positive looks up, clamped to ±90°.
    pub pitch: f32,
}

impl CameraPose {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_yaw_pitch(self.position, self.yaw, self.pitch)
    }

    /// View direction through the crosshair.
    pub fn forward(&self) -> Vec3 {
        self.transform().forward()
    }

    /// View direction with the vertical part removed, unit length.
    /// Derived from yaw alone so it stays defined when looking straight up or down.
    pub fn flat_forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// `flat_forward × up`, unit length.
    pub fn flat_right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Hit-scan ray from the eye through the screen centre.
    pub fn aim_ray(&self) -> Option<Ray> {
        Ray::new(self.position, self.forward())
    }
}

/// Player controller handling look and movement.
#[derive(Debug, Clone)]
pub struct PlayerController {
    pub pose: CameraPose,
    pub velocity: Vec3,
    pub max_speed: f32,
    pub acceleration: f32,
    pub friction: f32,
    room: Room,
    is_moving: bool,
}

impl PlayerController {
    pub fn new(room: Room) -> Self {
        Self {
            pose: CameraPose::new(Vec3::new(0.0, PLAYER_HEIGHT, 0.0)),
            velocity: Vec3::ZERO,
            max_speed: PLAYER_SPEED,
            acceleration: ACCELERATION,
            friction: FRICTION,
            room,
            is_moving: false,
        }
    }

    /// Advance look and movement by `dt` seconds.
    /// `look_scale` is radians per mouse count (from the current sensitivity).
    pub fn update(&mut self, input: &mut InputState, look_scale: f32, dt: f32) {
        // Mouse look
        let mouse = input.consume_mouse();
        self.pose.yaw = wrap_angle(self.pose.yaw - mouse.x * look_scale);
        self.pose.pitch = (self.pose.pitch - mouse.y * look_scale).clamp(-FRAC_PI_2, FRAC_PI_2);

        // Wish direction from keys
        let axes = input.movement_axes();
        let wish = self.pose.flat_forward() * axes.y + self.pose.flat_right() * axes.x;
        if let Some(dir) = wish.try_normalize() {
            self.velocity += dir * self.acceleration * dt;
        }

        // Friction
        let speed = self.velocity.length();
        if speed > 0.0 {
            let drop = speed * self.friction * dt;
            self.velocity *= (speed - drop).max(0.0) / speed;
        }

        // Speed cap
        self.velocity = self.velocity.clamp_length_max(self.max_speed);

        self.is_moving = self.velocity.length() > MOVING_THRESHOLD;

        // Move and keep inside the room at eye height
        let moved = self.pose.position + self.velocity * dt;
        let mut position = self.room.clamp_horizontal(moved, PLAYER_RADIUS);
        position.y = PLAYER_HEIGHT;
        self.pose.position = position;
    }

    /// Get camera pose.
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    /// Get player position.
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Whether the last update left the player above walking speed.
    pub fn is_moving(&self) -> bool {
        self.is_moving
    }
}

fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped.is_finite() {
        wrapped
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input::{ElementState, KeyCode};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const DT: f32 = 1.0 / 60.0;
    const LOOK: f32 = 0.002;

    fn locked_input() -> InputState {
        let mut input = InputState::new();
        input.set_pointer_locked(true);
        input
    }

    #[test]
    fn mouse_right_turns_right() {
        let mut player = PlayerController::new(Room::default());
        let mut input = locked_input();
        input.process_mouse_motion((100.0, 0.0));
        player.update(&mut input, LOOK, DT);
        assert!((player.pose.yaw + 0.2).abs() < 1e-6);
        assert!(player.pose.forward().x > 0.0);
        assert_eq!(input.pending_mouse(), glam::Vec2::ZERO);
    }

    #[test]
    fn pitch_clamps_at_vertical() {
        let mut player = PlayerController::new(Room::default());
        let mut input = locked_input();
        input.process_mouse_motion((0.0, -100_000.0));
        player.update(&mut input, LOOK, DT);
        assert_eq!(player.pose.pitch, FRAC_PI_2);
        input.process_mouse_motion((0.0, 200_000.0));
        player.update(&mut input, LOOK, DT);
        assert_eq!(player.pose.pitch, -FRAC_PI_2);
        // Movement basis is still usable looking straight down.
        assert!((player.pose.flat_forward().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn forward_key_moves_toward_view() {
        let mut player = PlayerController::new(Room::default());
        let mut input = locked_input();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        for _ in 0..30 {
            player.update(&mut input, LOOK, DT);
        }
        assert!(player.position().z < 0.0);
        assert!(player.position().x.abs() < 1e-5);
        assert!(player.is_moving());
    }

    #[test]
    fn strafe_right_follows_yaw() {
        let mut player = PlayerController::new(Room::default());
        player.pose.yaw = -FRAC_PI_2; // facing +X, right is +Z
        let mut input = locked_input();
        input.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        for _ in 0..30 {
            player.update(&mut input, LOOK, DT);
        }
        assert!(player.position().z > 0.0);
    }

    #[test]
    fn opposite_keys_only_apply_friction() {
        let mut player = PlayerController::new(Room::default());
        player.velocity = Vec3::new(3.0, 0.0, 0.0);
        let mut input = locked_input();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyS, ElementState::Pressed);
        player.update(&mut input, LOOK, DT);
        let expected = 3.0 * (1.0 - FRICTION * DT);
        assert!((player.velocity.x - expected).abs() < 1e-5);
        assert_eq!(player.velocity.z, 0.0);
    }

    #[test]
    fn reset_after_lock_loss_leaves_only_friction() {
        let mut player = PlayerController::new(Room::default());
        let mut input = locked_input();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        for _ in 0..20 {
            player.update(&mut input, LOOK, DT);
        }
        let before = player.speed();
        assert!(before > 0.0);

        input.set_pointer_locked(false);
        input.reset();
        player.update(&mut input, LOOK, DT);
        let after = player.speed();
        assert!((after - before * (1.0 - FRICTION * DT)).abs() < 1e-4);
    }

    #[test]
    fn stationary_player_has_no_nan() {
        let mut player = PlayerController::new(Room::default());
        let mut input = locked_input();
        player.update(&mut input, LOOK, DT);
        assert_eq!(player.velocity, Vec3::ZERO);
        assert!(player.position().is_finite());
        assert!(!player.is_moving());
    }

    #[test]
    fn random_input_respects_speed_cap_and_walls() {
        let room = Room::default();
        let mut player = PlayerController::new(room);
        let mut input = locked_input();
        let mut rng = StdRng::seed_from_u64(7);
        let keys = [KeyCode::KeyW, KeyCode::KeyS, KeyCode::KeyA, KeyCode::KeyD];
        let hw = room.half_width() - PLAYER_RADIUS;
        let hd = room.half_depth() - PLAYER_RADIUS;

        for _ in 0..5_000 {
            for key in keys {
                let state = if rng.gen_bool(0.5) { ElementState::Pressed } else { ElementState::Released };
                input.process_keyboard(key, state);
            }
            input.process_mouse_motion((rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)));
            let dt = rng.gen_range(0.0..0.05);
            player.update(&mut input, LOOK, dt);

            assert!(player.speed() <= PLAYER_SPEED + 1e-4);
            let p = player.position();
            assert!(p.x >= -hw && p.x <= hw);
            assert!(p.z >= -hd && p.z <= hd);
            assert_eq!(p.y, PLAYER_HEIGHT);
            assert!(player.pose.pitch.abs() <= FRAC_PI_2);
        }
    }
}
