//! Target population: spherical targets that shrink away when shot and respawn.
//!
//! Every target is a hecs entity carrying a [`Transform`] and a [`Target`].
//! The population size never changes: a target that finishes shrinking is
//! despawned and a fresh one is spawned in the same update.

use engine_core::{Transform, Vec3};
use hecs::{Entity, World};
use physics::{nearest_hit, raycast_sphere, RaycastHit, DEFAULT_RAY_LENGTH};
use rand::prelude::*;

use crate::player::CameraPose;
use crate::room::Room;

pub const TARGET_COUNT: usize = 5;
pub const TARGET_RADIUS: f32 = 0.3;
pub const TARGET_MIN_HEIGHT: f32 = 0.8;
pub const TARGET_MAX_HEIGHT: f32 = 2.5;
/// Minimum distance from the walls.
pub const TARGET_SPAWN_MARGIN: f32 = 1.5;
/// Scale lost per second after a hit.
pub const TARGET_SHRINK_RATE: f32 = 5.0;

/// Hit state of a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetState {
    /// Can be hit.
    Live,
    /// Hit `elapsed` seconds ago; shrinking and no longer hittable.
    Dying { elapsed: f32 },
}

/// Target component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub radius: f32,
    pub state: TargetState,
}

impl Target {
    pub fn is_live(&self) -> bool {
        self.state == TargetState::Live
    }

    /// Visual scale: 1 while live, shrinking toward 0 while dying.
    pub fn scale(&self) -> f32 {
        match self.state {
            TargetState::Live => 1.0,
            TargetState::Dying { elapsed } => 1.0 - elapsed * TARGET_SHRINK_RATE,
        }
    }
}

/// Read-only view of one target for rendering and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    pub id: Entity,
    pub position: Vec3,
    pub radius: f32,
    pub scale: f32,
    pub is_dying: bool,
}

/// Owns every target and the RNG that places them.
pub struct TargetPopulation {
    world: World,
    room: Room,
    rng: StdRng,
    respawned: u64,
}

impl TargetPopulation {
    /// Spawn the standard number of targets with an entropy-seeded RNG.
    pub fn new(room: Room) -> Self {
        Self::with_rng(room, TARGET_COUNT, StdRng::from_entropy())
    }

    /// Spawn `count` targets using the given RNG (seed it for reproducible layouts).
    pub fn with_rng(room: Room, count: usize, rng: StdRng) -> Self {
        let mut population = Self {
            world: World::new(),
            room,
            rng,
            respawned: 0,
        };
        for _ in 0..count {
            population.spawn_target();
        }
        log::debug!("Spawned {} targets", count);
        population
    }

    fn random_position(&mut self) -> Vec3 {
        let hw = (self.room.half_width() - TARGET_SPAWN_MARGIN).max(0.0);
        let hd = (self.room.half_depth() - TARGET_SPAWN_MARGIN).max(0.0);
        Vec3::new(
            (self.rng.gen::<f32>() * 2.0 - 1.0) * hw,
            TARGET_MIN_HEIGHT + self.rng.gen::<f32>() * (TARGET_MAX_HEIGHT - TARGET_MIN_HEIGHT),
            (self.rng.gen::<f32>() * 2.0 - 1.0) * hd,
        )
    }

    fn spawn_target(&mut self) -> Entity {
        let position = self.random_position();
        self.spawn_at(position)
    }

    /// Place a live target at an exact position.
    pub fn spawn_at(&mut self, position: Vec3) -> Entity {
        self.world.spawn((
            Transform::from_position(position),
            Target {
                radius: TARGET_RADIUS,
                state: TargetState::Live,
            },
        ))
    }

    /// Cast the crosshair ray against every live target and mark the nearest one as hit.
    ///
    /// Returns the id of the target that was hit.
    pub fn check_hit(&mut self, pose: &CameraPose) -> Option<Entity> {
        let ray = pose.aim_ray()?;

        let candidates: Vec<(Entity, RaycastHit)> = self
            .world
            .query::<(&Transform, &Target)>()
            .iter()
            .filter(|(_, (_, target))| target.is_live())
            .filter_map(|(entity, (transform, target))| {
                raycast_sphere(&ray, transform.position, target.radius, DEFAULT_RAY_LENGTH)
                    .map(|hit| (entity, hit))
            })
            .collect();

        let (entity, hit) = nearest_hit(candidates)?;
        if let Ok(mut target) = self.world.get::<&mut Target>(entity) {
            target.state = TargetState::Dying { elapsed: 0.0 };
        }
        log::debug!("Target {:?} hit at {:.2}m", entity, hit.distance);
        Some(entity)
    }

    /// Advance shrink animations and replace finished targets.
    pub fn update(&mut self, dt: f32) {
        let mut finished = Vec::new();
        for (entity, (transform, target)) in self.world.query_mut::<(&mut Transform, &mut Target)>() {
            if let TargetState::Dying { elapsed } = target.state {
                target.state = TargetState::Dying { elapsed: elapsed + dt };
                let scale = target.scale();
                if scale <= 0.0 {
                    finished.push(entity);
                } else {
                    transform.set_uniform_scale(scale);
                }
            }
        }

        for entity in finished {
            self.world.despawn(entity).ok();
            self.spawn_target();
            self.respawned += 1;
        }
    }

    /// Number of targets, live and dying.
    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn live_count(&self) -> usize {
        self.world
            .query::<&Target>()
            .iter()
            .filter(|(_, target)| target.is_live())
            .count()
    }

    /// Targets replaced since creation.
    pub fn respawned(&self) -> u64 {
        self.respawned
    }

    pub fn get(&self, id: Entity) -> Option<TargetView> {
        let transform = *self.world.get::<&Transform>(id).ok()?;
        let target = *self.world.get::<&Target>(id).ok()?;
        Some(view(id, &transform, &target))
    }

    /// Snapshot of every target.
    pub fn views(&self) -> Vec<TargetView> {
        self.world
            .query::<(&Transform, &Target)>()
            .iter()
            .map(|(id, (transform, target))| view(id, transform, target))
            .collect()
    }
}

fn view(id: Entity, transform: &Transform, target: &Target) -> TargetView {
    TargetView {
        id,
        position: transform.position,
        radius: target.radius,
        scale: target.scale().max(0.0),
        is_dying: !target.is_live(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PLAYER_HEIGHT;

    fn empty_population() -> TargetPopulation {
        TargetPopulation::with_rng(Room::default(), 0, StdRng::seed_from_u64(1))
    }

    fn eye() -> CameraPose {
        CameraPose::new(Vec3::new(0.0, PLAYER_HEIGHT, 0.0))
    }

    #[test]
    fn spawns_inside_margin_and_height_band() {
        let room = Room::default();
        let population = TargetPopulation::with_rng(room, 200, StdRng::seed_from_u64(9));
        assert_eq!(population.len(), 200);
        let hw = room.half_width() - TARGET_SPAWN_MARGIN;
        let hd = room.half_depth() - TARGET_SPAWN_MARGIN;
        for t in population.views() {
            assert!(t.position.x.abs() <= hw);
            assert!(t.position.z.abs() <= hd);
            assert!(t.position.y >= TARGET_MIN_HEIGHT && t.position.y <= TARGET_MAX_HEIGHT);
            assert!(!t.is_dying);
            assert_eq!(t.radius, TARGET_RADIUS);
        }
    }

    #[test]
    fn target_straight_ahead_is_hit_and_replaced() {
        let mut population = TargetPopulation::with_rng(Room::default(), 5, StdRng::seed_from_u64(3));
        // Every random target lies behind this eye, so only the placed one is in the line of fire.
        let id = population.spawn_at(Vec3::new(0.0, PLAYER_HEIGHT, -20.0));
        let hit = population.check_hit(&CameraPose::new(Vec3::new(0.0, PLAYER_HEIGHT, -19.0)));
        assert_eq!(hit, Some(id));
        assert!(matches!(
            population.world.get::<&Target>(id).unwrap().state,
            TargetState::Dying { elapsed } if elapsed == 0.0
        ));

        let ticks = (1.0 / TARGET_SHRINK_RATE / 0.01).ceil() as usize + 1;
        for _ in 0..ticks {
            population.update(0.01);
            assert_eq!(population.len(), 6);
        }
        assert!(population.get(id).is_none());
        assert_eq!(population.respawned(), 1);
        assert_eq!(population.live_count(), 6);
    }

    #[test]
    fn nearest_of_overlapping_targets_wins() {
        let mut population = empty_population();
        let far = population.spawn_at(Vec3::new(0.0, PLAYER_HEIGHT, -6.0));
        let near = population.spawn_at(Vec3::new(0.0, PLAYER_HEIGHT, -3.0));
        assert_eq!(population.check_hit(&eye()), Some(near));
        // The near one is dying, so the next shot passes through to the far one.
        assert_eq!(population.check_hit(&eye()), Some(far));
        assert_eq!(population.check_hit(&eye()), None);
    }

    #[test]
    fn miss_changes_nothing() {
        let mut population = empty_population();
        let id = population.spawn_at(Vec3::new(3.0, PLAYER_HEIGHT, -3.0));
        assert_eq!(population.check_hit(&eye()), None);
        assert!(!population.get(id).unwrap().is_dying);
    }

    #[test]
    fn shrink_scale_tracks_elapsed() {
        let mut population = empty_population();
        let id = population.spawn_at(Vec3::new(0.0, PLAYER_HEIGHT, -4.0));
        population.check_hit(&eye());
        population.update(0.1);
        let t = population.get(id).unwrap();
        assert!((t.scale - 0.5).abs() < 1e-5);
        assert!(t.is_dying);
    }

    #[test]
    fn looking_away_never_hits() {
        let mut population = empty_population();
        population.spawn_at(Vec3::new(0.0, PLAYER_HEIGHT, -4.0));
        let mut pose = eye();
        pose.yaw = std::f32::consts::PI;
        assert_eq!(population.check_hit(&pose), None);
    }

    #[test]
    fn population_constant_under_random_hits() {
        let mut population = TargetPopulation::with_rng(Room::default(), TARGET_COUNT, StdRng::seed_from_u64(17));
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..2_000 {
            if rng.gen_bool(0.3) {
                // Aim at a random target so hits actually happen.
                let views = population.views();
                let pick = views[rng.gen_range(0..views.len())];
                let mut pose = eye();
                let to = pick.position - pose.position;
                pose.yaw = (-to.x).atan2(-to.z);
                pose.pitch = (to.y / to.length()).asin();
                population.check_hit(&pose);
            }
            population.update(rng.gen_range(0.0..0.05));
            assert_eq!(population.len(), TARGET_COUNT);
        }
        assert!(population.respawned() > 0);
    }
}
