use super::motion::{Animation, Vec2};
use super::sprite::FIREBALL_FRAMES;
use crate::config::{PROJECTILE_FRAME_DELAY, PROJECTILE_SPEED};
use crate::tilemap::TileMap;

/// Result of advancing a projectile by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileStep {
    Moved,
    /// The next position was inside a wall; the projectile is now inactive.
    HitWall,
    /// Already inactive, nothing happened.
    Idle,
}

/// A fireball travelling in a straight line.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub position: Vec2,
    pub direction: Vec2,
    pub speed: f32,
    pub active: bool,
    pub animation: Animation,
}

impl Projectile {
    /// Aims a projectile from `origin` at `target`.
    ///
    /// Returns `None` when both points coincide, since there is no direction to fly in.
    pub fn new(origin: Vec2, target: Vec2) -> Option<Self> {
        let direction = origin.direction_to(target)?;
        Some(Self {
            position: origin,
            direction,
            speed: PROJECTILE_SPEED,
            active: true,
            animation: Animation::new(FIREBALL_FRAMES.len(), PROJECTILE_FRAME_DELAY),
        })
    }

    pub fn update(&mut self, map: &TileMap) -> ProjectileStep {
        if !self.active {
            return ProjectileStep::Idle;
        }

        let next = self.position + self.direction * self.speed;
        if map.is_wall(next.x, next.y) {
            self.active = false;
            return ProjectileStep::HitWall;
        }

        self.position = next;
        self.animation.tick();
        ProjectileStep::Moved
    }

    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        !self.position.within(width, height)
    }
}
