use rand::Rng;

use super::motion::{Animation, Vec2};
use super::sprite::ENEMY_FRAMES;
use crate::config::{ENEMY_FRAME_DELAY, ENEMY_HALF_WIDTH, ENEMY_SPAWN_MARGIN, ENEMY_SPEED};

/// Playfield edge an enemy enters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnEdge {
    Top,
    Bottom,
    Left,
    Right,
}

impl SpawnEdge {
    pub const ALL: [SpawnEdge; 4] = [
        SpawnEdge::Top,
        SpawnEdge::Bottom,
        SpawnEdge::Left,
        SpawnEdge::Right,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A creature that walks straight at the mage.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub position: Vec2,
    pub speed: f32,
    pub active: bool,
    pub animation: Animation,
}

impl Enemy {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            speed: ENEMY_SPEED,
            active: true,
            animation: Animation::new(ENEMY_FRAMES.len(), ENEMY_FRAME_DELAY),
        }
    }

    /// Places a new enemy just off screen on a random edge.
    pub fn spawn(rng: &mut impl Rng, width: f32, height: f32) -> Self {
        let edge = SpawnEdge::random(rng);
        Self::spawn_on(edge, rng, width, height)
    }

    pub fn spawn_on(edge: SpawnEdge, rng: &mut impl Rng, width: f32, height: f32) -> Self {
        let margin = ENEMY_SPAWN_MARGIN;
        let position = match edge {
            SpawnEdge::Top => Vec2::new(rng.random_range(0.0..=width), -margin),
            SpawnEdge::Bottom => Vec2::new(rng.random_range(0.0..=width), height + margin),
            SpawnEdge::Left => Vec2::new(-margin, rng.random_range(0.0..=height)),
            SpawnEdge::Right => Vec2::new(width + margin, rng.random_range(0.0..=height)),
        };
        Self::new(position)
    }

    /// Steps toward `target`. Standing exactly on it skips the frame.
    pub fn update(&mut self, target: Vec2) {
        if !self.active {
            return;
        }

        let Some(direction) = self.position.direction_to(target) else {
            return;
        };

        self.position = self.position + direction * self.speed;
        self.animation.tick();
    }

    pub fn collided_with(&self, point: Vec2, radius: f32) -> bool {
        self.position.distance(point) < radius + ENEMY_HALF_WIDTH
    }
}
