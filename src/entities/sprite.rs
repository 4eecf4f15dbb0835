use super::motion::Vec2;
use super::player::Facing;

pub const MAGE_LEFT_FRAMES: [&str; 4] = [
    "mage_walk_left_1",
    "mage_walk_left_2",
    "mage_walk_left_3",
    "mage_walk_left_4",
];

pub const MAGE_RIGHT_FRAMES: [&str; 4] = [
    "mage_walk_right_1",
    "mage_walk_right_2",
    "mage_walk_right_3",
    "mage_walk_right_4",
];

pub const FIREBALL_FRAMES: [&str; 6] = [
    "fireball_1",
    "fireball_2",
    "fireball_3",
    "fireball_4",
    "fireball_5",
    "fireball_6",
];

pub const ENEMY_FRAMES: [&str; 8] = [
    "enemy_walk_1",
    "enemy_walk_2",
    "enemy_walk_3",
    "enemy_walk_4",
    "enemy_walk_5",
    "enemy_walk_6",
    "enemy_walk_7",
    "enemy_walk_8",
];

/// What a sprite depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Mage(Facing),
    Fireball,
    Enemy,
}

/// Read-only snapshot of one thing to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteView {
    pub kind: SpriteKind,
    pub position: Vec2,
    pub frame: usize,
}

impl SpriteView {
    /// Asset name of the current animation frame.
    pub fn frame_name(&self) -> &'static str {
        let frames: &[&'static str] = match self.kind {
            SpriteKind::Mage(Facing::Left) => &MAGE_LEFT_FRAMES,
            SpriteKind::Mage(Facing::Right) => &MAGE_RIGHT_FRAMES,
            SpriteKind::Fireball => &FIREBALL_FRAMES,
            SpriteKind::Enemy => &ENEMY_FRAMES,
        };
        frames[self.frame % frames.len()]
    }
}
