mod enemy;
mod motion;
mod player;
mod projectile;
mod sprite;

// Re-export all public types
pub use enemy::{Enemy, SpawnEdge};
pub use motion::{Animation, Vec2};
pub use player::{Facing, MovementKeys, Player};
pub use projectile::{Projectile, ProjectileStep};
pub use sprite::{
    ENEMY_FRAMES, FIREBALL_FRAMES, MAGE_LEFT_FRAMES, MAGE_RIGHT_FRAMES, SpriteKind, SpriteView,
};
