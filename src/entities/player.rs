use super::motion::{Animation, Vec2};
use super::projectile::Projectile;
use super::sprite::{MAGE_RIGHT_FRAMES, SpriteKind, SpriteView};
use crate::config::{FIRE_COOLDOWN_FRAMES, PLAYER_FRAME_DELAY, PLAYER_SPEED, PLAYER_START};

/// Horizontal facing of the mage; vertical movement keeps the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The four movement keys as held during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovementKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MovementKeys {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    /// The key that wins the facing decision: the last held one in
    /// left, right, up, down order.
    fn dominant(&self) -> Option<KeyDirection> {
        [
            (self.down, KeyDirection::Down),
            (self.up, KeyDirection::Up),
            (self.right, KeyDirection::Right),
            (self.left, KeyDirection::Left),
        ]
        .into_iter()
        .find_map(|(held, dir)| held.then_some(dir))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub facing: Facing,
    pub animation: Animation,
    /// Updates elapsed since the last successful cast.
    pub frames_since_last_shot: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vec2::from(PLAYER_START))
    }
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            facing: Facing::default(),
            animation: Animation::new(MAGE_RIGHT_FRAMES.len(), PLAYER_FRAME_DELAY),
            frames_since_last_shot: FIRE_COOLDOWN_FRAMES,
        }
    }

    /// Moves the mage and advances the walk cycle for the held keys.
    ///
    /// Every held key contributes independently, so opposite keys cancel and
    /// diagonals are faster than straight lines.
    pub fn update(&mut self, keys: MovementKeys) {
        if keys.left {
            self.position.x -= PLAYER_SPEED;
        }
        if keys.right {
            self.position.x += PLAYER_SPEED;
        }
        if keys.up {
            self.position.y -= PLAYER_SPEED;
        }
        if keys.down {
            self.position.y += PLAYER_SPEED;
        }

        match keys.dominant() {
            Some(direction) => {
                let facing = match direction {
                    KeyDirection::Left => Facing::Left,
                    KeyDirection::Right => Facing::Right,
                    KeyDirection::Up | KeyDirection::Down => self.facing,
                };
                if facing != self.facing {
                    self.animation.reset();
                    self.facing = facing;
                }
                self.animation.tick();
            }
            None => self.animation.frame = 0,
        }
    }

    pub fn update_cooldown(&mut self) {
        self.frames_since_last_shot = self.frames_since_last_shot.saturating_add(1);
    }

    pub fn can_fire(&self) -> bool {
        self.frames_since_last_shot >= FIRE_COOLDOWN_FRAMES
    }

    /// Casts a fireball toward `target` if the cooldown allows.
    ///
    /// A rejected cast, including one aimed at the mage's own position,
    /// leaves the cooldown untouched.
    pub fn try_fire(&mut self, target: Vec2) -> Option<Projectile> {
        if !self.can_fire() {
            return None;
        }
        let projectile = Projectile::new(self.position, target)?;
        self.frames_since_last_shot = 0;
        Some(projectile)
    }

    pub fn reset_position(&mut self) {
        self.position = Vec2::from(PLAYER_START);
    }

    pub fn sprite(&self) -> SpriteView {
        SpriteView {
            kind: SpriteKind::Mage(self.facing),
            position: self.position,
            frame: self.animation.frame,
        }
    }
}
