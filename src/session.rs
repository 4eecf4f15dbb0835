//! Round state and the per-frame update pass.
use rand::Rng;
use tracing::{debug, info};

use crate::config::{INTERACTION_RADIUS, WORLD_HEIGHT, WORLD_WIDTH};
use crate::entities::{
    Enemy, MovementKeys, Player, Projectile, ProjectileStep, SpriteKind, SpriteView, Vec2,
};
use crate::menu::MenuButton;
use crate::tilemap::TileMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Menu,
    Playing,
}

/// Audio requests raised by the game, drained by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Cast,
    EnemyHit,
    WallImpact,
}

/// What a pointer press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    Ignored,
    RoundStarted,
    SoundToggled(bool),
    Fired,
    /// The cast was refused (cooldown, or aimed at the mage itself).
    FireRejected,
    Quit,
}

/// Owns every live entity and all mutable game state.
#[derive(Debug, Clone)]
pub struct GameSession {
    map: TileMap,
    player: Player,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    score: u32,
    state: SessionState,
    sound_enabled: bool,
    cues: Vec<SoundCue>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(TileMap::default())
    }
}

impl GameSession {
    /// A fresh session sitting in the menu.
    pub fn new(map: TileMap) -> Self {
        Self {
            map,
            player: Player::default(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            state: SessionState::Menu,
            sound_enabled: true,
            cues: Vec::new(),
        }
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    /// Clears the arena and puts the mage back at the start.
    pub fn reset_round(&mut self) {
        self.enemies.clear();
        self.projectiles.clear();
        self.score = 0;
        self.player.reset_position();
    }

    pub fn start_round(&mut self) {
        self.reset_round();
        self.state = SessionState::Playing;
        info!("Round started");
    }

    /// Adds one edge-spawned enemy. Does nothing outside of play.
    pub fn spawn_enemy(&mut self, rng: &mut impl Rng) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        let enemy = Enemy::spawn(rng, WORLD_WIDTH, WORLD_HEIGHT);
        debug!(x = enemy.position.x, y = enemy.position.y, "Enemy spawned");
        self.enemies.push(enemy);
        true
    }

    /// Inserts an enemy at a fixed position while playing.
    ///
    /// Scripted placement hook for tests; live play spawns through
    /// [`GameSession::spawn_enemy`].
    pub fn push_enemy(&mut self, enemy: Enemy) {
        if self.state == SessionState::Playing {
            self.enemies.push(enemy);
        }
    }

    /// Routes a click in world coordinates to the menu or to fire control.
    pub fn on_pointer_down(&mut self, point: Vec2) -> PointerOutcome {
        match self.state {
            SessionState::Menu => match MenuButton::at(point) {
                Some(MenuButton::Start) => {
                    self.start_round();
                    PointerOutcome::RoundStarted
                }
                Some(MenuButton::Sound) => {
                    self.sound_enabled = !self.sound_enabled;
                    info!(enabled = self.sound_enabled, "Sound toggled");
                    PointerOutcome::SoundToggled(self.sound_enabled)
                }
                Some(MenuButton::Exit) => PointerOutcome::Quit,
                None => PointerOutcome::Ignored,
            },
            SessionState::Playing => self.fire_at(point),
        }
    }

    fn fire_at(&mut self, target: Vec2) -> PointerOutcome {
        match self.player.try_fire(target) {
            Some(projectile) => {
                debug!(
                    dx = projectile.direction.x,
                    dy = projectile.direction.y,
                    "Fireball cast"
                );
                self.projectiles.push(projectile);
                self.emit(SoundCue::Cast);
                PointerOutcome::Fired
            }
            None => PointerOutcome::FireRejected,
        }
    }

    /// Runs one frame of gameplay. Does nothing outside of play.
    pub fn update(&mut self, keys: MovementKeys) {
        if self.state != SessionState::Playing {
            return;
        }

        self.player.update_cooldown();
        self.player.update(keys);

        let map = &self.map;
        let impacts = self
            .projectiles
            .iter_mut()
            .map(|p| p.update(map))
            .filter(|step| *step == ProjectileStep::HitWall)
            .count();
        for _ in 0..impacts {
            self.emit(SoundCue::WallImpact);
        }

        let target = self.player.position;
        let mut kills = 0;
        for enemy in &mut self.enemies {
            enemy.update(target);
            // A projectile is spent on its first hit and an enemy dies once
            let hit = self
                .projectiles
                .iter_mut()
                .filter(|p| p.active)
                .find(|p| enemy.collided_with(p.position, INTERACTION_RADIUS));
            if let Some(projectile) = hit {
                enemy.active = false;
                projectile.active = false;
                kills += 1;
            }
        }
        for _ in 0..kills {
            self.score += 1;
            self.emit(SoundCue::EnemyHit);
            debug!(score = self.score, "Enemy killed");
        }

        if self
            .enemies
            .iter()
            .any(|enemy| enemy.collided_with(self.player.position, INTERACTION_RADIUS))
        {
            info!(score = self.score, "Mage caught, round lost");
            self.reset_round();
            self.state = SessionState::Menu;
            return;
        }

        self.enemies.retain(|e| e.active);
        self.projectiles
            .retain(|p| p.active && !p.is_out_of_bounds(WORLD_WIDTH, WORLD_HEIGHT));
    }

    fn emit(&mut self, cue: SoundCue) {
        if self.sound_enabled {
            self.cues.push(cue);
        }
    }

    /// Takes the sound cues raised since the last call.
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    /// Everything to draw this frame: the mage, then projectiles, then enemies.
    pub fn sprites(&self) -> Vec<SpriteView> {
        let mut sprites = Vec::with_capacity(1 + self.projectiles.len() + self.enemies.len());
        sprites.push(self.player.sprite());
        sprites.extend(self.projectiles.iter().filter(|p| p.active).map(|p| SpriteView {
            kind: SpriteKind::Fireball,
            position: p.position,
            frame: p.animation.frame,
        }));
        sprites.extend(self.enemies.iter().filter(|e| e.active).map(|e| SpriteView {
            kind: SpriteKind::Enemy,
            position: e.position,
            frame: e.animation.frame,
        }));
        sprites
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn playing() -> GameSession {
        let mut session = GameSession::default();
        session.start_round();
        session
    }

    #[test]
    fn test_new_session_starts_in_menu() {
        let session = GameSession::default();
        assert_eq!(session.state(), SessionState::Menu);
        assert_eq!(session.score(), 0);
        assert!(session.sound_enabled());
        assert!(session.enemies().is_empty());
    }

    #[test]
    fn test_menu_start_button() {
        let mut session = GameSession::default();
        let outcome = session.on_pointer_down(Vec2::new(300.0, 170.0));
        assert_eq!(outcome, PointerOutcome::RoundStarted);
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn test_menu_sound_and_exit_buttons() {
        let mut session = GameSession::default();
        assert_eq!(
            session.on_pointer_down(Vec2::new(300.0, 250.0)),
            PointerOutcome::SoundToggled(false)
        );
        assert!(!session.sound_enabled());
        assert_eq!(
            session.on_pointer_down(Vec2::new(300.0, 330.0)),
            PointerOutcome::Quit
        );
        assert_eq!(
            session.on_pointer_down(Vec2::new(10.0, 10.0)),
            PointerOutcome::Ignored
        );
        assert_eq!(session.state(), SessionState::Menu);
    }

    #[test]
    fn test_menu_click_does_not_fire() {
        let mut session = GameSession::default();
        session.on_pointer_down(Vec2::new(10.0, 10.0));
        assert!(session.projectiles().is_empty());
        assert!(session.drain_cues().is_empty());
    }

    #[test]
    fn test_update_ignored_in_menu() {
        let mut session = GameSession::default();
        session.update(MovementKeys {
            left: true,
            ..MovementKeys::default()
        });
        assert_eq!(session.player().position, Vec2::new(320.0, 240.0));
    }

    #[test]
    fn test_spawn_only_while_playing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = GameSession::default();
        assert!(!session.spawn_enemy(&mut rng));
        assert!(session.enemies().is_empty());

        session.start_round();
        assert!(session.spawn_enemy(&mut rng));
        assert!(session.spawn_enemy(&mut rng));
        assert_eq!(session.enemies().len(), 2);
    }

    #[test]
    fn test_fire_emits_cast_cue() {
        let mut session = playing();
        assert_eq!(
            session.on_pointer_down(Vec2::new(420.0, 240.0)),
            PointerOutcome::Fired
        );
        assert_eq!(session.drain_cues(), vec![SoundCue::Cast]);
        assert!(session.drain_cues().is_empty());
    }

    #[test]
    fn test_muted_session_emits_no_cues() {
        let mut session = playing();
        session.set_sound_enabled(false);
        session.on_pointer_down(Vec2::new(420.0, 240.0));
        assert_eq!(session.projectiles().len(), 1);
        assert!(session.drain_cues().is_empty());
    }

    #[test]
    fn test_wall_impact_cue_and_prune() {
        let mut session = playing();
        // One cell right of the wall at the left end of row 1
        session.player.position = Vec2::new(70.0, 100.0);
        session.on_pointer_down(Vec2::new(0.0, 100.0));
        session.drain_cues();

        session.update(MovementKeys::default());
        assert_eq!(session.projectiles().len(), 1);
        session.update(MovementKeys::default());
        assert!(session.projectiles().is_empty());
        assert_eq!(session.drain_cues(), vec![SoundCue::WallImpact]);
    }

    #[test]
    fn test_kill_scores_and_removes_both() {
        let mut session = playing();
        session.push_enemy(Enemy::new(Vec2::new(400.0, 240.0)));
        session.on_pointer_down(Vec2::new(420.0, 240.0));
        session.projectiles[0].position = Vec2::new(380.0, 240.0);
        session.drain_cues();

        session.update(MovementKeys::default());
        assert_eq!(session.score(), 1);
        assert!(session.enemies().is_empty());
        assert!(session.projectiles().is_empty());
        assert_eq!(session.drain_cues(), vec![SoundCue::EnemyHit]);
    }

    #[test]
    fn test_muted_kill_emits_no_cue() {
        let mut session = playing();
        session.set_sound_enabled(false);
        session.push_enemy(Enemy::new(Vec2::new(400.0, 240.0)));
        session.on_pointer_down(Vec2::new(420.0, 240.0));
        session.projectiles[0].position = Vec2::new(380.0, 240.0);

        session.update(MovementKeys::default());
        assert_eq!(session.score(), 1);
        assert!(session.enemies().is_empty());
        assert!(session.drain_cues().is_empty());
    }

    #[test]
    fn test_muted_wall_impact_emits_no_cue() {
        let mut session = playing();
        session.set_sound_enabled(false);
        session.player.position = Vec2::new(70.0, 100.0);
        session.on_pointer_down(Vec2::new(0.0, 100.0));

        session.update(MovementKeys::default());
        session.update(MovementKeys::default());
        assert!(session.projectiles().is_empty());
        assert!(session.drain_cues().is_empty());
    }

    #[test]
    fn test_projectile_kills_at_most_one_enemy() {
        let mut session = playing();
        session.push_enemy(Enemy::new(Vec2::new(500.0, 240.0)));
        session.push_enemy(Enemy::new(Vec2::new(500.0, 250.0)));
        session.on_pointer_down(Vec2::new(600.0, 240.0));
        session.projectiles[0].position = Vec2::new(495.0, 245.0);

        session.update(MovementKeys::default());
        assert_eq!(session.score(), 1);
        assert_eq!(session.enemies().len(), 1);
        assert!(session.projectiles().is_empty());
    }

    #[test]
    fn test_out_of_bounds_projectile_pruned() {
        let mut session = playing();
        // The map is 512 tall but the playfield ends at 510
        session.player.position = Vec2::new(320.0, 506.0);
        session.on_pointer_down(Vec2::new(320.0, 600.0));
        session.update(MovementKeys::default());
        assert!(session.projectiles().is_empty());
        assert_eq!(session.drain_cues(), vec![SoundCue::Cast]);
    }

    #[test]
    fn test_enemy_contact_ends_round() {
        let mut session = playing();
        session.score = 4;
        session.push_enemy(Enemy::new(Vec2::new(360.0, 240.0)));
        session.on_pointer_down(Vec2::new(320.0, 100.0));
        session.projectiles[0].position = Vec2::new(320.0, 60.0);
        session.update(MovementKeys::default());

        assert_eq!(session.state(), SessionState::Menu);
        assert_eq!(session.score(), 0);
        assert!(session.enemies().is_empty());
        assert!(session.projectiles().is_empty());
        assert_eq!(session.player().position, Vec2::new(320.0, 240.0));
    }

    #[test]
    fn test_sprites_lists_mage_first() {
        let mut session = playing();
        session.push_enemy(Enemy::new(Vec2::new(0.0, -100.0)));
        session.on_pointer_down(Vec2::new(420.0, 240.0));
        let sprites = session.sprites();
        assert_eq!(sprites.len(), 3);
        assert!(matches!(sprites[0].kind, SpriteKind::Mage(_)));
        assert_eq!(sprites[1].kind, SpriteKind::Fireball);
        assert_eq!(sprites[2].kind, SpriteKind::Enemy);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_reset_round_clears_everything(
                seed in any::<u64>(),
                frames in 0usize..300,
                clicks in prop::collection::vec((0.0f32..640.0, 0.0f32..510.0), 0..10)
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut session = playing();
                for _ in 0..5 {
                    session.spawn_enemy(&mut rng);
                }
                for (i, (x, y)) in clicks.iter().enumerate() {
                    session.on_pointer_down(Vec2::new(*x, *y));
                    for _ in 0..(frames / (i + 1)) {
                        session.update(MovementKeys { right: i % 2 == 0, ..MovementKeys::default() });
                    }
                }
                session.reset_round();
                prop_assert_eq!(session.score(), 0);
                prop_assert!(session.enemies().is_empty());
                prop_assert!(session.projectiles().is_empty());
                prop_assert_eq!(session.player().position, Vec2::new(320.0, 240.0));
            }

            #[test]
            fn test_live_projectiles_stay_in_bounds(
                seed in any::<u64>(),
                frames in 1usize..200,
                tx in 0.0f32..640.0,
                ty in 0.0f32..510.0
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut session = playing();
                session.spawn_enemy(&mut rng);
                for _ in 0..frames {
                    session.on_pointer_down(Vec2::new(tx, ty));
                    session.update(MovementKeys::default());
                    for p in session.projectiles() {
                        prop_assert!(p.active);
                        prop_assert!(p.position.within(WORLD_WIDTH, WORLD_HEIGHT));
                    }
                }
            }
        }
    }
}
