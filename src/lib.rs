// Library exports for testing
pub use app::App;
pub use audio::AudioManager;
pub use config::GameConfig;
pub use entities::{Enemy, Facing, MovementKeys, Player, Projectile, ProjectileStep, Vec2};
pub use input::InputManager;
pub use menu::MenuButton;
pub use session::{GameSession, PointerOutcome, SessionState, SoundCue};
pub use spawner::SpawnTimer;
pub use tilemap::{MapError, TileMap};

pub mod app;
pub mod audio;
pub mod config;
pub mod entities;
pub mod input;
pub mod menu;
pub mod renderer;
pub mod session;
pub mod spawner;
pub mod tilemap;
