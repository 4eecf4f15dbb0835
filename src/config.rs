//! Gameplay tuning constants and runtime configuration.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Playfield width in world units.
pub const WORLD_WIDTH: f32 = 640.0;
/// Playfield height in world units.
pub const WORLD_HEIGHT: f32 = 510.0;
/// Edge length of one map tile in world units.
pub const TILE_SIZE: f32 = 64.0;

pub const PLAYER_START: (f32, f32) = (320.0, 240.0);
/// Distance the mage moves per held key per update.
pub const PLAYER_SPEED: f32 = 3.0;
/// Updates between mage walk frames.
pub const PLAYER_FRAME_DELAY: u32 = 10;
/// Minimum updates between two casts.
pub const FIRE_COOLDOWN_FRAMES: u32 = 30;

pub const PROJECTILE_SPEED: f32 = 5.0;
pub const PROJECTILE_FRAME_DELAY: u32 = 4;

pub const ENEMY_SPEED: f32 = 1.2;
pub const ENEMY_FRAME_DELAY: u32 = 20;
/// Distance outside the playfield at which enemies appear.
pub const ENEMY_SPAWN_MARGIN: f32 = 100.0;
/// Effective body radius of an enemy.
pub const ENEMY_HALF_WIDTH: f32 = 16.0;
/// Radius used for both projectile and player contact checks.
pub const INTERACTION_RADIUS: f32 = 30.0;

pub const DEFAULT_SPAWN_INTERVAL: Duration = Duration::from_secs(2);

/// Runtime configuration for the terminal game.
///
/// Gameplay rules are fixed by the constants above; this only carries
/// settings for the presentation layer and the session bootstrap.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Target frames per second of the main loop.
    pub fps: u32,
    pub spawn_interval: Duration,
    /// Initial state of the sound toggle.
    pub sound: bool,
    pub asset_dir: PathBuf,
    /// Optional map file replacing the built-in arena.
    pub map_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            sound: true,
            asset_dir: PathBuf::from("assets"),
            map_path: None,
            log_dir: None,
        }
    }
}

impl GameConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MAGE_FPS` - Target frame rate (default: 60, minimum 10)
    /// - `MAGE_SPAWN_INTERVAL_MS` - Enemy spawn period (default: 2000, minimum 100)
    /// - `MAGE_SOUND` - `on`/`off` (default: on)
    /// - `MAGE_ASSET_DIR` - Directory holding `sounds/` and `music/` (default: `assets`)
    /// - `MAGE_MAP` - Path to a map file
    /// - `MAGE_LOG_DIR` - Directory for `mage-arena.log`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from a key lookup. `from_env` hands in the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(fps) = read_env::<u32>(&lookup, "MAGE_FPS") {
            config.fps = fps.max(10);
        }
        if let Some(ms) = read_env::<u64>(&lookup, "MAGE_SPAWN_INTERVAL_MS") {
            config.spawn_interval = Duration::from_millis(ms.max(100));
        }
        if let Some(sound) = lookup("MAGE_SOUND").and_then(|v| parse_switch(&v)) {
            config.sound = sound;
        }
        if let Some(dir) = lookup("MAGE_ASSET_DIR") {
            config.asset_dir = PathBuf::from(dir);
        }
        config.map_path = lookup("MAGE_MAP").map(PathBuf::from);
        config.log_dir = lookup("MAGE_LOG_DIR").map(PathBuf::from);

        config
    }

    /// Duration of one frame at the configured rate.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

fn read_env<T>(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.fps, 60);
        assert_eq!(config.spawn_interval, Duration::from_secs(2));
        assert!(config.sound);
        assert!(config.map_path.is_none());
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    #[test]
    fn test_empty_lookup_gives_defaults() {
        let config = GameConfig::from_lookup(lookup(&[]));
        assert_eq!(config.fps, 60);
        assert_eq!(config.spawn_interval, DEFAULT_SPAWN_INTERVAL);
        assert_eq!(config.asset_dir, PathBuf::from("assets"));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_rates_are_clamped() {
        let config = GameConfig::from_lookup(lookup(&[
            ("MAGE_FPS", "3"),
            ("MAGE_SPAWN_INTERVAL_MS", "5"),
        ]));
        assert_eq!(config.fps, 10);
        assert_eq!(config.spawn_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_valid_values_are_read() {
        let config = GameConfig::from_lookup(lookup(&[
            ("MAGE_FPS", "30"),
            ("MAGE_SPAWN_INTERVAL_MS", "1500"),
            ("MAGE_SOUND", "off"),
            ("MAGE_ASSET_DIR", "/opt/mage"),
        ]));
        assert_eq!(config.fps, 30);
        assert_eq!(config.spawn_interval, Duration::from_millis(1500));
        assert!(!config.sound);
        assert_eq!(config.asset_dir, PathBuf::from("/opt/mage"));
    }

    #[test]
    fn test_unparsable_values_keep_defaults() {
        let config = GameConfig::from_lookup(lookup(&[
            ("MAGE_FPS", "fast"),
            ("MAGE_SPAWN_INTERVAL_MS", "-1"),
            ("MAGE_SOUND", "maybe"),
        ]));
        assert_eq!(config.fps, 60);
        assert_eq!(config.spawn_interval, DEFAULT_SPAWN_INTERVAL);
        assert!(config.sound);
    }

    #[test]
    fn test_paths_pass_through() {
        let config = GameConfig::from_lookup(lookup(&[
            ("MAGE_MAP", "maps/arena.txt"),
            ("MAGE_LOG_DIR", "/tmp/mage-logs"),
        ]));
        assert_eq!(config.map_path, Some(PathBuf::from("maps/arena.txt")));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/mage-logs")));
    }

    #[test]
    fn test_frame_duration() {
        let config = GameConfig {
            fps: 50,
            ..GameConfig::default()
        };
        assert_eq!(config.frame_duration(), Duration::from_millis(20));
    }

    #[test]
    fn test_parse_switch() {
        assert_eq!(parse_switch("ON"), Some(true));
        assert_eq!(parse_switch(" off "), Some(false));
        assert_eq!(parse_switch("0"), Some(false));
        assert_eq!(parse_switch("maybe"), None);
    }
}
