//! Terminal entry point for Mage Arena.
use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::stdout;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use mage_arena::{App, AudioManager, GameConfig, InputManager, TileMap};

fn main() -> Result<()> {
    color_eyre::install()?;

    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();
    let config = GameConfig::from_env();

    let log_dir = config.log_dir.clone().unwrap_or_else(default_log_dir);
    let _guard = setup_logging(&log_dir)?;

    let map = match &config.map_path {
        Some(path) => {
            let map = TileMap::from_file(path)?;
            tracing::info!("Loaded map {} ({}x{})", path.display(), map.width(), map.height());
            map
        }
        None => TileMap::default(),
    };

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    tracing::info!(supports_keyboard_enhancement, "Terminal capabilities");

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let result = run_in_terminal(config, map, supports_keyboard_enhancement);
    // Cleanup runs even when setup or the game loop failed
    let restored = restore_terminal(supports_keyboard_enhancement);

    if let Err(err) = &result {
        tracing::error!("Game loop failed: {err}");
    }
    result.and(restored)
}

/// Enters the alternate screen and runs the game until it quits
fn run_in_terminal(
    config: GameConfig,
    map: TileMap,
    supports_keyboard_enhancement: bool,
) -> Result<()> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Enable keyboard enhancement AFTER entering alternate screen
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let audio = AudioManager::new(&config.asset_dir);
    let input = InputManager::new(supports_keyboard_enhancement);
    App::new(config, map, input, audio).run(&mut terminal)
}

/// Undoes every terminal mode change, attempting each step and reporting the first failure
fn restore_terminal(supports_keyboard_enhancement: bool) -> Result<()> {
    let mut stdout = stdout();
    let popped = if supports_keyboard_enhancement {
        execute!(stdout, PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let raw = disable_raw_mode();
    let screen = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen, Show);

    popped?;
    raw?;
    screen?;
    Ok(())
}

/// Logs go to a file so they never draw over the game
fn setup_logging(log_dir: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, "mage-arena.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}/mage-arena.log", log_dir.display());
    Ok(guard)
}

/// Get the platform-specific log directory
fn default_log_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Caches")
                .join("mage-arena")
                .join("logs");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg_cache) = std::env::var_os("XDG_CACHE_HOME") {
            return PathBuf::from(xdg_cache).join("mage-arena").join("logs");
        } else if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".cache")
                .join("mage-arena")
                .join("logs");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(local_appdata) = std::env::var_os("LOCALAPPDATA") {
            return PathBuf::from(local_appdata).join("mage-arena").join("logs");
        }
    }

    // Fallback
    std::env::temp_dir().join("mage-arena").join("logs")
}
