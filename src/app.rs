use color_eyre::Result;
use ratatui::{Terminal, backend::Backend};
use std::time::Instant;
use tracing::{debug, info};

use crate::audio::AudioManager;
use crate::config::GameConfig;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView, Viewport};
use crate::session::{GameSession, PointerOutcome, SessionState};
use crate::spawner::SpawnTimer;
use crate::tilemap::TileMap;

/// The main application which holds the session and the terminal plumbing.
pub struct App {
    running: bool,
    session: GameSession,
    config: GameConfig,
    spawner: SpawnTimer,
    /// Frames info
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(
        config: GameConfig,
        map: TileMap,
        input_manager: InputManager,
        audio_manager: AudioManager,
    ) -> Self {
        let mut session = GameSession::new(map);
        session.set_sound_enabled(config.sound);

        let mut app = Self {
            running: true,
            session,
            spawner: SpawnTimer::new(config.spawn_interval),
            config,
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager,
            renderer: GameRenderer::new(),
            audio_manager,
        };
        app.audio_manager.set_music(app.session.sound_enabled());
        app
    }

    /// Run the application's main loop.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let frame_duration = self.config.frame_duration();
        let mut rng = rand::rng();

        while self.running {
            let frame_start = Instant::now();
            let elapsed = frame_start.duration_since(self.last_frame_time);
            self.last_frame_time = frame_start;
            if elapsed.as_micros() > 0 {
                self.fps = (1_000_000 / elapsed.as_micros()) as u32;
            }

            let area = terminal.get_frame().area();
            let viewport = Viewport::for_terminal(area);

            // Poll input events and process one-shot actions
            self.input_manager.poll_events(self.session.state())?;
            let actions = self.input_manager.actions().to_vec();
            self.process_actions(&actions, &viewport);

            // The spawn clock runs on wall time whatever the session state
            for _ in 0..self.spawner.advance(elapsed) {
                self.session.spawn_enemy(&mut rng);
            }

            let was_playing = self.session.state() == SessionState::Playing;
            self.session.update(self.input_manager.movement());
            if was_playing && self.session.state() == SessionState::Menu {
                self.input_manager.release_all();
            }

            for cue in self.session.drain_cues() {
                self.audio_manager.play_cue(cue);
            }

            terminal.draw(|frame| {
                let view = RenderView {
                    session: &self.session,
                    area: frame.area(),
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            // Sleep off the rest of the frame to hold the target rate
            if let Some(rest) = frame_duration.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }

        info!(score = self.session.score(), "Exiting");
        Ok(())
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction], viewport: &Viewport) {
        for action in actions {
            match action {
                InputAction::Quit => self.running = false,
                InputAction::StartRound => {
                    if self.session.state() == SessionState::Menu {
                        self.session.start_round();
                    }
                }
                InputAction::ToggleSound => {
                    let enabled = !self.session.sound_enabled();
                    self.session.set_sound_enabled(enabled);
                    self.audio_manager.set_music(enabled);
                }
                InputAction::Click(column, row) => {
                    let Some(point) = viewport.to_world(*column, *row) else {
                        continue;
                    };
                    match self.session.on_pointer_down(point) {
                        PointerOutcome::Quit => self.running = false,
                        PointerOutcome::SoundToggled(enabled) => {
                            self.audio_manager.set_music(enabled)
                        }
                        PointerOutcome::FireRejected => {
                            debug!(x = point.x, y = point.y, "Cast rejected")
                        }
                        PointerOutcome::Ignored
                        | PointerOutcome::RoundStarted
                        | PointerOutcome::Fired => {}
                    }
                }
            }
        }
    }
}
