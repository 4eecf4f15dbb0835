use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

use crate::session::SoundCue;

type Sound = Buffered<Decoder<BufReader<File>>>;

const CUE_VOLUME: f32 = 0.6;
const MUSIC_VOLUME: f32 = 0.3;

/// Audio manager for sound cues and background music
///
/// Every failure (no output device, missing files) degrades to silence.
pub struct AudioManager {
    output: Option<(OutputStream, OutputStreamHandle)>,
    cast: Option<Sound>,
    enemy_hit: Option<Sound>,
    wall_impact: Option<Sound>,
    music: Option<Sound>,
    music_sink: Option<Sink>,
}

impl AudioManager {
    /// Opens the default output and pre-loads everything under `asset_dir`
    pub fn new(asset_dir: &Path) -> Self {
        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(err) => {
                warn!("No audio output, continuing without sound: {err}");
                None
            }
        };

        let sounds = asset_dir.join("sounds");
        Self {
            output,
            cast: load_sound(&sounds.join("fireball_cast.wav")),
            enemy_hit: load_sound(&sounds.join("enemy_hit.wav")),
            wall_impact: load_sound(&sounds.join("fireball_hit.wav")),
            music: load_sound(&asset_dir.join("music").join("background_theme.ogg")),
            music_sink: None,
        }
    }

    /// An audio manager that never makes a sound
    pub fn silent() -> Self {
        Self {
            output: None,
            cast: None,
            enemy_hit: None,
            wall_impact: None,
            music: None,
            music_sink: None,
        }
    }

    pub fn play_cue(&self, cue: SoundCue) {
        let sound = match cue {
            SoundCue::Cast => &self.cast,
            SoundCue::EnemyHit => &self.enemy_hit,
            SoundCue::WallImpact => &self.wall_impact,
        };
        if let (Some(sound), Some((_, handle))) = (sound, &self.output) {
            // Ignore errors for sound playback - don't want to crash the game
            if let Ok(sink) = Sink::try_new(handle) {
                sink.set_volume(CUE_VOLUME);
                // Clone the buffered source (fast - just clones references)
                sink.append(sound.clone());
                sink.detach();
            }
        }
    }

    /// Starts or stops the looping background theme
    pub fn set_music(&mut self, enabled: bool) {
        if !enabled {
            if let Some(sink) = self.music_sink.take() {
                sink.stop();
            }
            return;
        }
        if self.music_sink.is_some() {
            return;
        }
        if let (Some(music), Some((_, handle))) = (&self.music, &self.output) {
            match Sink::try_new(handle) {
                Ok(sink) => {
                    sink.set_volume(MUSIC_VOLUME);
                    sink.append(music.clone().repeat_infinite());
                    self.music_sink = Some(sink);
                }
                Err(err) => warn!("Could not start music: {err}"),
            }
        }
    }

    pub fn music_playing(&self) -> bool {
        self.music_sink.is_some()
    }
}

fn load_sound(path: &Path) -> Option<Sound> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warn!("Missing sound {}: {err}", path.display());
            return None;
        }
    };
    match Decoder::new(BufReader::new(file)) {
        Ok(source) => {
            debug!("Loaded sound {}", path.display());
            Some(source.buffered())
        }
        Err(err) => {
            warn!("Could not decode {}: {err}", path.display());
            None
        }
    }
}
