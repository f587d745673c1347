//! Ties the engine, the settings and the audio controller together.
//!
//! A [`FocusSession`] runs each engine transition and performs its audio
//! effects right away. Tick scheduling is the one effect it cannot perform, so
//! every operation hands back the `StartTicking`/`StopTicking` requests for the
//! caller's periodic handle.

use log::debug;

use crate::audio::{AmbientTrack, AudioBackend, AudioController, Sound};
use crate::engine::{Effect, Effects, TimerEngine};
use crate::settings::Settings;
use crate::Mode;

pub struct FocusSession<B: AudioBackend> {
    settings: Settings,
    engine: TimerEngine,
    audio: AudioController<B>,
}

impl<B: AudioBackend> FocusSession<B> {
    pub fn new(settings: Settings, backend: B) -> Self {
        Self {
            engine: TimerEngine::new(&settings),
            settings,
            audio: AudioController::new(backend),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn audio(&self) -> &AudioController<B> {
        &self.audio
    }

    /// Perform audio effects; return the ticker effects still to be done.
    fn run(&mut self, effects: Effects) -> Effects {
        let mut ticker = Vec::new();
        for effect in effects {
            debug!("effect {:?}", effect);
            match effect {
                Effect::StartTicking | Effect::StopTicking => ticker.push(effect),
                Effect::PlayAmbient => self.audio.play_ambient(self.engine.mode()),
                Effect::StopAmbient => self.audio.stop_ambient(),
                Effect::PlayChime => self.audio.play_sound(Sound::Chime),
            }
        }
        ticker
    }

    pub fn toggle(&mut self) -> Effects {
        let effects = self.engine.toggle();
        self.run(effects)
    }

    pub fn reset(&mut self) -> Effects {
        let effects = self.engine.reset(&self.settings);
        self.run(effects)
    }

    pub fn tick(&mut self) -> Effects {
        let effects = self.engine.tick(&self.settings);
        self.run(effects)
    }

    pub fn switch_mode(&mut self) -> Effects {
        let effects = self.engine.switch_mode(&self.settings);
        self.run(effects)
    }

    pub fn set_mode(&mut self, mode: Mode) -> Effects {
        let effects = self.engine.set_mode(mode, &self.settings);
        self.run(effects)
    }

    /// Apply a duration input edit. Returns the clamped minutes to write back
    /// into the input.
    pub fn set_duration(&mut self, mode: Mode, input: &str) -> u32 {
        let minutes = self.settings.set_minutes_from_input(mode, input);
        self.engine.duration_changed(mode, &self.settings);
        minutes
    }

    pub fn select_track(&mut self, track: AmbientTrack) {
        self.audio
            .select(track, self.engine.is_running(), self.engine.mode());
    }

    /// Flip mute, then click (audible only when un-muting).
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.audio.toggle_mute();
        self.audio.play_sound(Sound::Click);
        muted
    }

    pub fn click(&mut self) {
        self.audio.play_sound(Sound::Click);
    }
}
