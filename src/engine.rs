//! Countdown state machine for alternating focus and break intervals.
//!
//! The engine never touches the browser. Every operation returns the ordered
//! list of [`Effect`]s it needs performed (periodic tick handle, ambient music,
//! chime), and the caller executes them. Durations are read from the
//! [`Settings`] passed in, so edits take effect on the next reset or switch.

use log::{debug, info};

use crate::settings::Settings;
use crate::Mode;

/// Side effects requested by an engine transition, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Begin the one-second periodic tick.
    StartTicking,
    /// Cancel the periodic tick.
    StopTicking,
    /// Start ambient music for the current mode.
    PlayAmbient,
    /// Pause and rewind ambient music.
    StopAmbient,
    /// One-shot interval-boundary chime.
    PlayChime,
}

pub type Effects = Vec<Effect>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEngine {
    mode: Mode,
    remaining_secs: u32,
    running: bool,
}

impl TimerEngine {
    /// Paused in focus mode with the full focus duration.
    pub fn new(settings: &Settings) -> Self {
        Self {
            mode: Mode::Focus,
            remaining_secs: settings.duration_secs(Mode::Focus),
            running: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        crate::format_time(self.remaining_secs)
    }

    pub fn start(&mut self) -> Effects {
        if self.running {
            return Vec::new();
        }
        self.running = true;
        debug!("timer started in {} mode", self.mode);
        vec![Effect::StartTicking]
    }

    pub fn pause(&mut self) -> Effects {
        if !self.running {
            return Vec::new();
        }
        self.running = false;
        debug!("timer paused at {}", self.display());
        vec![Effect::StopTicking]
    }

    /// Advance by one second. A tick that arrives while paused is ignored.
    pub fn tick(&mut self, settings: &Settings) -> Effects {
        if !self.running {
            return Vec::new();
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return self.switch_mode(settings);
        }
        Vec::new()
    }

    /// Flip focus/break and keep running in the new mode.
    pub fn switch_mode(&mut self, settings: &Settings) -> Effects {
        let mut effects = self.pause();
        effects.push(Effect::StopAmbient);
        effects.push(Effect::PlayChime);

        self.mode = self.mode.other();
        self.remaining_secs = settings.duration_secs(self.mode);
        info!("switched to {} mode ({})", self.mode, self.display());

        effects.extend(self.start());
        if self.mode == Mode::Focus {
            effects.push(Effect::PlayAmbient);
        }
        effects
    }

    /// Stop, silence and refill the countdown for the current mode.
    pub fn reset(&mut self, settings: &Settings) -> Effects {
        let mut effects = self.pause();
        effects.push(Effect::StopAmbient);
        self.remaining_secs = settings.duration_secs(self.mode);
        effects
    }

    pub fn toggle(&mut self) -> Effects {
        if self.running {
            let mut effects = self.pause();
            effects.push(Effect::StopAmbient);
            effects
        } else {
            let mut effects = self.start();
            if self.mode == Mode::Focus {
                effects.push(Effect::PlayAmbient);
            }
            effects
        }
    }

    /// Select a mode explicitly (the mode checkbox). Always resets.
    pub fn set_mode(&mut self, mode: Mode, settings: &Settings) -> Effects {
        self.mode = mode;
        self.reset(settings)
    }

    /// React to an edited duration for `edited`. Only a paused engine in that
    /// same mode picks up the new value immediately.
    pub fn duration_changed(&mut self, edited: Mode, settings: &Settings) {
        if !self.running && self.mode == edited {
            self.remaining_secs = settings.duration_secs(edited);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_25_5() -> (TimerEngine, Settings) {
        let settings = Settings::new(25, 5);
        (TimerEngine::new(&settings), settings)
    }

    #[test]
    fn test_new_engine_is_paused_focus() {
        let (engine, _) = engine_25_5();
        assert_eq!(engine.mode(), Mode::Focus);
        assert_eq!(engine.remaining_secs(), 1_500);
        assert!(!engine.is_running());
        assert_eq!(engine.display(), "25:00");
    }

    #[test]
    fn test_start_twice_requests_one_ticker() {
        let (mut engine, _) = engine_25_5();
        assert_eq!(engine.start(), vec![Effect::StartTicking]);
        assert!(engine.start().is_empty());
        assert!(engine.is_running());
    }

    #[test]
    fn test_pause_when_paused_is_noop() {
        let (mut engine, _) = engine_25_5();
        assert!(engine.pause().is_empty());
        engine.start();
        assert_eq!(engine.pause(), vec![Effect::StopTicking]);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_single_tick_decrements_by_one() {
        let (mut engine, settings) = engine_25_5();
        engine.start();
        assert!(engine.tick(&settings).is_empty());
        assert_eq!(engine.remaining_secs(), 1_499);
    }

    #[test]
    fn test_tick_while_paused_is_ignored() {
        let (mut engine, settings) = engine_25_5();
        assert!(engine.tick(&settings).is_empty());
        assert_eq!(engine.remaining_secs(), 1_500);
    }

    #[test]
    fn test_full_focus_interval_switches_to_break() {
        let (mut engine, settings) = engine_25_5();
        engine.start();
        let mut switches = 0;
        for _ in 0..1_500 {
            let effects = engine.tick(&settings);
            if effects.contains(&Effect::PlayChime) {
                switches += 1;
            }
        }
        assert_eq!(switches, 1);
        assert_eq!(engine.mode(), Mode::Break);
        assert_eq!(engine.remaining_secs(), 300);
        assert!(engine.is_running());
    }

    #[test]
    fn test_switch_effects_order() {
        let (mut engine, settings) = engine_25_5();
        engine.start();
        assert_eq!(
            engine.switch_mode(&settings),
            vec![
                Effect::StopTicking,
                Effect::StopAmbient,
                Effect::PlayChime,
                Effect::StartTicking,
            ]
        );
        // Break -> focus also restarts the music.
        assert_eq!(
            engine.switch_mode(&settings),
            vec![
                Effect::StopTicking,
                Effect::StopAmbient,
                Effect::PlayChime,
                Effect::StartTicking,
                Effect::PlayAmbient,
            ]
        );
        assert_eq!(engine.mode(), Mode::Focus);
    }

    #[test]
    fn test_reset_leaves_paused_full_duration() {
        let (mut engine, settings) = engine_25_5();
        engine.start();
        for _ in 0..10 {
            engine.tick(&settings);
        }
        let effects = engine.reset(&settings);
        assert_eq!(effects, vec![Effect::StopTicking, Effect::StopAmbient]);
        assert!(!engine.is_running());
        assert_eq!(engine.mode(), Mode::Focus);
        assert_eq!(engine.remaining_secs(), 25 * 60);

        engine.set_mode(Mode::Break, &settings);
        assert_eq!(engine.remaining_secs(), 5 * 60);
        assert_eq!(engine.reset(&settings), vec![Effect::StopAmbient]);
    }

    #[test]
    fn test_toggle() {
        let (mut engine, settings) = engine_25_5();
        assert_eq!(
            engine.toggle(),
            vec![Effect::StartTicking, Effect::PlayAmbient]
        );
        assert_eq!(
            engine.toggle(),
            vec![Effect::StopTicking, Effect::StopAmbient]
        );

        engine.set_mode(Mode::Break, &settings);
        assert_eq!(engine.toggle(), vec![Effect::StartTicking]);
    }

    #[test]
    fn test_duration_edit_applies_only_to_paused_active_mode() {
        let (mut engine, mut settings) = engine_25_5();

        settings.set_minutes(Mode::Break, 10);
        engine.duration_changed(Mode::Break, &settings);
        assert_eq!(engine.remaining_secs(), 1_500);

        settings.set_minutes(Mode::Focus, 30);
        engine.duration_changed(Mode::Focus, &settings);
        assert_eq!(engine.remaining_secs(), 1_800);

        engine.start();
        settings.set_minutes(Mode::Focus, 45);
        engine.duration_changed(Mode::Focus, &settings);
        assert_eq!(engine.remaining_secs(), 1_800);
    }

    #[test]
    fn test_never_goes_negative() {
        let settings = Settings::new(1, 1);
        let mut engine = TimerEngine::new(&settings);
        engine.start();
        for _ in 0..500 {
            engine.tick(&settings);
            assert!(engine.remaining_secs() > 0);
            assert!(engine.remaining_secs() <= 60);
        }
    }
}
