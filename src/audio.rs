//! Ambient music and one-shot sound effects.
//!
//! [`AudioController`] decides *what* should be audible; an [`AudioBackend`]
//! does the actual playback. [`HtmlAudioBackend`] drives `<audio>` elements in
//! the page.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use crate::config::{CHIME_SOUND_PATH, CLICK_SOUND_PATH, MUSIC_DIR};
use crate::Mode;

/// Looping background track selectable for focus intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbientTrack {
    BetaWaves,
    DecemberRain,
    GentleRain,
    LofiMusic,
    #[default]
    None,
}

impl AmbientTrack {
    pub const ALL: [AmbientTrack; 5] = [
        AmbientTrack::None,
        AmbientTrack::BetaWaves,
        AmbientTrack::DecemberRain,
        AmbientTrack::GentleRain,
        AmbientTrack::LofiMusic,
    ];

    /// Selector key, as used in the `<select>` options.
    pub fn key(&self) -> &'static str {
        match self {
            AmbientTrack::BetaWaves => "beta_waves",
            AmbientTrack::DecemberRain => "december_rain",
            AmbientTrack::GentleRain => "gentle_rain",
            AmbientTrack::LofiMusic => "lofi_music",
            AmbientTrack::None => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AmbientTrack::BetaWaves => "Beta Waves",
            AmbientTrack::DecemberRain => "December Rain",
            AmbientTrack::GentleRain => "Gentle Rain",
            AmbientTrack::LofiMusic => "Lofi Music",
            AmbientTrack::None => "No Music",
        }
    }

    fn file_name(&self) -> Option<&'static str> {
        match self {
            AmbientTrack::BetaWaves => Some("beta waves.mp3"),
            AmbientTrack::DecemberRain => Some("December rain.mp3"),
            AmbientTrack::GentleRain => {
                Some("lo-fi-ambient-music-with-gentle-rain-sounds-377059.mp3")
            }
            AmbientTrack::LofiMusic => Some("Lofi Music.mp3"),
            AmbientTrack::None => None,
        }
    }

    /// Relative asset path, `None` for [`AmbientTrack::None`].
    pub fn source(&self) -> Option<String> {
        self.file_name().map(|name| format!("{}/{}", MUSIC_DIR, name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ambient track: {0:?}")]
pub struct ParseTrackError(pub String);

impl FromStr for AmbientTrack {
    type Err = ParseTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AmbientTrack::ALL
            .iter()
            .copied()
            .find(|track| track.key() == s)
            .ok_or_else(|| ParseTrackError(s.to_string()))
    }
}

impl fmt::Display for AmbientTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Short non-looping effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Click,
    Chime,
}

impl Sound {
    pub fn source(&self) -> &'static str {
        match self {
            Sound::Click => CLICK_SOUND_PATH,
            Sound::Chime => CHIME_SOUND_PATH,
        }
    }
}

/// Playback primitives the controller needs.
pub trait AudioBackend {
    /// Source currently loaded on the ambient channel, if any.
    fn loaded_ambient(&self) -> Option<&str>;
    /// Load `src` on the ambient channel and mark it looping.
    fn load_ambient(&mut self, src: &str);
    /// Begin ambient playback. May fail asynchronously; failures are logged.
    fn play_ambient(&mut self);
    /// Pause ambient playback and rewind to the start.
    fn stop_ambient(&mut self);
    /// Rewind and play a one-shot effect.
    fn play_sound(&mut self, sound: Sound);
}

impl<T: AudioBackend + ?Sized> AudioBackend for Box<T> {
    fn loaded_ambient(&self) -> Option<&str> {
        (**self).loaded_ambient()
    }
    fn load_ambient(&mut self, src: &str) {
        (**self).load_ambient(src)
    }
    fn play_ambient(&mut self) {
        (**self).play_ambient()
    }
    fn stop_ambient(&mut self) {
        (**self).stop_ambient()
    }
    fn play_sound(&mut self, sound: Sound) {
        (**self).play_sound(sound)
    }
}

/// Backend that plays nothing, for pages where audio elements can't be made.
#[derive(Debug, Default)]
pub struct SilentBackend {
    ambient_src: Option<String>,
}

impl AudioBackend for SilentBackend {
    fn loaded_ambient(&self) -> Option<&str> {
        self.ambient_src.as_deref()
    }
    fn load_ambient(&mut self, src: &str) {
        self.ambient_src = Some(src.to_string());
    }
    fn play_ambient(&mut self) {}
    fn stop_ambient(&mut self) {}
    fn play_sound(&mut self, _sound: Sound) {}
}

pub struct AudioController<B: AudioBackend> {
    backend: B,
    selection: AmbientTrack,
    muted: bool,
}

impl<B: AudioBackend> AudioController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            selection: AmbientTrack::default(),
            muted: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn selection(&self) -> AmbientTrack {
        self.selection
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip the mute flag and return the new value.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        debug!("sound effects muted: {}", self.muted);
        self.muted
    }

    /// Play the selected track if the mode allows music.
    pub fn play_ambient(&mut self, mode: Mode) {
        let Some(src) = self.selection.source() else {
            self.stop_ambient();
            return;
        };
        if mode == Mode::Break {
            self.stop_ambient();
            return;
        }
        if self.backend.loaded_ambient() != Some(src.as_str()) {
            debug!("loading ambient track {}", src);
            self.backend.load_ambient(&src);
        }
        self.backend.play_ambient();
    }

    pub fn stop_ambient(&mut self) {
        self.backend.stop_ambient();
    }

    /// Change the track. Restarts playback only while focus is running.
    pub fn select(&mut self, track: AmbientTrack, running: bool, mode: Mode) {
        self.selection = track;
        if running && mode == Mode::Focus {
            self.play_ambient(mode);
        }
    }

    /// Play an effect unless muted. Mute does not affect ambient music.
    pub fn play_sound(&mut self, sound: Sound) {
        if self.muted {
            return;
        }
        self.backend.play_sound(sound);
    }
}

/// Browser playback through three `HtmlAudioElement`s.
pub struct HtmlAudioBackend {
    ambient: HtmlAudioElement,
    ambient_src: Option<String>,
    click: HtmlAudioElement,
    chime: HtmlAudioElement,
}

impl HtmlAudioBackend {
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self {
            ambient: HtmlAudioElement::new()?,
            ambient_src: None,
            click: HtmlAudioElement::new_with_src(Sound::Click.source())?,
            chime: HtmlAudioElement::new_with_src(Sound::Chime.source())?,
        })
    }

    fn element(&self, sound: Sound) -> &HtmlAudioElement {
        match sound {
            Sound::Click => &self.click,
            Sound::Chime => &self.chime,
        }
    }
}

/// Await a `play()` promise off the call stack; rejection is only logged
/// (typically autoplay blocked before the first user interaction).
fn spawn_play(element: &HtmlAudioElement, what: String) {
    let promise = match element.play() {
        Ok(promise) => promise,
        Err(e) => {
            warn!("{} failed to start: {:?}", what, e);
            return;
        }
    };
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            warn!("{} failed (interaction needed?): {:?}", what, e);
        }
    });
}

impl AudioBackend for HtmlAudioBackend {
    fn loaded_ambient(&self) -> Option<&str> {
        self.ambient_src.as_deref()
    }

    fn load_ambient(&mut self, src: &str) {
        self.ambient.set_src(src);
        self.ambient.set_loop(true);
        self.ambient_src = Some(src.to_string());
    }

    fn play_ambient(&mut self) {
        let what = format!(
            "ambient track {}",
            self.ambient_src.as_deref().unwrap_or("<none>")
        );
        spawn_play(&self.ambient, what);
    }

    fn stop_ambient(&mut self) {
        // pause() only errors on a detached element; nothing to recover
        let _ = self.ambient.pause();
        self.ambient.set_current_time(0.0);
    }

    fn play_sound(&mut self, sound: Sound) {
        let element = self.element(sound);
        element.set_current_time(0.0);
        spawn_play(element, format!("{:?} sound", sound));
    }
}
