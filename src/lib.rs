//! Core of the focus timer: countdown engine, audio policy, task list and
//! persistence. Nothing here needs a DOM; the Yew front end lives in `main.rs`.

use std::fmt;

pub mod audio;
pub mod config;
pub mod engine;
pub mod session;
pub mod settings;
pub mod storage;
pub mod tasks;

pub use engine::{Effect, Effects, TimerEngine};
pub use session::FocusSession;
pub use settings::Settings;
pub use tasks::{Task, TaskEditor, TaskId, TaskStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Focus,
    Break,
}

impl Mode {
    pub fn other(self) -> Self {
        match self {
            Mode::Focus => Mode::Break,
            Mode::Break => Mode::Focus,
        }
    }

    /// Mode for the break checkbox state (checked means break).
    pub fn from_break_checked(checked: bool) -> Self {
        if checked {
            Mode::Break
        } else {
            Mode::Focus
        }
    }

    pub fn is_break(self) -> bool {
        self == Mode::Break
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Focus => write!(f, "focus"),
            Mode::Break => write!(f, "break"),
        }
    }
}

/// Format seconds as "MM:SS".
pub fn format_time(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Whether a key event is the space shortcut: the Space key while focus is
/// not inside an `<input>`. `active_tag` is the focused element's tag name.
pub fn is_space_shortcut(code: &str, active_tag: Option<&str>) -> bool {
    code == "Space" && !active_tag.is_some_and(|tag| tag.eq_ignore_ascii_case("input"))
}
