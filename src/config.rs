//! Application-level configuration constants.

// Timer behavior
pub const TICK_MS: u32 = 1_000;
pub const SECONDS_PER_MINUTE: u32 = 60;

// Default values for input fields
pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

// Min/Max limits for input fields
pub const MIN_FOCUS_MINUTES: u32 = 1;
pub const MAX_FOCUS_MINUTES: u32 = 60;
pub const MIN_BREAK_MINUTES: u32 = 1;
pub const MAX_BREAK_MINUTES: u32 = 30;

// Persistence
pub const TASKS_STORAGE_KEY: &str = "pomodoroTasks";

// Audio assets, relative to the page
pub const MUSIC_DIR: &str = "Music";
pub const CLICK_SOUND_PATH: &str = "sounds/click sound.mp3";
pub const CHIME_SOUND_PATH: &str = "sounds/bell ring.mp3";

// UI text
pub const DELETE_TASK_PROMPT: &str = "Delete this task?";
