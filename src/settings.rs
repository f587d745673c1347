//! Duration settings and the clamping rules applied to the numeric inputs.

use crate::config::{
    DEFAULT_BREAK_MINUTES, DEFAULT_FOCUS_MINUTES, MAX_BREAK_MINUTES, MAX_FOCUS_MINUTES,
    MIN_BREAK_MINUTES, MIN_FOCUS_MINUTES, SECONDS_PER_MINUTE,
};
use crate::Mode;

/// Focus and break lengths in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    focus_minutes: u32,
    break_minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl Settings {
    /// Build settings from raw values, clamping both into range.
    pub fn new(focus_minutes: i64, break_minutes: i64) -> Self {
        Self {
            focus_minutes: clamp_focus_minutes(focus_minutes),
            break_minutes: clamp_break_minutes(break_minutes),
        }
    }

    pub fn focus_minutes(&self) -> u32 {
        self.focus_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    /// Set the minutes for one mode. Returns the value actually stored.
    pub fn set_minutes(&mut self, mode: Mode, raw: i64) -> u32 {
        match mode {
            Mode::Focus => {
                self.focus_minutes = clamp_focus_minutes(raw);
                self.focus_minutes
            }
            Mode::Break => {
                self.break_minutes = clamp_break_minutes(raw);
                self.break_minutes
            }
        }
    }

    /// Parse and store the text of a duration input.
    pub fn set_minutes_from_input(&mut self, mode: Mode, input: &str) -> u32 {
        self.set_minutes(mode, parse_minutes(input, mode))
    }

    pub fn minutes(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus_minutes,
            Mode::Break => self.break_minutes,
        }
    }

    pub fn duration_secs(&self, mode: Mode) -> u32 {
        self.minutes(mode) * SECONDS_PER_MINUTE
    }
}

/// Clamp into [`MIN_FOCUS_MINUTES`, `MAX_FOCUS_MINUTES`].
pub fn clamp_focus_minutes(raw: i64) -> u32 {
    raw.clamp(MIN_FOCUS_MINUTES as i64, MAX_FOCUS_MINUTES as i64) as u32
}

/// Clamp into [`MIN_BREAK_MINUTES`, `MAX_BREAK_MINUTES`].
pub fn clamp_break_minutes(raw: i64) -> u32 {
    raw.clamp(MIN_BREAK_MINUTES as i64, MAX_BREAK_MINUTES as i64) as u32
}

/// Read the leading integer from the text of a minutes input.
///
/// Leading whitespace and one optional sign are skipped, then the leading
/// run of ASCII digits is read and everything after it is ignored ("7.9" is
/// 7, "12abc" is 12, "4e1" is 4). A run too long for `i64` saturates, so the
/// clamp still lands on the right bound. Text with no leading digits falls
/// back to the lower bound for `mode`.
pub fn parse_minutes(input: &str, mode: Mode) -> i64 {
    let trimmed = input.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    let digits = &unsigned[..len];
    if digits.is_empty() {
        return match mode {
            Mode::Focus => MIN_FOCUS_MINUTES as i64,
            Mode::Break => MIN_BREAK_MINUTES as i64,
        };
    }
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(b - b'0')))
            .unwrap_or(i64::MAX)
    });
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_clamp_bounds() {
        for raw in [-1_000, -1, 0, 1, 25, 60, 61, 9_999] {
            let v = clamp_focus_minutes(raw);
            assert!((1..=60).contains(&v), "{raw} -> {v}");
        }
        assert_eq!(clamp_focus_minutes(0), 1);
        assert_eq!(clamp_focus_minutes(61), 60);
        assert_eq!(clamp_focus_minutes(42), 42);
    }

    #[test]
    fn test_break_clamp_bounds() {
        for raw in [i64::MIN, -5, 0, 1, 5, 30, 31, i64::MAX] {
            let v = clamp_break_minutes(raw);
            assert!((1..=30).contains(&v), "{raw} -> {v}");
        }
        assert_eq!(clamp_break_minutes(45), 30);
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("25", Mode::Focus), 25);
        assert_eq!(parse_minutes(" 7.9 ", Mode::Focus), 7);
        assert_eq!(parse_minutes("-3", Mode::Break), -3);
        assert_eq!(parse_minutes("0.5", Mode::Focus), 0);
        assert_eq!(parse_minutes(".5", Mode::Break), 1);
        assert_eq!(parse_minutes("abc", Mode::Focus), 1);
        assert_eq!(parse_minutes("", Mode::Break), 1);
        assert_eq!(parse_minutes("12abc", Mode::Focus), 12);
        assert_eq!(parse_minutes("4e1", Mode::Focus), 4);
        assert_eq!(parse_minutes("+8", Mode::Break), 8);
        assert_eq!(parse_minutes("-", Mode::Focus), 1);
        assert_eq!(parse_minutes("- 3", Mode::Break), 1);
    }

    #[test]
    fn test_oversized_input_saturates_to_the_near_bound() {
        assert_eq!(parse_minutes("99999999999999999999", Mode::Focus), i64::MAX);
        assert_eq!(parse_minutes("-99999999999999999999", Mode::Break), -i64::MAX);

        let mut settings = Settings::default();
        assert_eq!(
            settings.set_minutes_from_input(Mode::Focus, "99999999999999999999"),
            60
        );
        assert_eq!(
            settings.set_minutes_from_input(Mode::Break, "99999999999999999999"),
            30
        );
        assert_eq!(
            settings.set_minutes_from_input(Mode::Break, "-99999999999999999999"),
            1
        );
        assert_eq!(settings.set_minutes_from_input(Mode::Focus, "4e1"), 4);
    }

    #[test]
    fn test_set_minutes_from_input_writes_back_clamped() {
        let mut settings = Settings::default();
        assert_eq!(settings.set_minutes_from_input(Mode::Focus, "90"), 60);
        assert_eq!(settings.set_minutes_from_input(Mode::Break, "0"), 1);
        assert_eq!(settings.duration_secs(Mode::Focus), 3_600);
        assert_eq!(settings.duration_secs(Mode::Break), 60);
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.focus_minutes(), 25);
        assert_eq!(settings.break_minutes(), 5);
        assert_eq!(Settings::new(100, -2), Settings::new(60, 1));
    }
}
