//! Typing speed resolution.
//!
//! Speed is resolved once per line, when the line becomes current — never
//! per character. A misbehaving caller-supplied speed function must not
//! stall or crash playback, so resolution contains panics and clamps zero
//! durations to a minimum floor.

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

/// Minimum inter-character delay. A zero (or panicking) speed resolves to
/// this floor so the next `advance` call still makes progress.
pub const MIN_TICK: Duration = Duration::from_nanos(1);

/// Per-line speed function: maps a line's full text to the delay between
/// that line's character ticks.
pub type SpeedFn = Box<dyn Fn(&str) -> Duration + Send>;

/// Where inter-character delays come from.
///
/// Either a fixed duration applied to every character of every line, or a
/// function of the line's text, invoked exactly once when the line becomes
/// the current line.
pub enum SpeedSource {
    /// The same delay for every character of every line.
    Fixed(Duration),
    /// A delay computed from each line's text.
    PerLine(SpeedFn),
}

impl SpeedSource {
    /// Fixed delay between characters.
    pub const fn fixed(delay: Duration) -> Self {
        Self::Fixed(delay)
    }

    /// Delay computed per line from the line's text.
    pub fn per_line<F>(f: F) -> Self
    where
        F: Fn(&str) -> Duration + Send + 'static,
    {
        Self::PerLine(Box::new(f))
    }

    /// Resolve the delay for `line`.
    ///
    /// Zero durations are clamped to [`MIN_TICK`]; a panic inside a
    /// per-line function is contained and also resolves to [`MIN_TICK`].
    pub fn resolve(&self, line: &str) -> Duration {
        let delay = match self {
            Self::Fixed(delay) => *delay,
            Self::PerLine(f) => {
                panic::catch_unwind(AssertUnwindSafe(|| f(line))).unwrap_or(MIN_TICK)
            }
        };
        delay.max(MIN_TICK)
    }
}

impl From<Duration> for SpeedSource {
    fn from(delay: Duration) -> Self {
        Self::Fixed(delay)
    }
}

impl std::fmt::Debug for SpeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(delay) => f.debug_tuple("Fixed").field(delay).finish(),
            Self::PerLine(_) => f.debug_tuple("PerLine").field(&"<fn>").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_resolves_same_for_all_lines() {
        let speed = SpeedSource::fixed(Duration::from_millis(25));
        assert_eq!(speed.resolve("short"), Duration::from_millis(25));
        assert_eq!(speed.resolve("a much longer line"), Duration::from_millis(25));
    }

    #[test]
    fn test_per_line_sees_line_text() {
        let speed = SpeedSource::per_line(|line| Duration::from_millis(line.len() as u64));
        assert_eq!(speed.resolve("abc"), Duration::from_millis(3));
        assert_eq!(speed.resolve("abcdef"), Duration::from_millis(6));
    }

    #[test]
    fn test_zero_duration_clamped_to_floor() {
        let speed = SpeedSource::fixed(Duration::ZERO);
        assert_eq!(speed.resolve("x"), MIN_TICK);

        let speed = SpeedSource::per_line(|_| Duration::ZERO);
        assert_eq!(speed.resolve("x"), MIN_TICK);
    }

    #[test]
    fn test_panicking_speed_fn_falls_back_to_floor() {
        let prev = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));

        let speed = SpeedSource::per_line(|_| panic!("bad speed fn"));
        let resolved = speed.resolve("x");

        std::panic::set_hook(prev);
        assert_eq!(resolved, MIN_TICK);
    }

    #[test]
    fn test_from_duration() {
        let speed: SpeedSource = Duration::from_millis(10).into();
        assert_eq!(speed.resolve(""), Duration::from_millis(10));
    }
}
