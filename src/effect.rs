//! Convenience factory: one call from lines to live playback.
//!
//! [`create_typing_effect`] wraps the engine + driver pair behind a small
//! options struct and a reduced control surface, for callers that want a
//! typewriter without wiring listeners themselves:
//!
//! ```rust,ignore
//! use echotype::{create_typing_effect, TypingEffectOptions};
//! use std::time::Duration;
//!
//! let effect = create_typing_effect(
//!     ["Booting...", "#FAST# cached modules loaded"],
//!     TypingEffectOptions::new()
//!         .type_speed(Duration::from_millis(40))
//!         .prefix_speed("#FAST#", Duration::from_millis(8))
//!         .on_char_typed(|ch, _text, _line| print!("{ch}")),
//! );
//! ```
//!
//! Prefix rules are a preprocessing step: a line starting with a rule's
//! literal prefix has the prefix stripped from what gets typed, and that
//! rule's delay replaces the default speed for the whole line.

use crate::driver::TypingDriver;
use crate::engine::{EventKind, Status, TypingEngine, TypingEvent};
use std::time::Duration;

/// Callback for each typed character: `(ch, text_so_far, line_index)`.
pub type CharTypedCallback = Box<dyn FnMut(&str, &str, usize) + Send>;

/// Callback for each finished line: `(line, line_index)`.
pub type LineCompleteCallback = Box<dyn FnMut(&str, usize) + Send>;

/// Callback for the whole run finishing: `(completed_lines)`.
pub type CompleteCallback = Box<dyn FnMut(&[String]) + Send>;

/// A per-line speed override keyed on a literal line prefix.
///
/// The prefix itself is stripped before typing and never counted in
/// character timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixSpeed {
    /// Literal prefix that selects this rule.
    pub prefix: String,
    /// Inter-character delay for matching lines.
    pub speed: Duration,
}

impl PrefixSpeed {
    /// Rule mapping lines starting with `prefix` to `speed`.
    pub fn new(prefix: impl Into<String>, speed: Duration) -> Self {
        Self {
            prefix: prefix.into(),
            speed,
        }
    }
}

/// Options for [`create_typing_effect`].
///
/// Plain data with a `Default`; the chained setters exist so callbacks can
/// be supplied without spelling out the boxed types.
pub struct TypingEffectOptions {
    type_speed: Duration,
    prefix_speeds: Vec<PrefixSpeed>,
    on_char_typed: Option<CharTypedCallback>,
    on_line_complete: Option<LineCompleteCallback>,
    on_complete: Option<CompleteCallback>,
}

impl Default for TypingEffectOptions {
    fn default() -> Self {
        Self {
            type_speed: Duration::from_millis(50),
            prefix_speeds: Vec::new(),
            on_char_typed: None,
            on_line_complete: None,
            on_complete: None,
        }
    }
}

impl TypingEffectOptions {
    /// Default options: 50ms per character, no prefix rules, no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default inter-character delay for lines without a prefix rule.
    pub fn type_speed(mut self, delay: Duration) -> Self {
        self.type_speed = delay;
        self
    }

    /// Add a prefix rule. Rules are tried in insertion order; the first
    /// match wins.
    pub fn prefix_speed(mut self, prefix: impl Into<String>, delay: Duration) -> Self {
        self.prefix_speeds.push(PrefixSpeed::new(prefix, delay));
        self
    }

    /// Replace all prefix rules at once.
    pub fn prefix_speeds(mut self, rules: Vec<PrefixSpeed>) -> Self {
        self.prefix_speeds = rules;
        self
    }

    /// Called for every typed character with `(ch, text_so_far, line_index)`.
    pub fn on_char_typed<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str, &str, usize) + Send + 'static,
    {
        self.on_char_typed = Some(Box::new(callback));
        self
    }

    /// Called for every finished line with `(line, line_index)`.
    pub fn on_line_complete<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str, usize) + Send + 'static,
    {
        self.on_line_complete = Some(Box::new(callback));
        self
    }

    /// Called once when every line has been typed.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&[String]) + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

/// Playback status as the reduced surface reports it.
///
/// `Idle` collapses to `Stopped` here; the engine-level distinction
/// between never-started and stopped is not part of this surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectStatus {
    /// Typing is in progress.
    Running,
    /// Typing is paused.
    Paused,
    /// Typing is stopped (or never started).
    Stopped,
    /// Every line has been typed.
    Completed,
}

impl EffectStatus {
    /// Lowercase status string: `running|paused|stopped|completed`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for EffectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Status> for EffectStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Running => Self::Running,
            Status::Paused => Self::Paused,
            Status::Idle => Self::Stopped,
            Status::Completed => Self::Completed,
        }
    }
}

/// Reduced control surface over a running typewriter.
///
/// Dropping the effect stops playback and joins the typist thread.
pub struct TypingEffect {
    driver: TypingDriver,
}

impl TypingEffect {
    /// Stop typing. Progress is not cleared.
    pub fn stop(&self) {
        self.driver.stop();
    }

    /// Pause typing at the current character.
    pub fn pause(&self) {
        self.driver.pause();
    }

    /// Resume paused typing.
    pub fn resume(&self) {
        self.driver.resume();
    }

    /// Change the default speed; applies from the next line (speed is
    /// resolved once per line).
    pub fn set_speed(&self, delay: Duration) {
        self.driver.set_speed(delay);
    }

    /// Current playback status.
    pub fn status(&self) -> EffectStatus {
        self.driver.status().into()
    }
}

/// Build a typewriter over `lines` and start it immediately.
///
/// Lines matching a prefix rule are stripped of the prefix and typed at
/// that rule's speed; all others use the default `type_speed`. Callbacks
/// fire on the typist thread.
pub fn create_typing_effect<I>(lines: I, options: TypingEffectOptions) -> TypingEffect
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let TypingEffectOptions {
        type_speed,
        prefix_speeds,
        on_char_typed,
        on_line_complete,
        on_complete,
    } = options;

    let mut engine = TypingEngine::new(Vec::<String>::new(), type_speed);
    for line in lines {
        let line = line.into();
        match match_prefix(&line, &prefix_speeds) {
            Some((stripped, delay)) => {
                engine.add_line_with_speed(stripped, delay);
            }
            None => {
                engine.add_line(line);
            }
        }
    }

    if let Some(mut callback) = on_char_typed {
        engine.on(EventKind::Update, move |event| {
            if let TypingEvent::Update {
                text,
                ch: Some(ch),
                line_index,
                ..
            } = event
            {
                callback(ch, text, *line_index);
            }
        });
    }
    if let Some(mut callback) = on_line_complete {
        engine.on(EventKind::LineComplete, move |event| {
            if let TypingEvent::LineComplete {
                line, line_index, ..
            } = event
            {
                callback(line, *line_index);
            }
        });
    }
    if let Some(mut callback) = on_complete {
        engine.on(EventKind::Complete, move |event| {
            if let TypingEvent::Complete { completed_lines } = event {
                callback(completed_lines);
            }
        });
    }

    engine.start();
    TypingEffect {
        driver: TypingDriver::spawn(engine),
    }
}

/// First rule whose literal prefix starts `line`, with the prefix
/// stripped from the returned text.
fn match_prefix<'a>(line: &'a str, rules: &[PrefixSpeed]) -> Option<(&'a str, Duration)> {
    rules.iter().find_map(|rule| {
        line.strip_prefix(rule.prefix.as_str())
            .map(|rest| (rest, rule.speed))
    })
}
