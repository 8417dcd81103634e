//! # Echotype
//!
//! A typewriter-effect text engine: reveal lines one character at a time
//! on a schedule, with run/pause/resume/stop/reset control.
//!
//! Echotype is a presentation-timing library, not a renderer: it decides
//! *when* each character appears and tells you through events; what you
//! draw with them is your business.
//!
//! ## Core Concepts
//!
//! - **Deterministic engine**: [`TypingEngine`] is a clock-free state
//!   machine advanced by elapsed time, so timing behavior is exactly testable
//! - **Grapheme ticks**: one tick reveals one user-perceived character;
//!   combined emoji are never torn across ticks
//! - **Synchronous events**: `update`, `line-complete`, and `complete`
//!   listeners fire in registration order on the tick that caused them
//! - **Real-time driver**: [`TypingDriver`] plays an engine back on a
//!   dedicated thread; [`create_typing_effect`] wraps both in one call
//!
//! ## Example
//!
//! ```rust
//! use echotype::{SpeedSource, TypingEngine};
//! use std::time::Duration;
//!
//! let mut engine = TypingEngine::new(
//!     ["Hello", "World"],
//!     SpeedSource::fixed(Duration::from_millis(30)),
//! );
//! engine.start();
//! engine.advance(Duration::from_millis(500));
//! assert_eq!(engine.completed_lines(), vec!["Hello", "World"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod driver;
pub mod effect;
pub mod engine;
pub mod text;

// Re-exports for convenience
pub use driver::TypingDriver;
pub use effect::{
    create_typing_effect, CharTypedCallback, CompleteCallback, EffectStatus, LineCompleteCallback,
    PrefixSpeed, TypingEffect, TypingEffectOptions,
};
pub use engine::{
    EventKind, Listener, ListenerId, SpeedFn, SpeedSource, Status, StatusInfo, TypingEngine,
    TypingEvent, MIN_TICK,
};
pub use text::{grapheme_count, graphemes, split_graphemes};
