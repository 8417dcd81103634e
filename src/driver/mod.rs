//! Real-time playback on a dedicated thread.
//!
//! The engine itself is clock-free; [`TypingDriver`] supplies wall time.
//! It moves a [`TypingEngine`] onto a named thread, sleeps until the
//! engine's next tick deadline or an incoming control command, and
//! advances the engine by the measured elapsed time.
//!
//! ```text
//! ┌──────────────┐      Command       ┌─────────────────────┐
//! │ Caller       │ ─────────────────▶ │ Typist Thread       │
//! │ (handle)     │                    │ owns TypingEngine,  │
//! │              │ ◀───────────────── │ fires ticks,        │
//! └──────────────┘   status mirror    │ dispatches events   │
//!                    (AtomicU8)       └─────────────────────┘
//! ```
//!
//! Dropping the driver signals shutdown and joins the thread, so the
//! pending tick can never fire into a released observer set.
//!
//! [`TypingEngine`]: crate::engine::TypingEngine

mod runner;

pub use runner::TypingDriver;
