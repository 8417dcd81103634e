//! The typing state machine and its supporting types.
//!
//! [`TypingEngine`] is the core of the crate: a deterministic,
//! clock-free state machine over four states:
//!
//! ```text
//!             start()                    queue exhausted
//!   Idle ───────────────▶ Running ─────────────────────▶ Completed
//!    ▲                    │     ▲                            │
//!    │        pause()     ▼     │ resume() / start()         │ start()
//!    │                    Paused┘                            │
//!    └─── stop() / reset() from any state ◀──────────────────┘
//! ```
//!
//! Time is supplied by the caller through [`TypingEngine::advance`]; each
//! elapsed tick reveals one grapheme and notifies listeners synchronously.
//! Real-time playback lives in [`crate::driver`].

mod core;
mod events;
mod speed;

pub use self::core::{Status, StatusInfo, TypingEngine};
pub use events::{EventKind, Listener, ListenerId, TypingEvent};
pub use speed::{SpeedFn, SpeedSource, MIN_TICK};
