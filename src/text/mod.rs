//! Unicode-safe text splitting.
//!
//! A typewriter reveals one *user-perceived* character per tick. Splitting
//! on `char` boundaries would tear combined emoji and combining marks
//! across ticks, so all per-character iteration in this crate goes through
//! extended grapheme clusters.

mod graphemes;

pub use graphemes::{grapheme_count, graphemes, split_graphemes};
