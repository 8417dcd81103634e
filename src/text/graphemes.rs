//! Grapheme cluster helpers.
//!
//! Thin wrappers over `unicode-segmentation` so the rest of the crate
//! never reaches for `str::chars` when stepping through display text.

use unicode_segmentation::UnicodeSegmentation;

/// Iterate over the extended grapheme clusters of `text` in order.
///
/// Each item is one user-perceived character: a combined emoji sequence or
/// a base character with combining marks comes out as a single item.
pub fn graphemes(text: &str) -> impl Iterator<Item = &str> {
    text.graphemes(true)
}

/// Split `text` into owned grapheme clusters.
///
/// Used when the split must outlive the source string (the engine caches
/// the split of the line currently being typed).
pub fn split_graphemes(text: &str) -> Vec<String> {
    text.graphemes(true).map(str::to_owned).collect()
}

/// Number of grapheme clusters in `text`.
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}
