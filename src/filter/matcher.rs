use crate::audio::Track;

use super::compiler::CompiledPatternSet;

impl CompiledPatternSet {
    /// True if any predicate matches the whole of `value`.
    pub fn is_match(&self, value: &str) -> bool {
        self.patterns().iter().any(|pattern| pattern.is_match(value))
    }
}

/// Absent and empty sets never match.
pub fn matches_any(value: &str, set: Option<&CompiledPatternSet>) -> bool {
    match set {
        Some(set) if !set.is_empty() => set.is_match(value),
        _ => false,
    }
}

/// Artist rules see the joined form ("A, B, C"), not each artist on its own.
pub fn matches_artists(track: &Track, set: Option<&CompiledPatternSet>) -> bool {
    matches_any(&track.joined_artists(), set)
}

pub fn matches_title(track: &Track, set: Option<&CompiledPatternSet>) -> bool {
    matches_any(&track.title, set)
}
