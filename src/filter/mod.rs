// Filtering core - rule strings in, skip/remove decisions out
// Compile once per config change, match on every playback notification

pub mod cache;    // one memo slot per rule category
pub mod compiler; // rule string -> regex predicates
pub mod engine;   // which rules run for which notification
pub mod matcher;  // track vs compiled predicates

pub use cache::{CacheStats, PatternCache};
pub use compiler::{compile, split_patterns, CompiledPatternSet, MatchMode, PatternCompilationError};
pub use engine::{Action, DecisionEngine, FilterConfiguration, SkipTarget};
pub use matcher::{matches_any, matches_artists, matches_title};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which track field a rule string applies to. Each category has its own cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    Artist,
    Song,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCategory::Artist => write!(f, "artist"),
            RuleCategory::Song => write!(f, "song"),
        }
    }
}
