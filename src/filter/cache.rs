use std::sync::Arc;

use tracing::debug;

use super::compiler::{compile, CompiledPatternSet, MatchMode, PatternCompilationError};
use super::RuleCategory;

/// Counters for one cache slot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub lookups: usize,
    pub hits: usize,
    pub compilations: usize,
}

/// Single-slot memo of the last compiled rule string for one rule category.
///
/// The slot is keyed by the exact raw string AND the match mode. Any change to
/// either one recompiles; nothing else ever invalidates it.
#[derive(Debug)]
pub struct PatternCache {
    category: RuleCategory,
    entry: Option<Arc<CompiledPatternSet>>,
    stats: CacheStats,
}

impl PatternCache {
    pub fn new(category: RuleCategory) -> Self {
        Self {
            category,
            entry: None,
            stats: CacheStats::default(),
        }
    }

    /// Compiled set for `raw`, reusing the cached one when the key is unchanged.
    ///
    /// `None` in means no rule is configured and gives `None` back without
    /// touching the slot. A blank rule string still compiles, to an empty set.
    pub fn resolve(
        &mut self,
        raw: Option<&str>,
        mode: MatchMode,
    ) -> Result<Option<Arc<CompiledPatternSet>>, PatternCompilationError> {
        let Some(raw) = raw else {
            return Ok(None);
        };

        self.stats.lookups += 1;
        if let Some(cached) = &self.entry {
            if cached.source() == raw && cached.mode() == mode {
                self.stats.hits += 1;
                return Ok(Some(Arc::clone(cached)));
            }
        }

        let compiled = Arc::new(compile(raw, mode)?);
        self.stats.compilations += 1;
        debug!(
            "Compiled {} {} rule(s) for {} ({:?} mode)",
            compiled.len(),
            self.category,
            raw,
            mode
        );
        self.entry = Some(Arc::clone(&compiled));
        Ok(Some(compiled))
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
