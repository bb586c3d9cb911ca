use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the pieces of a rule string are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchMode {
    /// Case-insensitive "contains" test
    Literal,
    /// Each piece is a regular expression that must match the whole value
    Regex,
}

impl MatchMode {
    pub fn from_regex_enabled(regex_enabled: bool) -> Self {
        if regex_enabled {
            MatchMode::Regex
        } else {
            MatchMode::Literal
        }
    }
}

/// A piece of a rule string failed to compile as a regular expression.
#[derive(Debug, Clone, Error)]
#[error("invalid pattern `{pattern}`: {source}")]
pub struct PatternCompilationError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Compiled predicates for one rule string, plus the string and mode they came from.
#[derive(Debug, Clone)]
pub struct CompiledPatternSet {
    source: String,
    mode: MatchMode,
    patterns: Vec<Regex>,
}

impl CompiledPatternSet {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// An empty set means "no rule configured". It never matches anything.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Split a raw rule string into its non-empty, trimmed pieces.
pub fn split_patterns(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|piece| !piece.is_empty())
}

/// Compile every piece of `raw` under `mode`.
///
/// Literal pieces are escaped and wrapped as `.*piece.*` (case-insensitive), regex pieces
/// are anchored on both ends. Either way a predicate is a full-string match.
pub fn compile(raw: &str, mode: MatchMode) -> Result<CompiledPatternSet, PatternCompilationError> {
    let patterns = split_patterns(raw)
        .map(|piece| compile_piece(piece, mode))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompiledPatternSet {
        source: raw.to_string(),
        mode,
        patterns,
    })
}

fn compile_piece(piece: &str, mode: MatchMode) -> Result<Regex, PatternCompilationError> {
    let compiled = match mode {
        MatchMode::Literal => RegexBuilder::new(&format!("^.*{}.*$", regex::escape(piece)))
            .case_insensitive(true)
            .build(),
        // Validate the piece on its own first: anchoring can turn an unbalanced
        // piece like `a)|(b` into a valid expression.
        MatchMode::Regex => Regex::new(piece).and_then(|_| Regex::new(&format!("^(?:{piece})$"))),
    };

    compiled.map_err(|source| PatternCompilationError {
        pattern: piece.to_string(),
        source,
    })
}
