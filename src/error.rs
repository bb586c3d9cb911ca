// Library errors - the binary wraps these in anyhow

use thiserror::Error;

use crate::filter::{PatternCompilationError, RuleCategory};

pub type Result<T> = std::result::Result<T, SkipperError>;

#[derive(Debug, Clone, Error)]
pub enum SkipperError {
    /// A configured rule could not be compiled. Filtering for the event is abandoned
    /// and the host should surface this to the user.
    #[error("invalid {category} rule: {source}")]
    InvalidRule {
        category: RuleCategory,
        #[source]
        source: PatternCompilationError,
    },
}

impl SkipperError {
    pub fn invalid_rule(category: RuleCategory) -> impl FnOnce(PatternCompilationError) -> Self {
        move |source| SkipperError::InvalidRule { category, source }
    }

    /// The offending rule piece, for hosts that want to highlight it.
    pub fn pattern(&self) -> &str {
        match self {
            SkipperError::InvalidRule { source, .. } => &source.pattern,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{compile, MatchMode};
    use std::error::Error;

    #[test]
    fn test_invalid_rule_display_and_source() {
        let source = compile("(unclosed", MatchMode::Regex).unwrap_err();
        let err = SkipperError::invalid_rule(RuleCategory::Song)(source);

        assert!(err.to_string().starts_with("invalid song rule: invalid pattern `(unclosed`"));
        assert_eq!(err.pattern(), "(unclosed");
        assert!(err.source().is_some());
    }
}
