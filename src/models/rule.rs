use log::warn;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// The exact pattern the scoring heuristic treats as "matches anything".
const UNIVERSAL_PATTERN: &str = ".*";

/// Opaque handle to an authored cheat-sheet payload. The core never looks
/// inside it; only the presentation layer gives it meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRef(String);

impl ContentRef {
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compiled form of a rule's optional title constraint.
///
/// Patterns match case-insensitively and are anchored at the start of the
/// title. A pattern that fails to compile is kept in `Invalid` form: it
/// never disqualifies the rule and contributes nothing to its score.
#[derive(Debug, Clone)]
pub enum TitlePattern {
    None,
    Valid { source: String, regex: Regex },
    Invalid { source: String },
}

impl TitlePattern {
    pub fn compile(source: Option<&str>) -> Self {
        let Some(source) = source else {
            return Self::None;
        };
        match RegexBuilder::new(&format!("^(?:{source})"))
            .case_insensitive(true)
            .build()
        {
            Ok(regex) => Self::Valid {
                source: source.to_string(),
                regex,
            },
            Err(err) => {
                warn!("ignoring unparseable title pattern {source:?}: {err}");
                Self::Invalid {
                    source: source.to_string(),
                }
            }
        }
    }
}

/// Outcome of testing a title against a rule's pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleMatch {
    Matched,
    NotMatched,
    /// No pattern, or a pattern that failed to compile. Either way the
    /// title places no constraint on the rule.
    NoConstraint,
}

/// One authored cheat-sheet binding.
#[derive(Debug, Clone)]
pub struct MatchRule {
    /// Human label, not consulted during matching.
    pub name: String,
    /// Lowercased at construction; empty means "any process".
    process_names: Vec<String>,
    title_pattern: TitlePattern,
    pub content: ContentRef,
}

impl MatchRule {
    pub fn new(
        name: impl Into<String>,
        process_names: Vec<String>,
        title_pattern: Option<&str>,
        content: ContentRef,
    ) -> Self {
        Self {
            name: name.into(),
            process_names: process_names
                .into_iter()
                .map(|p| p.to_lowercase())
                .collect(),
            title_pattern: TitlePattern::compile(title_pattern),
            content,
        }
    }

    /// `process_lower` must already be lowercased by the caller.
    pub fn applies_to_process(&self, process_lower: &str) -> bool {
        self.process_names.is_empty() || self.process_names.iter().any(|p| p == process_lower)
    }

    pub fn title_match(&self, title: &str) -> TitleMatch {
        match &self.title_pattern {
            TitlePattern::None | TitlePattern::Invalid { .. } => TitleMatch::NoConstraint,
            TitlePattern::Valid { regex, .. } => {
                if regex.is_match(title) {
                    TitleMatch::Matched
                } else {
                    TitleMatch::NotMatched
                }
            }
        }
    }

    /// Heuristic ranking so the most targeted rule beats broad catch-alls:
    /// base 0, +10 plus the pattern's character length for a valid,
    /// non-universal title pattern, +1 for naming specific processes.
    pub fn specificity(&self) -> usize {
        let mut score = 0;
        if let TitlePattern::Valid { source, .. } = &self.title_pattern {
            if source != UNIVERSAL_PATTERN {
                score += 10 + source.chars().count();
            }
        }
        if !self.process_names.is_empty() {
            score += 1;
        }
        score
    }
}

/// Ordered rules plus the content shown when nothing matches. Replaced
/// wholesale on reload, never mutated in place.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<MatchRule>,
    fallback: ContentRef,
}

impl RuleSet {
    pub fn new(rules: Vec<MatchRule>, fallback: ContentRef) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[MatchRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &ContentRef {
        &self.fallback
    }
}
