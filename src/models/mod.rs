pub mod context;
pub mod rule;

pub use context::ActiveContext;
pub use rule::{ContentRef, MatchRule, RuleSet, TitleMatch, TitlePattern};
