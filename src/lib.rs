pub mod config;
pub mod error;
pub mod matcher;
pub mod models;
pub mod platform;
pub mod sampler;
pub mod watcher;

pub use error::AppError;
pub use models::{ActiveContext, ContentRef, MatchRule, RuleSet};
