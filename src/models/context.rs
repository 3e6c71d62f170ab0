/// Snapshot of the application currently holding input focus.
///
/// A new instance is produced on every sampling tick and never mutated.
/// Both fields may be empty: an OS query failure is reported as an empty
/// context rather than an error.
#[derive(Debug, Clone, Default, Eq)]
pub struct ActiveContext {
    pub process_name: String,
    pub window_title: String,
}

impl ActiveContext {
    pub fn new(process_name: impl Into<String>, window_title: impl Into<String>) -> Self {
        Self {
            process_name: process_name.into(),
            window_title: window_title.into(),
        }
    }

    /// The "nothing could be sampled" context.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.process_name.is_empty() && self.window_title.is_empty()
    }
}

/// Process names compare case-insensitively, titles exactly. This equality
/// is what the watcher uses to decide whether focus actually changed.
impl PartialEq for ActiveContext {
    fn eq(&self, other: &Self) -> bool {
        self.process_name.eq_ignore_ascii_case(&other.process_name)
            && self.window_title == other.window_title
    }
}
