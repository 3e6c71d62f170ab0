/// Raw result of a foreground-window query, before normalization.
#[derive(Debug, Clone, Default)]
pub struct ForegroundWindow {
    pub process_name: String,
    pub window_title: String,
}

/// One read-only OS query: which window has input focus right now.
///
/// Implementations must never block beyond the OS call itself and report
/// any lookup failure as `None` rather than an error.
pub trait FocusProbe: Send {
    fn foreground_window(&self) -> Option<ForegroundWindow>;
}
