use super::{FocusProbe, ForegroundWindow};
use objc2_app_kit::NSWorkspace;

pub struct MacOSProbe;

impl MacOSProbe {
    pub fn new() -> Self {
        Self
    }
}

impl FocusProbe for MacOSProbe {
    fn foreground_window(&self) -> Option<ForegroundWindow> {
        let workspace = unsafe { NSWorkspace::sharedWorkspace() };
        let app = unsafe { workspace.frontmostApplication() }?;
        let name = unsafe { app.localizedName() }?;

        // Window titles require the accessibility permission; the matcher
        // treats a missing title as empty text.
        Some(ForegroundWindow {
            process_name: name.to_string(),
            window_title: String::new(),
        })
    }
}
