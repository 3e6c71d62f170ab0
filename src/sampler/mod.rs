use crate::models::ActiveContext;
use crate::platform::{self, FocusProbe};

/// Samples the foreground application on demand.
///
/// `sample` is total: any probe failure (no focused window, process gone
/// between lookups, permission denied) degrades to an empty context. The
/// only one-time signal is `is_supported`, answered at startup so the
/// driver can explain an unsupported platform instead of silently
/// reporting empty contexts forever.
pub struct Sampler {
    probe: Option<Box<dyn FocusProbe>>,
}

impl Sampler {
    pub fn new() -> Self {
        Self {
            probe: platform::native_probe(),
        }
    }

    /// Probe injection seam, used by tests and the dry-run plumbing.
    pub fn with_probe(probe: Box<dyn FocusProbe>) -> Self {
        Self { probe: Some(probe) }
    }

    pub fn is_supported(&self) -> bool {
        self.probe.is_some()
    }

    pub fn sample(&self) -> ActiveContext {
        match self.probe.as_ref().and_then(|p| p.foreground_window()) {
            Some(window) => ActiveContext::new(window.process_name, window.window_title),
            None => ActiveContext::empty(),
        }
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ForegroundWindow;

    struct FixedProbe(Option<ForegroundWindow>);

    impl FocusProbe for FixedProbe {
        fn foreground_window(&self) -> Option<ForegroundWindow> {
            self.0.clone()
        }
    }

    #[test]
    fn test_sample_maps_probe_result() {
        let sampler = Sampler::with_probe(Box::new(FixedProbe(Some(ForegroundWindow {
            process_name: "code.exe".into(),
            window_title: "main.rs - Code".into(),
        }))));
        let context = sampler.sample();
        assert_eq!(context.process_name, "code.exe");
        assert_eq!(context.window_title, "main.rs - Code");
    }

    #[test]
    fn test_probe_failure_degrades_to_empty_context() {
        let sampler = Sampler::with_probe(Box::new(FixedProbe(None)));
        assert!(sampler.sample().is_empty());
        assert!(sampler.is_supported());
    }

    #[test]
    fn test_sampling_never_panics_without_a_probe() {
        let sampler = Sampler { probe: None };
        assert!(!sampler.is_supported());
        assert!(sampler.sample().is_empty());
    }
}
