use crate::matcher;
use crate::models::{ActiveContext, ContentRef, RuleSet};
use crate::sampler::Sampler;
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub struct WatcherConfig {
    pub poll_interval_ms: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 800,
        }
    }
}

/// Remembers the previous snapshot and reports whether a new one differs.
///
/// Equality is the ActiveContext one (case-insensitive process, exact
/// title); two identical consecutive snapshots never trigger a re-match.
#[derive(Default)]
pub struct ChangeDetector {
    last: Option<ActiveContext>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, context: &ActiveContext) -> bool {
        if self.last.as_ref() == Some(context) {
            return false;
        }
        self.last = Some(context.clone());
        true
    }
}

/// Periodic driver: samples the foreground app on a fixed cadence and, on
/// change only, runs the matcher and hands the selection to the callback.
///
/// The rule set lives behind a single swapped reference; a reload replaces
/// it wholesale and the loop picks up the new value on its next match, so
/// no lock is held across a matching pass.
pub struct WatcherService {
    config: WatcherConfig,
    running: Arc<AtomicBool>,
    rules: Arc<Mutex<Arc<RuleSet>>>,
}

impl WatcherService {
    pub fn new(rules: Arc<RuleSet>, config: WatcherConfig) -> Self {
        Self {
            config,
            running: Arc::new(AtomicBool::new(false)),
            rules: Arc::new(Mutex::new(rules)),
        }
    }

    /// Full replacement, never a partial mutation. A poisoned mutex still
    /// takes the new rules; a reload must never be silently lost.
    pub fn replace_rules(&self, rules: Arc<RuleSet>) {
        let mut guard = match self.rules.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = rules;
    }

    pub fn current_rules(&self) -> Arc<RuleSet> {
        match self.rules.lock() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn start<F>(&self, sampler: Sampler, mut on_change: F) -> thread::JoinHandle<()>
    where
        F: FnMut(&ActiveContext, &ContentRef) + Send + 'static,
    {
        self.running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let rules = Arc::clone(&self.rules);
        let interval = Duration::from_millis(self.config.poll_interval_ms);

        thread::spawn(move || {
            let mut detector = ChangeDetector::new();

            while running.load(Ordering::SeqCst) {
                let context = sampler.sample();

                if detector.observe(&context) {
                    // One reference-snapshot per tick; the guard drops
                    // before the matcher runs.
                    let snapshot = match rules.lock() {
                        Ok(guard) => Arc::clone(&guard),
                        Err(poisoned) => Arc::clone(&poisoned.into_inner()),
                    };
                    let content = matcher::select(&context, &snapshot);
                    on_change(&context, content);
                }

                thread::sleep(interval);
            }

            info!("watcher loop stopped");
        })
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentRef, MatchRule};
    use crate::platform::{FocusProbe, ForegroundWindow};
    use std::sync::atomic::AtomicUsize;

    fn rule_set(rules: Vec<MatchRule>) -> Arc<RuleSet> {
        Arc::new(RuleSet::new(rules, ContentRef::new("fallback")))
    }

    fn named_rule(process: &str, content: &str) -> MatchRule {
        MatchRule::new(
            process,
            vec![process.to_string()],
            None,
            ContentRef::new(content),
        )
    }

    /// Returns the first window for the first two calls, the second one
    /// afterwards. Models a focus change partway through the run.
    struct ScriptedProbe {
        calls: AtomicUsize,
        first: ForegroundWindow,
        second: ForegroundWindow,
    }

    impl FocusProbe for ScriptedProbe {
        fn foreground_window(&self) -> Option<ForegroundWindow> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Some(self.first.clone())
            } else {
                Some(self.second.clone())
            }
        }
    }

    #[test]
    fn test_change_detector_skips_identical_snapshots() {
        let mut detector = ChangeDetector::new();
        let context = ActiveContext::new("code.exe", "main.rs");

        assert!(detector.observe(&context));
        assert!(!detector.observe(&context));
        assert!(!detector.observe(&ActiveContext::new("CODE.EXE", "main.rs")));
        assert!(detector.observe(&ActiveContext::new("code.exe", "other.rs")));
    }

    #[test]
    fn test_change_detector_fires_on_first_snapshot() {
        let mut detector = ChangeDetector::new();
        assert!(detector.observe(&ActiveContext::empty()));
        assert!(!detector.observe(&ActiveContext::empty()));
    }

    #[test]
    fn test_watcher_starts_and_stops() {
        let watcher = WatcherService::new(
            rule_set(vec![]),
            WatcherConfig {
                poll_interval_ms: 10,
            },
        );
        let sampler = Sampler::with_probe(Box::new(ScriptedProbe {
            calls: AtomicUsize::new(0),
            first: ForegroundWindow::default(),
            second: ForegroundWindow::default(),
        }));

        assert!(!watcher.is_running());
        let handle = watcher.start(sampler, |_, _| {});
        assert!(watcher.is_running());

        thread::sleep(Duration::from_millis(50));
        watcher.stop();
        handle.join().unwrap();
        assert!(!watcher.is_running());
    }

    #[test]
    fn test_watcher_emits_only_on_focus_change() {
        let watcher = WatcherService::new(
            rule_set(vec![
                named_rule("code.exe", "vscode sheet"),
                named_rule("chrome.exe", "browser sheet"),
            ]),
            WatcherConfig {
                poll_interval_ms: 10,
            },
        );
        let sampler = Sampler::with_probe(Box::new(ScriptedProbe {
            calls: AtomicUsize::new(0),
            first: ForegroundWindow {
                process_name: "code.exe".into(),
                window_title: "main.rs".into(),
            },
            second: ForegroundWindow {
                process_name: "chrome.exe".into(),
                window_title: "docs".into(),
            },
        }));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handle = watcher.start(sampler, move |context, content| {
            sink.lock()
                .unwrap()
                .push((context.process_name.clone(), content.as_str().to_string()));
        });

        // Enough ticks to sample each window several times over.
        thread::sleep(Duration::from_millis(150));
        watcher.stop();
        handle.join().unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                ("code.exe".to_string(), "vscode sheet".to_string()),
                ("chrome.exe".to_string(), "browser sheet".to_string()),
            ]
        );
    }

    #[test]
    fn test_replace_rules_swaps_wholesale() {
        let watcher = WatcherService::new(
            rule_set(vec![named_rule("code.exe", "old sheet")]),
            WatcherConfig::default(),
        );

        let context = ActiveContext::new("code.exe", "");
        assert_eq!(
            matcher::select(&context, &watcher.current_rules()).as_str(),
            "old sheet"
        );

        watcher.replace_rules(rule_set(vec![named_rule("code.exe", "new sheet")]));
        assert_eq!(
            matcher::select(&context, &watcher.current_rules()).as_str(),
            "new sheet"
        );
    }
}
