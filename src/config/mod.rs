use crate::error::AppError;
use crate::models::{ContentRef, MatchRule, RuleSet};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const DEFAULT_POLL_INTERVAL_MS: u64 = 800;

/// User-editable JSON config, bootstrapped with example rules on first
/// run. Validation and normalization happen once here, in `rule_set`; the
/// matcher only ever sees the strongly-typed result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
    #[serde(default = "default_fallback")]
    pub fallback_html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "match", default)]
    pub matcher: MatchConfig,
    #[serde(default)]
    pub content_html: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Process image names; empty matches any process.
    #[serde(default)]
    pub exe: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_regex: Option<String>,
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_fallback() -> String {
    "<h2>ContextBuddy</h2><p>No rule matched the active app. \
     Edit your rules in config.json.</p>"
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        let rule = |name: &str, exe: &[&str], title_regex: Option<&str>, content: &str| RuleConfig {
            name: name.to_string(),
            matcher: MatchConfig {
                exe: exe.iter().map(|e| (*e).to_string()).collect(),
                title_regex: title_regex.map(str::to_string),
            },
            content_html: content.to_string(),
        };

        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            rules: vec![
                rule(
                    "VS Code – General",
                    &["Code.exe", "code.exe"],
                    Some(".*"),
                    "<h2>VS Code</h2><ul><li><b>Ctrl+P</b>: Quick Open</li>\
                     <li><b>Ctrl+Shift+P</b>: Command Palette</li>\
                     <li><b>Ctrl+D</b>: Add next match</li>\
                     <li><b>Ctrl+/</b>: Toggle comment</li></ul>",
                ),
                rule(
                    "VS Code – Extensions view",
                    &["Code.exe", "code.exe"],
                    Some(".*Extensions.*"),
                    "<h2>VS Code – Extensions</h2><ul>\
                     <li><b>Ctrl+Shift+X</b>: Search extensions</li>\
                     <li>Gear icon: enable/disable</li></ul>",
                ),
                rule(
                    "Chrome/Edge – Tabs & Nav",
                    &["chrome.exe", "msedge.exe"],
                    Some(".*"),
                    "<h2>Browser</h2><ul><li><b>Ctrl+L</b>: Address bar</li>\
                     <li><b>Ctrl+T</b> / <b>Ctrl+W</b>: New/Close tab</li>\
                     <li><b>Ctrl+Shift+T</b>: Reopen closed tab</li></ul>",
                ),
                rule(
                    "Windows Explorer – Files",
                    &["explorer.exe"],
                    Some(".*"),
                    "<h2>Explorer</h2><ul><li><b>Alt+Up</b>: Up one folder</li>\
                     <li><b>Ctrl+Shift+N</b>: New folder</li>\
                     <li><b>Alt+Enter</b>: Properties</li></ul>",
                ),
                rule(
                    "Terminal (cmd/PowerShell/WT)",
                    &["cmd.exe", "powershell.exe", "pwsh.exe", "WindowsTerminal.exe"],
                    Some(".*"),
                    "<h2>Terminal</h2><ul><li><b>Ctrl+C</b>: Cancel task</li>\
                     <li><b>Up/Down</b>: History</li>\
                     <li><b>Ctrl+Shift+C/V</b>: Copy/Paste (WT)</li></ul>",
                ),
            ],
            fallback_html: default_fallback(),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf, AppError> {
        let dirs = ProjectDirs::from("com", "contextbuddy", "ContextBuddy")
            .ok_or(AppError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.json"))
    }

    /// Writes the default config on first run; an existing file is left
    /// untouched.
    pub fn ensure(path: &Path) -> Result<(), AppError> {
        if path.exists() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&Self::default())?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Normalizes the raw config into the read-only rule set the matcher
    /// consumes. Unparseable title patterns are tolerated here (the rule
    /// survives without a title constraint), never at match time.
    pub fn rule_set(&self) -> RuleSet {
        let rules = self
            .rules
            .iter()
            .map(|r| {
                MatchRule::new(
                    r.name.clone(),
                    r.matcher.exe.clone(),
                    r.matcher.title_regex.as_deref(),
                    ContentRef::new(r.content_html.clone()),
                )
            })
            .collect();

        RuleSet::new(rules, ContentRef::new(self.fallback_html.clone()))
    }
}

/// Mtime of the config file, used by the reload poll in the binary.
pub fn modified_at(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}
