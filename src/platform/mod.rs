pub mod types;

pub use types::{FocusProbe, ForegroundWindow};

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "windows")]
pub mod windows;

/// Builds the probe for the current platform.
///
/// `None` means foreground-window introspection is unavailable here (no
/// supported OS, or no X server to talk to); callers surface that once at
/// startup instead of per tick.
#[cfg(target_os = "macos")]
pub fn native_probe() -> Option<Box<dyn FocusProbe>> {
    Some(Box::new(macos::MacOSProbe::new()))
}

#[cfg(target_os = "linux")]
pub fn native_probe() -> Option<Box<dyn FocusProbe>> {
    linux::LinuxProbe::new().map(|probe| Box::new(probe) as Box<dyn FocusProbe>)
}

#[cfg(target_os = "windows")]
pub fn native_probe() -> Option<Box<dyn FocusProbe>> {
    Some(Box::new(windows::WindowsProbe::new()))
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
pub fn native_probe() -> Option<Box<dyn FocusProbe>> {
    None
}
