use super::{FocusProbe, ForegroundWindow};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{AtomEnum, ConnectionExt, Window};

pub struct LinuxProbe {
    conn: x11rb::rust_connection::RustConnection,
    root: Window,
}

impl LinuxProbe {
    /// `None` when no X server is reachable (e.g. a Wayland session
    /// without XWayland); the capability flag comes from this.
    pub fn new() -> Option<Self> {
        let (conn, screen_num) = x11rb::connect(None).ok()?;
        let root = conn.setup().roots.get(screen_num)?.root;

        Some(Self { conn, root })
    }

    fn get_atom(&self, name: &str) -> Option<u32> {
        self.conn
            .intern_atom(false, name.as_bytes())
            .ok()?
            .reply()
            .ok()
            .map(|r| r.atom)
    }

    fn get_string_property(&self, window: Window, atom: u32) -> Option<String> {
        let reply = self
            .conn
            .get_property(false, window, atom, AtomEnum::ANY, 0, 1024)
            .ok()?
            .reply()
            .ok()?;

        if reply.value.is_empty() {
            return None;
        }

        String::from_utf8(reply.value).ok()
    }

    fn get_active_window_id(&self) -> Option<Window> {
        let atom = self.get_atom("_NET_ACTIVE_WINDOW")?;
        let reply = self
            .conn
            .get_property(false, self.root, atom, AtomEnum::WINDOW, 0, 1)
            .ok()?
            .reply()
            .ok()?;

        let window = reply.value32()?.next()?;
        if window == 0 {
            return None;
        }
        Some(window)
    }

    fn get_window_pid(&self, window: Window) -> Option<u32> {
        let atom = self.get_atom("_NET_WM_PID")?;
        let reply = self
            .conn
            .get_property(false, window, atom, AtomEnum::CARDINAL, 0, 1)
            .ok()?
            .reply()
            .ok()?;

        let pid = reply.value32()?.next();
        pid
    }

    /// Executable name from /proc, the closest analog of a process image
    /// name on this platform. Falls back to the first WM_CLASS token when
    /// the window does not expose a pid.
    fn get_process_name(&self, window: Window) -> Option<String> {
        if let Some(pid) = self.get_window_pid(window) {
            if let Ok(comm) = std::fs::read_to_string(format!("/proc/{pid}/comm")) {
                let comm = comm.trim();
                if !comm.is_empty() {
                    return Some(comm.to_string());
                }
            }
        }

        self.get_string_property(window, AtomEnum::WM_CLASS.into())
            .and_then(|s| s.split('\0').next().map(str::to_string))
            .filter(|s| !s.is_empty())
    }
}

impl FocusProbe for LinuxProbe {
    fn foreground_window(&self) -> Option<ForegroundWindow> {
        let window = self.get_active_window_id()?;

        let name_atom = self
            .get_atom("_NET_WM_NAME")
            .unwrap_or_else(|| AtomEnum::WM_NAME.into());

        let window_title = self
            .get_string_property(window, name_atom)
            .or_else(|| self.get_string_property(window, AtomEnum::WM_NAME.into()))
            .unwrap_or_default();

        let process_name = self.get_process_name(window).unwrap_or_default();

        Some(ForegroundWindow {
            process_name,
            window_title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires X11 display
    fn test_foreground_window() {
        let probe = LinuxProbe::new().expect("no X server");
        if let Some(window) = probe.foreground_window() {
            println!("Active: {} - {}", window.process_name, window.window_title);
        }
    }
}
