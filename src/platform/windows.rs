use super::{FocusProbe, ForegroundWindow};
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::ProcessStatus::K32GetModuleFileNameExW;
use windows::Win32::System::Threading::{OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION};
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowTextW, GetWindowThreadProcessId,
};

pub struct WindowsProbe;

impl WindowsProbe {
    pub fn new() -> Self {
        Self
    }
}

impl FocusProbe for WindowsProbe {
    fn foreground_window(&self) -> Option<ForegroundWindow> {
        unsafe {
            let hwnd = GetForegroundWindow();
            if hwnd.0 == 0 {
                return None;
            }

            let mut title_buf = [0u16; 512];
            let title_len = GetWindowTextW(hwnd, &mut title_buf).max(0) as usize;
            let window_title = String::from_utf16_lossy(&title_buf[..title_len]);

            let mut process_id: u32 = 0;
            GetWindowThreadProcessId(hwnd, Some(&mut process_id));

            // The process may exit between the two lookups; report what we
            // have rather than failing the sample.
            let process_name = if process_id == 0 {
                String::new()
            } else {
                image_name(process_id).unwrap_or_default()
            };

            Some(ForegroundWindow {
                process_name,
                window_title,
            })
        }
    }
}

/// Resolves a pid to the file name of its executable image.
unsafe fn image_name(process_id: u32) -> Option<String> {
    let handle: HANDLE =
        OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, process_id).ok()?;

    let mut path_buf = [0u16; 260];
    let len = K32GetModuleFileNameExW(handle, None, &mut path_buf) as usize;
    let _ = CloseHandle(handle);

    if len == 0 {
        return None;
    }

    let path = String::from_utf16_lossy(&path_buf[..len]);
    path.rsplit(['\\', '/']).next().map(str::to_string)
}
