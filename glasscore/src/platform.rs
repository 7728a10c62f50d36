//! Platform capabilities: blur, capture exclusion, switcher hiding
//!
//! Only Windows exposes these window attributes. Every other platform gets
//! [`NoopPlatform`]. The variant is picked once by [`detect`], so the window
//! code never checks which OS it runs on.
//!
//! All three calls are best-effort. They report failure through
//! [`PlatformError`], and [`apply_best_effort`] is the one place that
//! deliberately drops those errors.

use raw_window_handle::RawWindowHandle;
use thiserror::Error;

use crate::config::PrivacyConfig;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("window handle is not a {expected} handle")]
    UnsupportedHandle { expected: &'static str },
    #[error("{operation} failed with code {code:#x}")]
    Os { operation: &'static str, code: i32 },
}

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Window attributes the overlay asks the OS for after creation.
pub trait PlatformCapabilities {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn enable_background_blur(&self, window: RawWindowHandle) -> Result<()>;

    /// Make screen capture and screen sharing render the window as absent.
    fn exclude_from_screen_capture(&self, window: RawWindowHandle) -> Result<()>;

    /// Remove the window from task switchers and the taskbar. The window
    /// stays visible and interactive.
    fn hide_from_switcher_and_capture(&self, window: RawWindowHandle) -> Result<()>;
}

/// Platforms without any of these attributes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPlatform;

impl PlatformCapabilities for NoopPlatform {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn enable_background_blur(&self, _window: RawWindowHandle) -> Result<()> {
        Ok(())
    }

    fn exclude_from_screen_capture(&self, _window: RawWindowHandle) -> Result<()> {
        Ok(())
    }

    fn hide_from_switcher_and_capture(&self, _window: RawWindowHandle) -> Result<()> {
        Ok(())
    }
}

#[cfg(windows)]
pub use self::windows::WindowsPlatform;

#[cfg(windows)]
mod windows {
    use raw_window_handle::RawWindowHandle;
    use windows_sys::Win32::Foundation::{FALSE, HWND, TRUE};
    use windows_sys::Win32::Graphics::Dwm::{DwmEnableBlurBehindWindow, DWM_BB_ENABLE, DWM_BLURBEHIND};
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        SetWindowDisplayAffinity, SetWindowPos, GWL_EXSTYLE, SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE,
        SWP_NOSIZE, SWP_NOZORDER, WDA_EXCLUDEFROMCAPTURE, WS_EX_APPWINDOW, WS_EX_TOOLWINDOW,
    };

    use super::{switcher_hidden_style, PlatformCapabilities, PlatformError, Result};

    /// Windows 10 2004+ for capture exclusion; DWM for blur.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct WindowsPlatform;

    fn hwnd(window: RawWindowHandle) -> Result<HWND> {
        match window {
            RawWindowHandle::Win32(handle) => Ok(handle.hwnd.get() as HWND),
            _ => Err(PlatformError::UnsupportedHandle { expected: "Win32" }),
        }
    }

    fn check_hresult(operation: &'static str, hr: i32) -> Result<()> {
        if hr < 0 {
            Err(PlatformError::Os { operation, code: hr })
        } else {
            Ok(())
        }
    }

    fn last_error(operation: &'static str) -> PlatformError {
        let code = std::io::Error::last_os_error().raw_os_error().unwrap_or(-1);
        PlatformError::Os { operation, code }
    }

    // The *Ptr variants only exist on 64-bit targets.
    #[cfg(target_pointer_width = "64")]
    unsafe fn ex_style(hwnd: HWND) -> u32 {
        windows_sys::Win32::UI::WindowsAndMessaging::GetWindowLongPtrW(hwnd, GWL_EXSTYLE) as u32
    }

    #[cfg(target_pointer_width = "64")]
    unsafe fn set_ex_style(hwnd: HWND, style: u32) -> isize {
        windows_sys::Win32::UI::WindowsAndMessaging::SetWindowLongPtrW(hwnd, GWL_EXSTYLE, style as isize)
    }

    #[cfg(not(target_pointer_width = "64"))]
    unsafe fn ex_style(hwnd: HWND) -> u32 {
        windows_sys::Win32::UI::WindowsAndMessaging::GetWindowLongW(hwnd, GWL_EXSTYLE) as u32
    }

    #[cfg(not(target_pointer_width = "64"))]
    unsafe fn set_ex_style(hwnd: HWND, style: u32) -> isize {
        windows_sys::Win32::UI::WindowsAndMessaging::SetWindowLongW(hwnd, GWL_EXSTYLE, style as i32) as isize
    }

    impl PlatformCapabilities for WindowsPlatform {
        fn name(&self) -> &'static str {
            "windows"
        }

        fn enable_background_blur(&self, window: RawWindowHandle) -> Result<()> {
            let hwnd = hwnd(window)?;
            let blur = DWM_BLURBEHIND {
                dwFlags: DWM_BB_ENABLE,
                fEnable: TRUE,
                hRgnBlur: std::ptr::null_mut(),
                fTransitionOnMaximized: FALSE,
            };
            // SAFETY: hwnd comes from a live window owned by this process and
            // `blur` outlives the call.
            let hr = unsafe { DwmEnableBlurBehindWindow(hwnd, &blur) };
            check_hresult("DwmEnableBlurBehindWindow", hr)
        }

        fn exclude_from_screen_capture(&self, window: RawWindowHandle) -> Result<()> {
            let hwnd = hwnd(window)?;
            // SAFETY: plain attribute call on our own window.
            let ok = unsafe { SetWindowDisplayAffinity(hwnd, WDA_EXCLUDEFROMCAPTURE) };
            if ok == FALSE {
                return Err(last_error("SetWindowDisplayAffinity"));
            }
            Ok(())
        }

        fn hide_from_switcher_and_capture(&self, window: RawWindowHandle) -> Result<()> {
            let hwnd = hwnd(window)?;
            // SAFETY: style reads and writes on our own window; SetWindowPos
            // only asks the shell to pick up the new frame style.
            unsafe {
                let style = switcher_hidden_style(ex_style(hwnd), WS_EX_TOOLWINDOW, WS_EX_APPWINDOW);
                // A zero return is only an error when the last error is set.
                windows_sys::Win32::Foundation::SetLastError(0);
                if set_ex_style(hwnd, style) == 0 {
                    let err = last_error("SetWindowLongPtrW");
                    if !matches!(err, PlatformError::Os { code: 0, .. }) {
                        return Err(err);
                    }
                }
                let flags = SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED;
                if SetWindowPos(hwnd, std::ptr::null_mut(), 0, 0, 0, 0, flags) == FALSE {
                    return Err(last_error("SetWindowPos"));
                }
            }
            Ok(())
        }
    }
}

/// Extended window style with the tool-window bit set and the app-window
/// bit cleared, which keeps a window off the taskbar and Alt+Tab.
#[cfg_attr(not(any(windows, test)), allow(dead_code))]
fn switcher_hidden_style(style: u32, tool_window: u32, app_window: u32) -> u32 {
    (style | tool_window) & !app_window
}

/// The capabilities of the platform this binary was built for.
pub fn detect() -> Box<dyn PlatformCapabilities> {
    #[cfg(windows)]
    {
        Box::new(WindowsPlatform)
    }
    #[cfg(not(windows))]
    {
        Box::new(NoopPlatform)
    }
}

/// Which attributes were applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformReport {
    pub blur: bool,
    pub capture_excluded: bool,
    pub hidden_from_switcher: bool,
}

/// Apply every attribute enabled in `privacy`, ignoring failures.
///
/// A failed call leaves the window usable without that effect, so errors
/// are logged at debug level and otherwise discarded.
pub fn apply_best_effort(
    platform: &dyn PlatformCapabilities,
    window: RawWindowHandle,
    privacy: &PrivacyConfig,
) -> PlatformReport {
    fn attempt(name: &str, enabled: bool, call: impl FnOnce() -> Result<()>) -> bool {
        if !enabled {
            return false;
        }
        match call() {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(attribute = name, %err, "platform attribute not applied");
                false
            }
        }
    }

    let report = PlatformReport {
        blur: attempt("blur", privacy.background_blur, || platform.enable_background_blur(window)),
        capture_excluded: attempt("capture_exclusion", privacy.exclude_from_capture, || {
            platform.exclude_from_screen_capture(window)
        }),
        hidden_from_switcher: attempt("switcher_hiding", privacy.hide_from_switcher, || {
            platform.hide_from_switcher_and_capture(window)
        }),
    };
    tracing::info!(platform = platform.name(), ?report, "platform attributes");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use raw_window_handle::{RawWindowHandle, XlibWindowHandle};
    use std::cell::Cell;

    fn handle() -> RawWindowHandle {
        RawWindowHandle::Xlib(XlibWindowHandle::new(42))
    }

    /// Fails capture exclusion, counts calls.
    #[derive(Default)]
    struct FlakyPlatform {
        calls: Cell<u32>,
    }

    impl PlatformCapabilities for FlakyPlatform {
        fn name(&self) -> &'static str {
            "flaky"
        }

        fn enable_background_blur(&self, _window: RawWindowHandle) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            Ok(())
        }

        fn exclude_from_screen_capture(&self, _window: RawWindowHandle) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            Err(PlatformError::Os { operation: "SetWindowDisplayAffinity", code: 5 })
        }

        fn hide_from_switcher_and_capture(&self, _window: RawWindowHandle) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_noop_accepts_anything() {
        let noop = NoopPlatform;
        assert_eq!(noop.enable_background_blur(handle()), Ok(()));
        assert_eq!(noop.exclude_from_screen_capture(handle()), Ok(()));
        assert_eq!(noop.hide_from_switcher_and_capture(handle()), Ok(()));
    }

    #[test]
    fn test_failures_are_swallowed() {
        let platform = FlakyPlatform::default();
        let report = apply_best_effort(&platform, handle(), &PrivacyConfig::default());
        assert_eq!(platform.calls.get(), 3);
        assert_eq!(report, PlatformReport { blur: true, capture_excluded: false, hidden_from_switcher: true });
    }

    #[test]
    fn test_disabled_attributes_are_skipped() {
        let platform = FlakyPlatform::default();
        let privacy = PrivacyConfig {
            background_blur: false,
            exclude_from_capture: false,
            hide_from_switcher: true,
        };
        let report = apply_best_effort(&platform, handle(), &privacy);
        assert_eq!(platform.calls.get(), 1);
        assert_eq!(report, PlatformReport { blur: false, capture_excluded: false, hidden_from_switcher: true });
    }

    #[test]
    fn test_error_messages() {
        let err = PlatformError::Os { operation: "DwmSetWindowAttribute", code: -2147024809 };
        assert_eq!(err.to_string(), "DwmSetWindowAttribute failed with code 0x80070057");
        let err = PlatformError::UnsupportedHandle { expected: "Win32" };
        assert_eq!(err.to_string(), "window handle is not a Win32 handle");
    }

    #[test]
    fn test_switcher_style_keeps_other_bits() {
        // WS_EX_TOPMOST | WS_EX_APPWINDOW | WS_EX_LAYERED
        let style = 0x0000_0008 | 0x0004_0000 | 0x0008_0000;
        let hidden = switcher_hidden_style(style, 0x0000_0080, 0x0004_0000);
        assert_eq!(hidden, 0x0000_0008 | 0x0008_0000 | 0x0000_0080);
        assert_eq!(switcher_hidden_style(hidden, 0x0000_0080, 0x0004_0000), hidden);
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_rejects_foreign_handles() {
        let platform = WindowsPlatform;
        assert_eq!(
            platform.exclude_from_screen_capture(handle()),
            Err(PlatformError::UnsupportedHandle { expected: "Win32" })
        );
    }
}
