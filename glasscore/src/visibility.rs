//! Show/hide state of the overlay window
//!
//! Pure state machine; the app turns [`ShellEffect`]s into viewport
//! commands. Minimized is the only hidden state the overlay uses.

/// Lifecycle of the single window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Shown,
    Minimized,
    Closed,
}

/// Something that happened to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    /// The show/hide shortcut fired.
    ToggleShortcut,
    /// Close button, close shortcut or an OS close request.
    CloseRequested,
    /// The window manager minimized the window.
    ExternalMinimize,
    /// The window manager restored the window.
    ExternalRestore,
}

/// What the app has to do in response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEffect {
    Minimize,
    Restore,
    Show,
    FocusWindow,
    Raise,
    FocusEditor,
    Close,
}

/// The window's visibility and what the window manager last reported.
#[derive(Debug, Clone)]
pub struct WindowVisibility {
    state: WindowState,
    observed_minimized: Option<bool>,
}

impl Default for WindowVisibility {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowVisibility {
    pub fn new() -> Self {
        Self {
            state: WindowState::Shown,
            observed_minimized: None,
        }
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == WindowState::Closed
    }

    pub fn handle(&mut self, event: ShellEvent) -> Vec<ShellEffect> {
        use ShellEffect::*;
        use WindowState::*;

        let (next, effects) = match (self.state, event) {
            (Closed, _) => (Closed, vec![]),
            (_, ShellEvent::CloseRequested) => (Closed, vec![Close]),
            (Shown, ShellEvent::ToggleShortcut) => (Minimized, vec![Minimize]),
            (Minimized, ShellEvent::ToggleShortcut) => {
                (Shown, vec![Restore, Show, FocusWindow, Raise, FocusEditor])
            }
            (Shown, ShellEvent::ExternalMinimize) => (Minimized, vec![]),
            (Minimized, ShellEvent::ExternalRestore) => (Shown, vec![]),
            (state, _) => (state, vec![]),
        };
        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, ?event, "window state");
        }
        self.state = next;
        effects
    }

    /// Feed the minimized flag reported by the window system.
    ///
    /// Only a change of the reported value counts, so the lag between a
    /// command and the report does not bounce the state back.
    pub fn observe_minimized(&mut self, minimized: Option<bool>) -> Vec<ShellEffect> {
        let Some(minimized) = minimized else {
            return Vec::new();
        };
        if self.observed_minimized == Some(minimized) {
            return Vec::new();
        }
        let first_report = self.observed_minimized.is_none();
        self.observed_minimized = Some(minimized);
        match (minimized, first_report) {
            (true, _) => self.handle(ShellEvent::ExternalMinimize),
            (false, false) => self.handle(ShellEvent::ExternalRestore),
            (false, true) => Vec::new(),
        }
    }
}
