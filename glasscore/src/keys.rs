//! Keyboard handling: application shortcuts and editor key cleanup

use egui::{Event, Key, KeyboardShortcut, Modifiers};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("empty shortcut")]
    Empty,
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

/// Parse a shortcut such as `"Ctrl+M"`, `"Shift+Alt+F2"` or `"Escape"`.
///
/// `Ctrl` and `Cmd` both map to egui's command modifier, which is Ctrl on
/// Linux and Windows and ⌘ on macOS.
pub fn parse_shortcut(text: &str) -> Result<KeyboardShortcut, ShortcutError> {
    let mut parts: Vec<&str> = text.split('+').map(str::trim).collect();
    let key_name = match parts.pop() {
        Some(k) if !k.is_empty() => k,
        _ => return Err(ShortcutError::Empty),
    };

    let mut modifiers = Modifiers::NONE;
    for part in parts {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" | "cmd" | "command" => modifiers.command = true,
            "alt" | "option" => modifiers.alt = true,
            "shift" => modifiers.shift = true,
            _ => return Err(ShortcutError::UnknownModifier(part.to_string())),
        }
    }

    let key = Key::from_name(key_name).ok_or_else(|| ShortcutError::UnknownKey(key_name.to_string()))?;
    Ok(KeyboardShortcut::new(modifiers, key))
}

/// A parsed shortcut together with the text it was written as.
#[derive(Debug, Clone, PartialEq)]
pub struct Shortcut {
    pub label: String,
    pub shortcut: KeyboardShortcut,
}

impl Shortcut {
    pub fn parse(text: &str) -> Result<Self, ShortcutError> {
        Ok(Self {
            label: text.trim().to_string(),
            shortcut: parse_shortcut(text)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    ToggleVisibility,
    Close,
}

/// Application-wide shortcuts. They are consumed before any widget runs,
/// so they work whichever control has focus.
#[derive(Debug, Clone, PartialEq)]
pub struct Shortcuts {
    pub toggle_visibility: Shortcut,
    pub close: Shortcut,
}

impl Shortcuts {
    pub fn parse(toggle_visibility: &str, close: &str) -> Result<Self, ShortcutError> {
        Ok(Self {
            toggle_visibility: Shortcut::parse(toggle_visibility)?,
            close: Shortcut::parse(close)?,
        })
    }

    /// Remove matching key presses from this frame's input.
    pub fn take_actions(&self, ctx: &egui::Context) -> Vec<ShortcutAction> {
        ctx.input_mut(|i| {
            let mut actions = Vec::new();
            if i.consume_shortcut(&self.toggle_visibility.shortcut) {
                actions.push(ShortcutAction::ToggleVisibility);
            }
            if i.consume_shortcut(&self.close.shortcut) {
                actions.push(ShortcutAction::Close);
            }
            actions
        })
    }

    /// Footer hint, e.g. `"Ctrl+M show/hide, Escape close"`.
    pub fn hint(&self) -> String {
        format!("{} show/hide, {} close", self.toggle_visibility.label, self.close.label)
    }
}

impl Default for Shortcuts {
    fn default() -> Self {
        Self {
            toggle_visibility: Shortcut {
                label: "Ctrl+M".into(),
                shortcut: KeyboardShortcut::new(Modifiers::COMMAND, Key::M),
            },
            close: Shortcut {
                label: "Escape".into(),
                shortcut: KeyboardShortcut::new(Modifiers::NONE, Key::Escape),
            },
        }
    }
}

/// Rewrite this frame's events for a plain-text editor.
///
/// - A bare Tab becomes `tab_spaces` spaces of text (or is dropped when 0)
/// - Cmd+/Cmd- zoom keys are dropped
///
/// egui has already moved focus for Tab by the time `update()` runs, so the
/// previously focused widget gets focus back.
pub fn normalize_editor_input(ctx: &egui::Context, tab_spaces: usize) {
    let tab_pressed = ctx.input(|i| {
        i.events.iter().any(|e| matches!(e, Event::Key { key: Key::Tab, pressed: true, .. }))
    });

    let focused_before = if tab_pressed {
        ctx.memory(|mem| mem.focused())
    } else {
        None
    };

    ctx.input_mut(|i| {
        let spaces = " ".repeat(tab_spaces);
        let mut events = Vec::with_capacity(i.events.len());
        for event in i.events.drain(..) {
            match event {
                Event::Key { key: Key::Tab, pressed, modifiers, .. } => {
                    if pressed && modifiers.is_none() && tab_spaces > 0 {
                        events.push(Event::Text(spaces.clone()));
                    }
                }
                Event::Text(text) if text.contains('\t') => {
                    if tab_spaces > 0 {
                        events.push(Event::Text(text.replace('\t', &spaces)));
                    }
                }
                Event::Key { key, modifiers, .. }
                    if modifiers.command && matches!(key, Key::Plus | Key::Minus | Key::Equals) => {}
                other => events.push(other),
            }
        }
        i.events = events;
    });

    if let Some(id) = focused_before {
        ctx.memory_mut(|mem| mem.request_focus(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ctrl_m() {
        assert_eq!(
            parse_shortcut("Ctrl+M"),
            Ok(KeyboardShortcut::new(Modifiers::COMMAND, Key::M))
        );
        assert_eq!(parse_shortcut("ctrl + m"), parse_shortcut("Ctrl+M"));
    }

    #[test]
    fn test_parse_bare_key() {
        assert_eq!(
            parse_shortcut("Escape"),
            Ok(KeyboardShortcut::new(Modifiers::NONE, Key::Escape))
        );
    }

    #[test]
    fn test_parse_multiple_modifiers() {
        let mut modifiers = Modifiers::NONE;
        modifiers.shift = true;
        modifiers.alt = true;
        assert_eq!(parse_shortcut("Shift+Alt+F2"), Ok(KeyboardShortcut::new(modifiers, Key::F2)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_shortcut(""), Err(ShortcutError::Empty));
        assert_eq!(parse_shortcut("Ctrl+"), Err(ShortcutError::Empty));
        assert_eq!(parse_shortcut("Hyper+M"), Err(ShortcutError::UnknownModifier("Hyper".into())));
        assert_eq!(parse_shortcut("Ctrl+Banana"), Err(ShortcutError::UnknownKey("Banana".into())));
    }

    #[test]
    fn test_default_matches_config_default() {
        let parsed = Shortcuts::parse("Ctrl+M", "Escape").unwrap();
        assert_eq!(parsed, Shortcuts::default());
        assert_eq!(parsed.hint(), "Ctrl+M show/hide, Escape close");
    }

    #[test]
    fn test_take_actions_consumes_shortcut() {
        let ctx = egui::Context::default();
        let shortcuts = Shortcuts::default();
        let mut raw = egui::RawInput::default();
        raw.events.push(Event::Key {
            key: Key::M,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::COMMAND,
        });

        let mut actions = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            actions = shortcuts.take_actions(ctx);
            assert!(ctx.input(|i| i.events.is_empty()));
        });
        assert_eq!(actions, vec![ShortcutAction::ToggleVisibility]);
    }

    #[test]
    fn test_tab_becomes_spaces() {
        let ctx = egui::Context::default();
        let mut raw = egui::RawInput::default();
        raw.events.push(Event::Key {
            key: Key::Tab,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::NONE,
        });
        raw.events.push(Event::Text("a\tb".into()));

        let mut events = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            normalize_editor_input(ctx, 2);
            events = ctx.input(|i| i.events.clone());
        });
        assert_eq!(events, vec![Event::Text("  ".into()), Event::Text("a  b".into())]);
    }
}
