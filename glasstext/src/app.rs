//! GlassText window shell: glass chrome, title-bar drag, show/hide

use egui::{Context, LayerId, Margin, ViewportCommand};
use glasscore::drag::{PointerFrame, WindowDrag};
use glasscore::keys::{normalize_editor_input, ShortcutAction, Shortcuts};
use glasscore::platform;
use glasscore::theme::{paint_glass, GlassTheme};
use glasscore::visibility::{ShellEffect, ShellEvent, WindowVisibility};
use glasscore::widgets::{footer, title_bar};
use glasscore::{GlassConfig, APP_NAME};
use raw_window_handle::HasWindowHandle;

use crate::editor::NoteEditor;

pub struct GlassTextApp {
    config: GlassConfig,
    shortcuts: Shortcuts,
    editor: NoteEditor,
    drag: WindowDrag,
    visibility: WindowVisibility,
    footer: String,
}

impl GlassTextApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: GlassConfig) -> Self {
        match cc.window_handle() {
            Ok(handle) => {
                let platform = platform::detect();
                platform::apply_best_effort(platform.as_ref(), handle.as_raw(), &config.privacy);
            }
            Err(err) => tracing::debug!(%err, "no native window handle, skipping platform attributes"),
        }

        let shortcuts = config.shortcuts().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to default shortcuts");
            Shortcuts::default()
        });
        let footer = format!(
            "{} v{}    |    Shortcuts: {}",
            APP_NAME,
            env!("CARGO_PKG_VERSION"),
            shortcuts.hint()
        );

        let font = GlassTheme::default().with_editor_font_size(config.editor.font_size).editor_font();
        let editor = NoteEditor::new(font, config.editor.clone());
        editor.request_focus(&cc.egui_ctx);

        Self {
            drag: WindowDrag::new(config.window.title_bar_height),
            visibility: WindowVisibility::new(),
            shortcuts,
            editor,
            footer,
            config,
        }
    }

    fn handle_shortcuts(&mut self, ctx: &Context) {
        for action in self.shortcuts.take_actions(ctx) {
            let event = match action {
                ShortcutAction::ToggleVisibility => ShellEvent::ToggleShortcut,
                ShortcutAction::Close => ShellEvent::CloseRequested,
            };
            let effects = self.visibility.handle(event);
            self.apply_effects(ctx, effects);
        }
    }

    fn handle_window_events(&mut self, ctx: &Context) {
        let (minimized, close_requested) = ctx.input(|i| (i.viewport().minimized, i.viewport().close_requested()));
        let effects = self.visibility.observe_minimized(minimized);
        self.apply_effects(ctx, effects);
        if close_requested {
            // The OS is already closing the window; only the state changes.
            self.visibility.handle(ShellEvent::CloseRequested);
        }
    }

    /// Move the frameless window while the title bar is dragged.
    /// `over_control` is set while the pointer is on a title-bar button.
    fn handle_drag(&mut self, ctx: &Context, over_control: bool) {
        let frame = ctx.input(|i| PointerFrame {
            pressed: i.pointer.primary_pressed(),
            released: i.pointer.primary_released(),
            moved: i.events.iter().any(|e| matches!(e, egui::Event::PointerMoved(_))),
            over_control,
            local: i.pointer.latest_pos(),
            reported_origin: i.viewport().outer_rect.map(|r| r.min),
        });
        if let Some(origin) = self.drag.step(frame) {
            ctx.send_viewport_cmd(ViewportCommand::OuterPosition(origin));
        }
    }

    fn apply_effects(&mut self, ctx: &Context, effects: Vec<ShellEffect>) {
        for effect in effects {
            match viewport_command(effect, self.config.window.always_on_top) {
                Some(cmd) => ctx.send_viewport_cmd(cmd),
                None => self.editor.request_focus(ctx),
            }
        }
    }
}

/// Window-system command for a shell effect. `None` for effects handled
/// inside the UI (editor focus).
fn viewport_command(effect: ShellEffect, always_on_top: bool) -> Option<ViewportCommand> {
    let cmd = match effect {
        ShellEffect::Minimize => ViewportCommand::Minimized(true),
        ShellEffect::Restore => ViewportCommand::Minimized(false),
        ShellEffect::Show => ViewportCommand::Visible(true),
        ShellEffect::FocusWindow => ViewportCommand::Focus,
        ShellEffect::Raise => ViewportCommand::WindowLevel(if always_on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        }),
        ShellEffect::FocusEditor => return None,
        ShellEffect::Close => ViewportCommand::Close,
    };
    Some(cmd)
}

impl eframe::App for GlassTextApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        normalize_editor_input(ctx, self.config.editor.tab_spaces);
        self.handle_window_events(ctx);

        paint_glass(&ctx.layer_painter(LayerId::background()), ctx.screen_rect());

        let m = self.config.window.outer_margin;
        let spacing = self.config.window.spacing;

        let close = egui::TopBottomPanel::top("title_bar")
            .frame(GlassTheme::panel_frame(Margin { left: m, right: m, top: m, bottom: 0.0 }))
            .show_separator_line(false)
            .show(ctx, |ui| title_bar(ui, APP_NAME, self.config.window.title_bar_height))
            .inner;
        self.handle_drag(ctx, close.hovered());
        if close.clicked() {
            let effects = self.visibility.handle(ShellEvent::CloseRequested);
            self.apply_effects(ctx, effects);
        }

        egui::TopBottomPanel::bottom("footer")
            .frame(GlassTheme::panel_frame(Margin { left: m, right: m, top: 0.0, bottom: m }))
            .show_separator_line(false)
            .show(ctx, |ui| {
                footer(ui, &self.footer);
            });

        egui::CentralPanel::default()
            .frame(GlassTheme::panel_frame(Margin { left: m, right: m, top: spacing, bottom: spacing }))
            .show(ctx, |ui| {
                self.editor.show(ui);
            });
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0; 4]
    }
}
