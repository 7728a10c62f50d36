//! Glass theme — dark, translucent, white text
//!
//! The window itself is fully transparent; the only fill is a faint white
//! tint painted by the app, so whatever is behind the overlay shows through.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// Glass palette. Colors are premultiplied so they can be `const`.
pub struct GlassColors;

impl GlassColors {
    pub const TEXT: Color32 = Color32::WHITE;
    /// Window tint: white at alpha 40.
    pub const TINT: Color32 = Color32::from_rgba_premultiplied(40, 40, 40, 40);
    /// Window outline: white at alpha 80.
    pub const BORDER: Color32 = Color32::from_rgba_premultiplied(80, 80, 80, 80);
    /// Footer text: white at alpha 180.
    pub const FOOTER: Color32 = Color32::from_rgba_premultiplied(180, 180, 180, 180);
    /// Palette window color: rgb(30, 30, 30) at alpha 200.
    pub const WINDOW: Color32 = Color32::from_rgba_premultiplied(24, 24, 24, 200);
    pub const HOVER: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 60);
    pub const SELECTION: Color32 = Color32::from_rgba_premultiplied(70, 90, 120, 140);
}

/// Theme configuration for the overlay
pub struct GlassTheme {
    pub font_size_body: f32,
    pub font_size_title: f32,
    pub font_size_small: f32,
    pub font_size_editor: f32,
    pub item_spacing: f32,
}

impl Default for GlassTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_title: 16.0,
            font_size_small: 12.0,
            font_size_editor: 14.0,
            item_spacing: 10.0,
        }
    }
}

impl GlassTheme {
    pub fn with_editor_font_size(mut self, size: f32) -> Self {
        self.font_size_editor = size;
        self
    }

    pub fn editor_font(&self) -> FontId {
        FontId::new(self.font_size_editor, FontFamily::Monospace)
    }

    /// Apply the glass style and dark palette to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_title, FontFamily::Proportional)),
            (TextStyle::Monospace, self.editor_font()),
        ]
        .into();

        let mut visuals = Visuals::dark();
        visuals.override_text_color = Some(GlassColors::TEXT);
        visuals.window_fill = GlassColors::WINDOW;
        visuals.panel_fill = Color32::TRANSPARENT;
        visuals.faint_bg_color = Color32::TRANSPARENT;
        visuals.extreme_bg_color = Color32::TRANSPARENT;
        visuals.window_stroke = Stroke::new(1.0, GlassColors::BORDER);
        visuals.window_rounding = Rounding::ZERO;

        // The app paints its own outline; no egui shadows.
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        let flat = |ws: &mut egui::style::WidgetVisuals| {
            ws.bg_fill = Color32::TRANSPARENT;
            ws.weak_bg_fill = Color32::TRANSPARENT;
            ws.bg_stroke = Stroke::NONE;
            ws.fg_stroke = Stroke::new(1.0, GlassColors::TEXT);
        };
        flat(&mut visuals.widgets.noninteractive);
        flat(&mut visuals.widgets.inactive);
        flat(&mut visuals.widgets.active);
        visuals.widgets.hovered.weak_bg_fill = GlassColors::HOVER;
        visuals.widgets.hovered.bg_fill = GlassColors::HOVER;
        visuals.widgets.hovered.bg_stroke = Stroke::NONE;

        visuals.selection.bg_fill = GlassColors::SELECTION;
        visuals.selection.stroke = Stroke::new(1.0, GlassColors::TEXT);
        visuals.text_cursor = Stroke::new(1.5, GlassColors::TEXT);

        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.window_margin = egui::Margin::same(0.0);

        ctx.set_style(style);

        // Anti-aliased edges for the glass outline.
        ctx.options_mut(|o| o.tessellation_options.feathering = true);
    }

    /// Panel frame: nothing drawn, margins only
    pub fn panel_frame(margin: egui::Margin) -> egui::Frame {
        egui::Frame::none().fill(Color32::TRANSPARENT).inner_margin(margin)
    }
}

/// Fill the window with the glass tint and draw its 1px outline.
pub fn paint_glass(painter: &egui::Painter, rect: egui::Rect) {
    painter.rect_filled(rect, 0.0, GlassColors::TINT);
    painter.rect_stroke(rect.shrink(0.5), 0.0, Stroke::new(1.0, GlassColors::BORDER));
}
