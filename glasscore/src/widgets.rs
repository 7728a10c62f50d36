//! Custom widgets for the glass window

use egui::{Response, Sense, Ui, Widget};

use crate::theme::GlassColors;

/// Round ✕ button for the title bar. Transparent until hovered.
pub struct CloseButton {
    size: f32,
}

impl CloseButton {
    pub fn new(size: f32) -> Self {
        Self { size }
    }
}

impl Widget for CloseButton {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(self.size, self.size), Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            if response.hovered() {
                painter.circle_filled(rect.center(), self.size / 2.0, GlassColors::HOVER);
            }
            // Draw the cross with strokes; the glyph is missing from some fonts.
            let m = self.size * 0.33;
            let stroke = egui::Stroke::new(2.0, GlassColors::TEXT);
            painter.line_segment(
                [rect.left_top() + egui::vec2(m, m), rect.right_bottom() - egui::vec2(m, m)],
                stroke,
            );
            painter.line_segment(
                [rect.right_top() + egui::vec2(-m, m), rect.left_bottom() + egui::vec2(m, -m)],
                stroke,
            );
        }

        response.on_hover_text("close")
    }
}

/// Title bar contents: bold title on the left, close button on the right.
/// Returns the close button's response.
pub fn title_bar(ui: &mut Ui, title: &str, height: f32) -> Response {
    ui.allocate_ui_with_layout(
        egui::vec2(ui.available_width(), height),
        egui::Layout::left_to_right(egui::Align::Center),
        |ui| {
            ui.label(egui::RichText::new(title).heading().strong().color(GlassColors::TEXT));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add(CloseButton::new(height))
            })
            .inner
        },
    )
    .inner
}

/// Centered footer line in dimmed white
pub fn footer(ui: &mut Ui, text: &str) {
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new(text).small().color(GlassColors::FOOTER));
    });
}
