//! Editor panel: line-number gutter beside a scrolling plain-text area

use egui::{Align, FontId, Layout, Rect, Sense, Ui};
use glasscore::config::EditorConfig;
use glasscore::gutter::{visible_labels, GutterMetrics, LineNumberGutter};
use glasscore::theme::GlassColors;
use glasscore::viewport::{blocks_from_galley, TextViewport, ViewportEvent};

pub struct NoteEditor {
    viewport: TextViewport,
    /// Created on the first frame, once fonts can be measured.
    gutter: Option<LineNumberGutter>,
    font: FontId,
    config: EditorConfig,
    id: egui::Id,
}

impl NoteEditor {
    pub fn new(font: FontId, config: EditorConfig) -> Self {
        Self {
            viewport: TextViewport::new(),
            gutter: None,
            font,
            config,
            id: egui::Id::new("glass_editor"),
        }
    }

    pub fn request_focus(&self, ctx: &egui::Context) {
        ctx.memory_mut(|mem| mem.request_focus(self.id));
    }

    pub fn show(&mut self, ui: &mut Ui) {
        let metrics = ui.fonts(|fonts| {
            GutterMetrics::measure(fonts, &self.font, self.config.gutter_padding, self.config.gutter_right_inset)
        });
        let line_count = self.viewport.line_count();
        let gutter = self.gutter.get_or_insert_with(|| LineNumberGutter::new(metrics, line_count));
        gutter.set_metrics(metrics);
        let margin = gutter.width();

        let area = ui.available_rect_before_wrap();
        ui.allocate_rect(area, Sense::hover());
        let text_rect = Rect::from_min_max(egui::pos2(area.left() + margin, area.top()), area.max);

        let rows = ((text_rect.height() - 2.0 * self.config.padding) / metrics.line_height).max(1.0) as usize;
        let mut text_ui = ui.child_ui(text_rect, Layout::top_down(Align::Min));
        let scroll = egui::ScrollArea::vertical()
            .id_source("glass_editor_scroll")
            .auto_shrink([false, false])
            .show(&mut text_ui, |ui| {
                egui::TextEdit::multiline(&mut self.viewport.buffer)
                    .id(self.id)
                    .font(self.font.clone())
                    .frame(false)
                    .margin(egui::vec2(self.config.padding, self.config.padding))
                    .desired_width(f32::INFINITY)
                    .desired_rows(rows)
                    .lock_focus(true)
                    .show(ui)
            });

        let viewport_rect = scroll.inner_rect;
        let offset = scroll.state.offset.y;
        // galley_pos is already scrolled; shift back to content coordinates.
        let origin_y = scroll.inner.galley_pos.y - viewport_rect.top() + offset;
        self.viewport
            .observe_frame(viewport_rect, offset, blocks_from_galley(&scroll.inner.galley, origin_y));

        for event in self.viewport.drain_events() {
            match event {
                ViewportEvent::LineCountChanged(count) => {
                    gutter.on_line_count_changed(count);
                }
                ViewportEvent::UpdateRequest(request) => {
                    let repaint = gutter.on_update_request(request, viewport_rect);
                    tracing::trace!(?repaint, "gutter update");
                }
            }
        }
        // The text was laid out with the old margin; lay it out again.
        if gutter.width() != margin {
            ui.ctx().request_repaint();
        }

        let gutter_rect = Rect::from_x_y_ranges(area.left()..=area.left() + gutter.width(), viewport_rect.y_range());
        let labels = visible_labels(self.viewport.blocks(), offset, 0.0, viewport_rect.height());
        gutter.paint(&ui.painter_at(gutter_rect), gutter_rect, &labels, &self.font, GlassColors::TEXT);
    }
}
