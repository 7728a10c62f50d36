//! Line-number gutter
//!
//! The gutter is a fixed strip to the left of the text viewport. Its width
//! tracks the number of decimal digits in the highest line number, and the
//! numbers it paints follow the viewport's block geometry and scroll offset.
//!
//! The viewport talks to the gutter through two notifications (see
//! [`crate::viewport::ViewportEvent`]):
//!
//! - line count changed → [`LineNumberGutter::on_line_count_changed`]
//! - scrolled or damaged → [`LineNumberGutter::on_update_request`]

use egui::{Align2, Color32, FontId, Painter, Rect};

use crate::viewport::Block;

/// Space added to the digits so numbers never touch the text.
pub const DEFAULT_BASE_PADDING: f32 = 10.0;

/// Gap between the right edge of a number and the text viewport.
pub const DEFAULT_RIGHT_INSET: f32 = 5.0;

/// Number of decimal digits needed to print `n`.
///
/// Counted by repeated division so `0` still takes one column.
pub fn digit_count(n: usize) -> usize {
    let mut digits = 1;
    let mut rest = n;
    while rest >= 10 {
        rest /= 10;
        digits += 1;
    }
    digits
}

/// Font-dependent measurements the gutter needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GutterMetrics {
    pub base_padding: f32,
    /// Advance of the widest digit glyph in the editor font.
    pub digit_advance: f32,
    pub right_inset: f32,
    pub line_height: f32,
}

impl GutterMetrics {
    /// Measure the editor font. Digits are not guaranteed to share one
    /// advance in proportional fonts, so the widest of `0..=9` wins.
    pub fn measure(fonts: &egui::text::Fonts, font_id: &FontId, base_padding: f32, right_inset: f32) -> Self {
        let digit_advance = ('0'..='9')
            .map(|c| fonts.glyph_width(font_id, c))
            .fold(0.0_f32, f32::max);
        Self {
            base_padding,
            digit_advance,
            right_inset,
            line_height: fonts.row_height(font_id),
        }
    }
}

/// Gutter width for a document with `line_count` blocks.
pub fn compute_width(line_count: usize, metrics: &GutterMetrics) -> f32 {
    let digits = digit_count(line_count.max(1));
    metrics.base_padding + digits as f32 * metrics.digit_advance
}

/// A damage notification from the text viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateRequest {
    /// Damaged area in screen coordinates.
    pub rect: Rect,
    /// Vertical scroll delta. Non-zero means "shift the gutter by this much".
    pub dy: f32,
}

/// How the gutter has to be refreshed after an [`UpdateRequest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GutterRepaint {
    /// Contents moved vertically by `dy` points.
    Scroll(f32),
    /// Only the band `[top, top + height]` changed.
    Band { top: f32, height: f32 },
}

/// A line number ready to be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineLabel {
    /// 1-based line number.
    pub number: usize,
    /// Top of the block relative to the top of the viewport.
    pub top: f32,
}

/// Gutter state: current metrics, the line count it was sized for, and
/// the resulting width.
#[derive(Debug, Clone)]
pub struct LineNumberGutter {
    metrics: GutterMetrics,
    line_count: usize,
    width: f32,
}

impl LineNumberGutter {
    pub fn new(metrics: GutterMetrics, line_count: usize) -> Self {
        Self {
            metrics,
            line_count,
            width: compute_width(line_count, &metrics),
        }
    }

    /// Current width, which is also the left margin of the text viewport.
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn metrics(&self) -> &GutterMetrics {
        &self.metrics
    }

    /// Replace the font metrics (font size or family changed).
    /// Returns `true` if the width changed.
    pub fn set_metrics(&mut self, metrics: GutterMetrics) -> bool {
        if self.metrics == metrics {
            return false;
        }
        self.metrics = metrics;
        self.update_width()
    }

    /// The block count changed. Returns the new left margin.
    pub fn on_line_count_changed(&mut self, line_count: usize) -> f32 {
        self.line_count = line_count;
        self.update_width();
        self.width
    }

    /// The viewport scrolled or was damaged.
    ///
    /// A damage rectangle covering the whole viewport may hide a digit
    /// count change, so the width is recomputed in that case too.
    pub fn on_update_request(&mut self, request: UpdateRequest, viewport: Rect) -> GutterRepaint {
        if request.rect.contains_rect(viewport) {
            self.update_width();
        }
        if request.dy != 0.0 {
            GutterRepaint::Scroll(request.dy)
        } else {
            GutterRepaint::Band {
                top: request.rect.top(),
                height: request.rect.height(),
            }
        }
    }

    /// Recompute the width from the stored line count.
    /// Returns `true` if it changed.
    fn update_width(&mut self) -> bool {
        let width = compute_width(self.line_count, &self.metrics);
        let changed = width != self.width;
        if changed {
            tracing::debug!(line_count = self.line_count, old = self.width, new = width, "gutter width changed");
        }
        self.width = width;
        changed
    }

    /// Paint `labels` right-aligned inside `gutter_rect`.
    pub fn paint(&self, painter: &Painter, gutter_rect: Rect, labels: &[LineLabel], font_id: &FontId, color: Color32) {
        let right = gutter_rect.left() + self.width - self.metrics.right_inset;
        for label in labels {
            painter.text(
                egui::pos2(right, gutter_rect.top() + label.top),
                Align2::RIGHT_TOP,
                label.number.to_string(),
                font_id.clone(),
                color,
            );
        }
    }
}

/// Line numbers for the blocks intersecting the redraw band.
///
/// `blocks` are in document order with tops in content coordinates.
/// `clip_top` and `clip_bottom` are relative to the viewport top.
/// Traversal starts at the first block whose bottom reaches the band and
/// stops at the first block whose top is past it.
pub fn visible_labels(blocks: &[Block], scroll_offset: f32, clip_top: f32, clip_bottom: f32) -> Vec<LineLabel> {
    let mut labels = Vec::new();
    for block in blocks {
        let top = block.top - scroll_offset;
        let bottom = top + block.height;
        if top > clip_bottom {
            break;
        }
        if bottom < clip_top || !block.visible {
            continue;
        }
        labels.push(LineLabel { number: block.number + 1, top });
    }
    labels
}
