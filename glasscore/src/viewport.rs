//! Text viewport — the editable document and its on-screen geometry
//!
//! [`DocumentBuffer`] is handed to `egui::TextEdit` as its text buffer, so
//! every keystroke goes through [`egui::TextBuffer`] and the buffer can keep
//! its block (line) count current without rescanning the whole text.
//!
//! [`TextViewport`] watches the laid-out result each frame and turns buffer
//! changes, scrolling and resizing into [`ViewportEvent`]s for the gutter.

use std::ops::Range;

use egui::Rect;

use crate::gutter::UpdateRequest;

/// One logical line of text and where it sits in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    /// 0-based block index.
    pub number: usize,
    pub top: f32,
    /// Height of all wrapped rows of this block.
    pub height: f32,
    /// Plain text never folds, but the gutter honours hidden blocks.
    pub visible: bool,
}

impl Block {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Vertical extent of one laid-out row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSpan {
    pub top: f32,
    pub bottom: f32,
    pub ends_with_newline: bool,
}

/// Group wrapped rows into logical blocks.
///
/// A block closes at a row ending in a newline; the final row closes the
/// last block.
pub fn blocks_from_rows(rows: impl IntoIterator<Item = RowSpan>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut open: Option<(f32, f32)> = None;
    for row in rows {
        let (top, _) = open.unwrap_or((row.top, row.bottom));
        open = Some((top, row.bottom));
        if row.ends_with_newline {
            blocks.push(Block {
                number: blocks.len(),
                top,
                height: row.bottom - top,
                visible: true,
            });
            open = None;
        }
    }
    if let Some((top, bottom)) = open {
        blocks.push(Block {
            number: blocks.len(),
            top,
            height: bottom - top,
            visible: true,
        });
    }
    blocks
}

/// Blocks of a laid-out galley, shifted so `origin_y` is the galley top.
pub fn blocks_from_galley(galley: &egui::Galley, origin_y: f32) -> Vec<Block> {
    blocks_from_rows(galley.rows.iter().map(|row| RowSpan {
        top: origin_y + row.rect.min.y,
        bottom: origin_y + row.rect.max.y,
        ends_with_newline: row.ends_with_newline,
    }))
}

/// Number of blocks in `text`. An empty document still has one.
pub fn count_blocks(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

/// Byte offset of the `char_index`-th character, clamped to the end.
fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// What happened to the buffer since the last [`DocumentBuffer::take_changes`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferChanges {
    pub edited: bool,
    pub line_count_changed: bool,
}

/// The note text. Lives only as long as the window.
#[derive(Debug, Clone)]
pub struct DocumentBuffer {
    text: String,
    line_count: usize,
    changes: BufferChanges,
}

impl Default for DocumentBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuffer {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            line_count: 1,
            changes: BufferChanges::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Return and reset the pending change flags.
    pub fn take_changes(&mut self) -> BufferChanges {
        std::mem::take(&mut self.changes)
    }

    fn adjust_lines(&mut self, added: usize, removed: usize) {
        self.changes.edited = true;
        if added != removed {
            self.line_count = self.line_count + added - removed;
            self.changes.line_count_changed = true;
        }
    }
}

impl egui::TextBuffer for DocumentBuffer {
    fn is_mutable(&self) -> bool {
        true
    }

    fn as_str(&self) -> &str {
        &self.text
    }

    fn insert_text(&mut self, text: &str, char_index: usize) -> usize {
        if text.is_empty() {
            return 0;
        }
        let at = byte_index(&self.text, char_index);
        self.text.insert_str(at, text);
        self.adjust_lines(count_blocks(text) - 1, 0);
        text.chars().count()
    }

    fn delete_char_range(&mut self, char_range: Range<usize>) {
        if char_range.start >= char_range.end {
            return;
        }
        let start = byte_index(&self.text, char_range.start);
        let end = byte_index(&self.text, char_range.end);
        if start == end {
            return;
        }
        let removed = count_blocks(&self.text[start..end]) - 1;
        self.text.replace_range(start..end, "");
        self.adjust_lines(0, removed);
    }
}

/// Notifications from the viewport to the gutter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    /// The number of blocks changed to this value.
    LineCountChanged(usize),
    /// Part of the viewport was scrolled or damaged.
    UpdateRequest(UpdateRequest),
}

/// The editable document plus what the viewport looked like last frame.
#[derive(Debug, Default)]
pub struct TextViewport {
    pub buffer: DocumentBuffer,
    viewport_rect: Option<Rect>,
    scroll_offset: f32,
    blocks: Vec<Block>,
    events: Vec<ViewportEvent>,
}

impl TextViewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Block geometry from the most recent frame.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Record this frame's layout and queue the notifications it implies.
    ///
    /// `viewport` is the visible text area in screen coordinates,
    /// `scroll_offset` the vertical scroll, `blocks` the geometry in
    /// content coordinates.
    pub fn observe_frame(&mut self, viewport: Rect, scroll_offset: f32, blocks: Vec<Block>) {
        let changes = self.buffer.take_changes();
        if changes.line_count_changed {
            self.events.push(ViewportEvent::LineCountChanged(self.buffer.line_count()));
        }

        let previous = self.viewport_rect.replace(viewport);
        let scrolled = previous.is_some() && scroll_offset != self.scroll_offset;
        if scrolled {
            self.events.push(ViewportEvent::UpdateRequest(UpdateRequest {
                rect: viewport,
                dy: self.scroll_offset - scroll_offset,
            }));
        } else if changes.edited || previous != Some(viewport) {
            self.events.push(ViewportEvent::UpdateRequest(UpdateRequest { rect: viewport, dy: 0.0 }));
        }

        self.scroll_offset = scroll_offset;
        self.blocks = blocks;
    }

    /// Hand the queued notifications to the caller.
    pub fn drain_events(&mut self) -> Vec<ViewportEvent> {
        std::mem::take(&mut self.events)
    }
}
