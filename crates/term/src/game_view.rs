//! GameView: maps an engine's screen and scoreboard into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{CellPaint, Details, Engine, GridRenderer, Screen};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Edge;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything the view needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct GameFrame<'a> {
    pub screen: &'a Screen,
    pub details: &'a Details,
    pub paused: bool,
    pub title: Option<&'a str>,
    pub hint: Option<&'a str>,
}

impl<'a> GameFrame<'a> {
    pub fn from_engine(engine: &'a Engine) -> Self {
        Self {
            screen: engine.screen(),
            details: engine.details(),
            paused: engine.is_paused(),
            title: None,
            hint: None,
        }
    }

    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_hint(mut self, hint: &'a str) -> Self {
        self.hint = Some(hint);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the framed grid sits inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Top-left corner of the border.
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

impl Layout {
    fn inner_x(&self) -> u16 {
        self.frame_x + 1
    }

    fn inner_y(&self) -> u16 {
        self.frame_y + 1
    }
}

const BG: Rgb = Rgb::new(30, 30, 40);
const GRID_DOT: CellStyle = CellStyle {
    fg: Rgb::new(90, 90, 100),
    bg: BG,
    bold: false,
    dim: true,
};
const BORDER: CellStyle = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const LABEL: CellStyle = CellStyle {
    fg: Rgb::new(220, 220, 220),
    bg: Rgb::new(0, 0, 0),
    bold: true,
    dim: false,
};

/// Lightweight terminal view of a table grid.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Place a `grid_w` x `grid_h` grid, leaving one row above for the title
    /// and two below for the scoreboard and hint.
    pub fn layout(&self, grid_w: i32, grid_h: i32, viewport: Viewport) -> Layout {
        let frame_w = clamp_u16(grid_w).saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = clamp_u16(grid_h).saturating_mul(self.cell_h).saturating_add(2);
        let frame_x = viewport.width.saturating_sub(frame_w) / 2;
        let frame_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h.saturating_add(3)) / 2 + 1,
            AnchorY::Top => 1,
        };
        Layout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
        }
    }

    /// Map a terminal position to a grid cell, or `None` outside the grid.
    pub fn cell_at(
        &self,
        grid_w: i32,
        grid_h: i32,
        viewport: Viewport,
        column: u16,
        row: u16,
    ) -> Option<(i32, i32)> {
        let layout = self.layout(grid_w, grid_h, viewport);
        let dx = column.checked_sub(layout.inner_x())?;
        let dy = row.checked_sub(layout.inner_y())?;
        let x = (dx / self.cell_w) as i32;
        let y = (dy / self.cell_h) as i32;
        (x < grid_w && y < grid_h).then_some((x, y))
    }

    /// Render a frame into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, frame: &GameFrame<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let screen = frame.screen;
        let layout = self.layout(screen.width(), screen.height(), viewport);
        self.draw_border(fb, layout);

        for y in 0..screen.height() {
            for x in 0..screen.width() {
                let paint = screen.get(x, y).unwrap_or_default();
                self.draw_grid_cell(fb, layout, x as u16, y as u16, paint);
            }
        }

        if let Some(title) = frame.title {
            self.put_centered(fb, layout, layout.frame_y.saturating_sub(1), title, LABEL);
        }

        let below = layout.frame_y.saturating_add(layout.frame_h);
        if frame.details.visible() && !frame.details.is_empty() {
            let value = CellStyle::default();
            fb.put_str(layout.frame_x, below, &frame.details.line(), value);
        }
        if let Some(hint) = frame.hint {
            let dim = CellStyle {
                dim: true,
                ..CellStyle::default()
            };
            fb.put_str(layout.frame_x, below.saturating_add(1), hint, dim);
        }

        if frame.paused {
            let mid_y = layout.frame_y.saturating_add(layout.frame_h / 2);
            self.put_centered(fb, layout, mid_y, "PAUSED", LABEL);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: &GameFrame<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: Layout) {
        let Layout {
            frame_x: x,
            frame_y: y,
            frame_w: w,
            frame_h: h,
        } = layout;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', BORDER);
        fb.put_char(x + w - 1, y, '┐', BORDER);
        fb.put_char(x, y + h - 1, '└', BORDER);
        fb.put_char(x + w - 1, y + h - 1, '┘', BORDER);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', BORDER);
            fb.put_char(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', BORDER);
            fb.put_char(x + w - 1, y + dy, '│', BORDER);
        }
    }

    fn draw_grid_cell(&self, fb: &mut FrameBuffer, layout: Layout, x: u16, y: u16, paint: CellPaint) {
        let px = layout.inner_x() + x * self.cell_w;
        let py = layout.inner_y() + y * self.cell_h;

        if let Some(fill) = paint.fill {
            let style = CellStyle::plain(fill.into(), fill.into());
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
            return;
        }

        fb.fill_rect(px, py, self.cell_w, self.cell_h, '·', GRID_DOT);
        // Horizontal edges win over the dot; vertical edges take the outer columns.
        for dy in 0..self.cell_h {
            let top = if dy == 0 { paint.top.map(|c| ('▔', c)) } else { None };
            let bottom = if dy + 1 == self.cell_h {
                paint.bottom.map(|c| ('▁', c))
            } else {
                None
            };
            let row_edge = top.or(bottom);
            for dx in 0..self.cell_w {
                let edge = if dx == 0 {
                    paint.border(Edge::Left).map(|c| ('▏', c))
                } else if dx + 1 == self.cell_w {
                    paint.border(Edge::Right).map(|c| ('▕', c))
                } else {
                    None
                };
                if let Some((ch, color)) = edge.or(row_edge) {
                    fb.put_char(px + dx, py + dy, ch, CellStyle::plain(color.into(), BG));
                }
            }
        }
    }

    fn put_centered(&self, fb: &mut FrameBuffer, layout: Layout, y: u16, text: &str, style: CellStyle) {
        let text_w = text.chars().count() as u16;
        let x = layout
            .frame_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, style);
    }
}

/// Grid size as terminal units; negative is empty, oversized saturates.
fn clamp_u16(n: i32) -> u16 {
    u16::try_from(n.max(0)).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_at_inverts_layout() {
        let view = GameView::default();
        let vp = Viewport::new(40, 20);
        let layout = view.layout(10, 5, vp);
        let col = layout.frame_x + 1 + 3 * 2 + 1;
        let row = layout.frame_y + 1 + 4;
        assert_eq!(view.cell_at(10, 5, vp, col, row), Some((3, 4)));
        assert_eq!(view.cell_at(10, 5, vp, layout.frame_x, row), None);
        assert_eq!(view.cell_at(10, 5, vp, col, layout.frame_y + 1 + 5), None);
    }

    #[test]
    fn oversized_grid_saturates_instead_of_wrapping() {
        let view = GameView::default();
        let vp = Viewport::new(80, 24);
        let layout = view.layout(70_000, 70_000, vp);
        assert_eq!(layout.frame_w, u16::MAX);
        assert_eq!(layout.frame_h, u16::MAX);
        assert_eq!(layout.frame_x, 0);
        assert_eq!(layout.frame_y, 1);

        // 65_537 would wrap to 1 with a plain cast.
        assert_eq!(view.layout(65_537, 1, vp).frame_w, u16::MAX);
    }

    #[test]
    fn small_viewport_does_not_panic() {
        let view = GameView::default();
        let screen = Screen::new(20, 10);
        let details = Details::new();
        let frame = GameFrame {
            screen: &screen,
            details: &details,
            paused: true,
            title: Some("Snake"),
            hint: None,
        };
        let fb = view.render(&frame, Viewport::new(3, 2));
        assert_eq!(fb.width(), 3);
    }
}
