//! GameView: maps a [`BoardMirror`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Glyph;
use crate::engine::EngineState;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::mirror::BoardMirror;
use crate::types::{GlyphKind, Position};

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

/// Cursor and selection to draw over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorView {
    pub position: Position,
    pub selected: Option<Position>,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the match-3 board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render the mirrored board into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        mirror: &BoardMirror,
        cursor: Option<&CursorView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let rows = mirror.rows() as u16;
        let columns = mirror.columns() as u16;
        let frame_w = columns * self.cell_w + 2;
        let frame_h = rows * self.cell_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w + PANEL_W) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            columns * self.cell_w,
            rows * self.cell_h,
            ' ',
            bg,
        );
        self.draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG),
        );

        for row in 0..mirror.rows() {
            for column in 0..mirror.columns() {
                let position = Position::new(row, column);
                let mut style;
                let ch;
                match mirror.get(position) {
                    Some(glyph) => {
                        style = glyph_style(&glyph);
                        if mirror.is_hinted(glyph.id) {
                            style.bg = Rgb::new(90, 90, 60);
                        }
                        ch = glyph_char(&glyph);
                    }
                    None => {
                        style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
                        ch = '·';
                    }
                }

                if let Some(view) = cursor {
                    if view.selected == Some(position) {
                        style.bg = Rgb::new(70, 70, 140);
                    }
                    if view.position == position {
                        style = style.reverse();
                    }
                }
                self.fill_cell_rect(fb, start_x, start_y, rows, position, ch, style);
            }
        }

        self.draw_side_panel(fb, mirror, viewport, start_x + frame_w + 2, start_y);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        mirror: &BoardMirror,
        cursor: Option<&CursorView>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(mirror, cursor, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Row 0 is drawn at the bottom of the frame.
    #[allow(clippy::too_many_arguments)]
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        rows: u16,
        position: Position,
        ch: char,
        style: CellStyle,
    ) {
        let screen_row = rows - 1 - position.row as u16;
        let px = start_x + 1 + position.column as u16 * self.cell_w;
        let py = start_y + 1 + screen_row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        mirror: &BoardMirror,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        fb.put_u32(panel_x, y, mirror.score(), value);
        y += 2;

        fb.put_str(panel_x, y, "LAST", label);
        y += 1;
        let end = fb.put_str(panel_x, y, "+", value);
        fb.put_u32(end, y, mirror.last_award(), value);
        y += 2;

        fb.put_str(panel_x, y, "STATE", label);
        y += 1;
        let state = match mirror.state() {
            EngineState::Idle => "ready",
            EngineState::SwapPending => "swapping",
            EngineState::Resolving => "resolving",
        };
        fb.put_str(panel_x, y, state, value);
        y += 2;

        for line in [
            "arrows  move",
            "space   pick",
            "shift   swap",
            "?       hint",
            "r       restart",
            "q       quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y += 1;
        }
    }
}

const PANEL_W: u16 = 18;

fn kind_color(kind: GlyphKind) -> Rgb {
    match kind {
        GlyphKind::Blue => Rgb::new(80, 120, 220),
        GlyphKind::Green => Rgb::new(100, 220, 120),
        GlyphKind::Orange => Rgb::new(255, 165, 0),
        GlyphKind::Purple => Rgb::new(200, 120, 220),
        GlyphKind::Red => Rgb::new(220, 80, 80),
        GlyphKind::Yellow => Rgb::new(240, 220, 80),
    }
}

fn glyph_style(glyph: &Glyph) -> CellStyle {
    let style = CellStyle::new(kind_color(glyph.kind), BOARD_BG);
    if glyph.clears_row_column() {
        style.bold()
    } else {
        style
    }
}

fn glyph_char(glyph: &Glyph) -> char {
    if glyph.clears_row_column() {
        '✚'
    } else {
        '●'
    }
}
