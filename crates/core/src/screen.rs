//! Screen module - the grid of cells the engine draws into
//!
//! The screen is a `width x height` grid where each cell has an optional fill
//! colour and optional border lines on its four edges. Storage is a flat
//! row-major vector. Coordinates: (x, y) with x left to right, y top to bottom.
//! Writes outside the grid are ignored, which is how drawing clips.

use crate::types::{Color, Edge};

/// Drawing surface used by the render pass.
///
/// [`Screen`] is the in-memory implementation; front ends read it back to
/// present the frame.
pub trait GridRenderer {
    fn width(&self) -> i32;

    fn height(&self) -> i32;

    fn set_cell_color(&mut self, x: i32, y: i32, color: Color);

    fn clear_cell(&mut self, x: i32, y: i32);

    fn set_cell_border(&mut self, x: i32, y: i32, edge: Edge, color: Color);

    /// Blank every cell.
    fn clear(&mut self) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.clear_cell(x, y);
            }
        }
    }
}

/// Paint state of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellPaint {
    pub fill: Option<Color>,
    pub left: Option<Color>,
    pub top: Option<Color>,
    pub right: Option<Color>,
    pub bottom: Option<Color>,
}

impl CellPaint {
    pub fn is_blank(&self) -> bool {
        *self == CellPaint::default()
    }

    pub fn border(&self, edge: Edge) -> Option<Color> {
        match edge {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }
}

/// In-memory grid of painted cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    width: i32,
    height: i32,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<CellPaint>,
}

impl Screen {
    /// Create a blank screen. Negative sizes are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![CellPaint::default(); (width as usize) * (height as usize)],
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get the cell at (x, y), `None` when out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<CellPaint> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Fill colour at (x, y), if any.
    pub fn fill_at(&self, x: i32, y: i32) -> Option<Color> {
        self.get(x, y).and_then(|c| c.fill)
    }

    pub fn cells(&self) -> &[CellPaint] {
        &self.cells
    }

    /// Number of cells with a fill colour.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.fill.is_some()).count()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellPaint::is_blank)
    }
}

impl GridRenderer for Screen {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn set_cell_color(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.cells[i].fill = Some(color);
        }
    }

    fn clear_cell(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = CellPaint::default();
        }
    }

    fn set_cell_border(&mut self, x: i32, y: i32, edge: Edge, color: Color) {
        if let Some(i) = self.index(x, y) {
            let cell = &mut self.cells[i];
            match edge {
                Edge::Left => cell.left = Some(color),
                Edge::Top => cell.top = Some(color),
                Edge::Right => cell.right = Some(color),
                Edge::Bottom => cell.bottom = Some(color),
            }
        }
    }

    fn clear(&mut self) {
        self.cells.fill(CellPaint::default());
    }
}
