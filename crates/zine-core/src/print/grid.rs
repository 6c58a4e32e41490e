//! Grid layout of the print sheet
//!
//! The sheet is split into four columns and two rows of equal slots. Each
//! surface is drawn at its canvas size, centered in its slot. Coordinates
//! are sheet-local layout units with a top-left origin.

use crate::constants::{PAGE_HEIGHT, PAGE_WIDTH};
use crate::geometry::Rect;

/// Columns on the zine sheet
pub const GRID_COLS: usize = 4;

/// Rows on the zine sheet
pub const GRID_ROWS: usize = 2;

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A cut running along the bottom edge of `row`, spanning columns
/// `from_col..=to_col`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slit {
    pub row: usize,
    pub from_col: usize,
    pub to_col: usize,
}

impl Slit {
    pub fn spans(&self, col: usize) -> bool {
        (self.from_col..=self.to_col).contains(&col)
    }
}

/// Physical layout of the sheet: slot sizes and where the folds and the
/// slit run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
    /// Slot width in layout units
    pub cell_width: f32,
    /// Slot height in layout units
    pub cell_height: f32,
    /// Column indices that have a fold on their right edge
    pub vertical_folds: Vec<usize>,
    /// Row indices that have a fold on their bottom edge
    pub horizontal_folds: Vec<usize>,
    pub slit: Option<Slit>,
}

impl GridLayout {
    /// Check if a column has a fold on its right edge
    pub fn has_fold_right(&self, col: usize) -> bool {
        self.vertical_folds.contains(&col)
    }

    /// Check if a row has a fold on its bottom edge
    pub fn has_fold_bottom(&self, row: usize) -> bool {
        self.horizontal_folds.contains(&row)
    }

    /// Check if the slit runs along the bottom edge of the cell at `pos`
    pub fn has_cut_bottom(&self, pos: GridPosition) -> bool {
        self.slit
            .is_some_and(|s| s.row == pos.row && s.spans(pos.col))
    }

    pub fn width(&self) -> f32 {
        self.cols as f32 * self.cell_width
    }

    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_height
    }
}

// =============================================================================
// Grid Creation
// =============================================================================

/// Create the zine grid for a sheet of the given size in layout units.
///
/// Every column boundary and the row boundary are folds. The slit runs
/// along the row fold across the two middle columns.
pub fn create_grid_layout(sheet_width: f32, sheet_height: f32) -> GridLayout {
    GridLayout {
        cols: GRID_COLS,
        rows: GRID_ROWS,
        cell_width: sheet_width / GRID_COLS as f32,
        cell_height: sheet_height / GRID_ROWS as f32,
        vertical_folds: (0..GRID_COLS - 1).collect(),
        horizontal_folds: vec![0],
        slit: Some(Slit {
            row: 0,
            from_col: 1,
            to_col: 2,
        }),
    }
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Bounds of the slot at `pos`
pub fn cell_bounds(grid: &GridLayout, pos: GridPosition) -> Rect {
    Rect::new(
        pos.row as f32 * grid.cell_height,
        pos.col as f32 * grid.cell_width,
        grid.cell_width,
        grid.cell_height,
    )
}

/// Bounds of the surface drawn in the slot at `pos`: a full page canvas
/// centered in the slot. It may overhang a slot smaller than the canvas.
pub fn surface_bounds(grid: &GridLayout, pos: GridPosition) -> Rect {
    let cell = cell_bounds(grid, pos);
    let (cx, cy) = cell.center();
    Rect::new(
        cy - PAGE_HEIGHT / 2.0,
        cx - PAGE_WIDTH / 2.0,
        PAGE_WIDTH,
        PAGE_HEIGHT,
    )
}
