//! Printer's marks for the zine sheet
//!
//! Marks are line segments in millimetres on paper, produced in sheet-local
//! layout units and mapped through the same transform as the cells.

use crate::constants::{CUT_LINE_WIDTH_MM, FOLD_LINE_WIDTH_MM};
use crate::types::PrinterMarks;

use super::{GridLayout, GridPosition, SheetTransform};

/// Dash pattern for fold lines: dash length, gap length (mm)
const FOLD_DASH_MM: (f32, f32) = (2.0, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MarkKind {
    Fold,
    Cut,
}

/// A straight mark on paper
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkLine {
    pub kind: MarkKind,
    pub from_mm: (f32, f32),
    pub to_mm: (f32, f32),
    pub width_mm: f32,
    /// Dash and gap lengths; `None` for a solid line
    pub dash_mm: Option<(f32, f32)>,
}

impl MarkLine {
    pub fn length_mm(&self) -> f32 {
        let dx = self.to_mm.0 - self.from_mm.0;
        let dy = self.to_mm.1 - self.from_mm.1;
        (dx * dx + dy * dy).sqrt()
    }
}

type Segment = ((f32, f32), (f32, f32));

/// Generate every enabled mark for the grid
pub fn generate_marks(
    marks: &PrinterMarks,
    grid: &GridLayout,
    transform: &SheetTransform,
) -> Vec<MarkLine> {
    let mut lines = Vec::new();

    if marks.fold_lines {
        lines.extend(fold_segments(grid).into_iter().map(|(from, to)| MarkLine {
            kind: MarkKind::Fold,
            from_mm: transform.point_to_mm(from),
            to_mm: transform.point_to_mm(to),
            width_mm: FOLD_LINE_WIDTH_MM,
            dash_mm: Some(FOLD_DASH_MM),
        }));
    }

    if marks.cut_lines {
        lines.extend(cut_segments(grid).into_iter().map(|(from, to)| MarkLine {
            kind: MarkKind::Cut,
            from_mm: transform.point_to_mm(from),
            to_mm: transform.point_to_mm(to),
            width_mm: CUT_LINE_WIDTH_MM,
            dash_mm: None,
        }));
    }

    lines
}

/// Fold lines in layout units: full-height lines on the right edge of each
/// folding column, then full-width lines under each folding row
fn fold_segments(grid: &GridLayout) -> Vec<Segment> {
    let width = grid.width();
    let height = grid.height();

    let vertical = (0..grid.cols)
        .filter(|&col| grid.has_fold_right(col))
        .map(|col| {
            let x = (col + 1) as f32 * grid.cell_width;
            ((x, 0.0), (x, height))
        });
    let horizontal = (0..grid.rows)
        .filter(|&row| grid.has_fold_bottom(row))
        .map(|row| {
            let y = (row + 1) as f32 * grid.cell_height;
            ((0.0, y), (width, y))
        });

    vertical.chain(horizontal).collect()
}

/// Cut lines in layout units. Neighbouring cells cut along the same edge
/// join into one line.
fn cut_segments(grid: &GridLayout) -> Vec<Segment> {
    let mut segments = Vec::new();

    for row in 0..grid.rows {
        let y = (row + 1) as f32 * grid.cell_height;
        let mut run_start = None;
        for col in 0..=grid.cols {
            let cut = col < grid.cols && grid.has_cut_bottom(GridPosition::new(row, col));
            match (run_start, cut) {
                (None, true) => run_start = Some(col),
                (Some(start), false) => {
                    let from = (start as f32 * grid.cell_width, y);
                    let to = (col as f32 * grid.cell_width, y);
                    segments.push((from, to));
                    run_start = None;
                }
                _ => {}
            }
        }
    }

    segments
}
