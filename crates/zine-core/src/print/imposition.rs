//! Imposition of the eight zine surfaces
//!
//! A single-sheet mini zine is printed on one side, folded in half
//! lengthwise, slit through the middle and folded into a booklet:
//!
//! - Top row: [4↓, 3↓, 2↓, 1↓]
//! - Bottom row: [5, 6, back, front]
//! - Top row rotated 180°

use crate::types::{Rotation, Surface};

use super::GridPosition;

/// Where one surface lands on the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpositionSlot {
    pub surface: Surface,
    /// Position in grid (row, col) - row 0 is top
    pub grid_pos: GridPosition,
    pub rotation: Rotation,
}

const fn slot(surface: Surface, row: usize, col: usize) -> ImpositionSlot {
    ImpositionSlot {
        surface,
        grid_pos: GridPosition::new(row, col),
        rotation: if row == 0 {
            Rotation::Clockwise180
        } else {
            Rotation::None
        },
    }
}

/// All slots in row-major order (top-left to bottom-right)
pub const ZINE_IMPOSITION: [ImpositionSlot; 8] = [
    slot(Surface::Page(4), 0, 0),
    slot(Surface::Page(3), 0, 1),
    slot(Surface::Page(2), 0, 2),
    slot(Surface::Page(1), 0, 3),
    slot(Surface::Page(5), 1, 0),
    slot(Surface::Page(6), 1, 1),
    slot(Surface::BackCover, 1, 2),
    slot(Surface::FrontCover, 1, 3),
];

/// The slot a surface is printed in. `None` for page numbers outside 1-6.
pub fn slot_for(surface: Surface) -> Option<&'static ImpositionSlot> {
    ZINE_IMPOSITION.iter().find(|s| s.surface == surface)
}

/// Surfaces of one row, left to right
pub fn row_surfaces(row: usize) -> Vec<Surface> {
    ZINE_IMPOSITION
        .iter()
        .filter(|s| s.grid_pos.row == row)
        .map(|s| s.surface)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows() {
        assert_eq!(
            row_surfaces(0),
            vec![
                Surface::Page(4),
                Surface::Page(3),
                Surface::Page(2),
                Surface::Page(1)
            ]
        );
        assert_eq!(
            row_surfaces(1),
            vec![
                Surface::Page(5),
                Surface::Page(6),
                Surface::BackCover,
                Surface::FrontCover
            ]
        );
    }

    #[test]
    fn test_only_top_row_rotated() {
        for slot in &ZINE_IMPOSITION {
            let expected = if slot.grid_pos.row == 0 {
                Rotation::Clockwise180
            } else {
                Rotation::None
            };
            assert_eq!(slot.rotation, expected, "{:?}", slot.surface);
        }
    }

    #[test]
    fn test_every_cell_used_once() {
        let mut seen = std::collections::HashSet::new();
        for slot in &ZINE_IMPOSITION {
            assert!(seen.insert(slot.grid_pos));
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_slot_for() {
        let front = slot_for(Surface::FrontCover).unwrap();
        assert_eq!(front.grid_pos, GridPosition::new(1, 3));
        assert!(slot_for(Surface::Page(7)).is_none());
    }
}
