//! Shared constants for zine layout
//!
//! This module centralizes magic numbers and constants used throughout
//! the editor canvas, the placement engine and the print sheet.

// =============================================================================
// Canvas
// =============================================================================

/// Interior page canvas width (layout units, 1:1 with CSS px in the editor)
pub const PAGE_WIDTH: f32 = 275.0;

/// Interior page canvas height
pub const PAGE_HEIGHT: f32 = 400.0;

/// Cover canvas height on the standalone cover screens
pub const COVER_HEIGHT: f32 = 425.0;

/// Inner padding used by every text region
pub const PADDING: f32 = 10.0;

// =============================================================================
// Song Box
// =============================================================================

/// Side length of the square song box
pub const SONG_BOX_SIZE: f32 = 120.0;

/// Distance between the song box and the canvas edges it is anchored to
pub const SONG_BOX_INSET: f32 = 10.0;

/// Offset from the song box's anchored edge to the title's anchored edge
pub const SONG_TITLE_OFFSET: f32 = 125.0;

/// Width of the song title column
pub const SONG_TITLE_WIDTH: f32 = 120.0;

/// Font size of the song title
pub const SONG_TITLE_FONT_SIZE: f32 = 10.0;

/// Song title shown until the user picks a track
pub const PLACEHOLDER_SONG_TITLE: &str = "~~~~~~";

// =============================================================================
// Text
// =============================================================================

/// Font size for text regions of top, center and no-song-box layouts
pub const TEXT_FONT_SIZE: f32 = 22.0;

/// Font size for text regions of bottom layouts
pub const BOTTOM_TEXT_FONT_SIZE: f32 = 20.0;

/// Character cap of the primary text in the `Center` layout
pub const CENTER_TEXT_LIMIT: usize = 70;

/// Character cap of the primary text in every other layout
pub const DEFAULT_TEXT_LIMIT: usize = 200;

/// Character cap of the secondary (overflow) text
pub const SECONDARY_TEXT_LIMIT: usize = 70;

/// Character cap of cover titles
pub const COVER_TITLE_LIMIT: usize = 30;

/// Title stored when a zine is saved without one
pub const UNTITLED_ZINE: &str = "Untitled Zine";

// =============================================================================
// Decorations
// =============================================================================

/// Where newly added decorations appear
pub const SPAWN_POINT: (f32, f32) = (120.0, 180.0);

/// Decoration diameter when none has been set
pub const DEFAULT_ELEMENT_SIZE: f32 = 24.0;

pub const MIN_ELEMENT_SIZE: f32 = 8.0;

pub const MAX_ELEMENT_SIZE: f32 = 100.0;

/// Pointer-to-corner offset applied while dragging
pub const DRAG_ANCHOR_OFFSET: f32 = 15.0;

/// Rendered footprint of a default element, used for drag clamping
pub const ELEMENT_FOOTPRINT: f32 = 30.0;

/// Largest x a dragged element may reach
pub const MAX_DRAG_X: f32 = PAGE_WIDTH - ELEMENT_FOOTPRINT;

/// Largest y a dragged element may reach. Shared by every surface and
/// derived from the taller cover canvas.
pub const MAX_DRAG_Y: f32 = COVER_HEIGHT - ELEMENT_FOOTPRINT;

// =============================================================================
// Zine Structure
// =============================================================================

/// Number of interior pages
pub const INTERIOR_PAGES: u8 = 6;

/// Front cover + interior pages + back cover
pub const SURFACE_COUNT: usize = INTERIOR_PAGES as usize + 2;

/// Hard cap on audio previews, enforced by the playback collaborator
pub const PREVIEW_LIMIT_SECS: u32 = 30;

// =============================================================================
// Print Sheet
// =============================================================================

/// CSS pixels per inch
pub const PX_PER_INCH: f32 = 96.0;

/// Millimetres per CSS pixel
pub const MM_PER_PX: f32 = 25.4 / PX_PER_INCH;

/// Convert CSS pixels (layout units) to millimetres
#[inline]
pub fn px_to_mm(px: f32) -> f32 {
    px * MM_PER_PX
}

/// Convert millimetres to CSS pixels (layout units)
#[inline]
pub fn mm_to_px(mm: f32) -> f32 {
    mm / MM_PER_PX
}

/// Scale applied to the whole imposed grid
pub const PRINT_SCALE: f32 = 0.75;

/// Offset applied after scaling, tuned for printer margins (CSS px)
pub const PRINT_OFFSET_PX: (f32, f32) = (-55.0, 110.0);

/// Length of the rotated title column on printed covers
pub const COVER_TITLE_SPAN: f32 = 200.0;

/// Horizontal center of the rotated front cover title
pub const FRONT_TITLE_CENTER_X: f32 = 50.0;

/// Horizontal center of the rotated back cover title
pub const BACK_TITLE_CENTER_X: f32 = 120.0;

/// Rotation of printed cover titles, reading bottom to top
pub const COVER_TITLE_ROTATION: f32 = -90.0;

/// Line width for fold lines (mm)
pub const FOLD_LINE_WIDTH_MM: f32 = 0.2;

/// Line width for cut lines (mm)
pub const CUT_LINE_WIDTH_MM: f32 = 0.3;
