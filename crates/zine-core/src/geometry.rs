//! Text and song region layout for interior pages
//!
//! Everything here is a pure function of the page position. Coordinates are
//! canvas-local layout units with the origin at the top-left corner of a
//! 275 × 400 page.

use crate::constants::*;
use crate::types::PagePosition;

/// A rectangular area in layout units, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Distance from the top edge of the canvas
    pub top: f32,
    /// Distance from the left edge of the canvas
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn center(&self) -> (f32, f32) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Whether `other` lies fully inside this rect
    pub fn contains(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// A text entry region and the font size it renders with
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextArea {
    pub bounds: Rect,
    pub font_size: f32,
}

/// Which canvas edge the song title is pinned to
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TitleAnchor {
    /// Title's top edge at this distance from the canvas top
    Top(f32),
    /// Title's bottom edge at this distance from the canvas bottom
    Bottom(f32),
}

/// The column the song title is laid out in. The height follows the
/// rendered text, so only the anchored edge is fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SongTitleArea {
    pub left: f32,
    pub width: f32,
    pub anchor: TitleAnchor,
    pub font_size: f32,
}

// =============================================================================
// Text Regions
// =============================================================================

/// Bounds of the text entry region for `position`.
///
/// With `secondary` set this is the overflow region, which only exists for
/// [`PagePosition::Center`]; every other position returns `None`.
pub fn text_area(position: PagePosition, secondary: bool) -> Option<TextArea> {
    let width = PAGE_WIDTH - PADDING * 2.0;
    let half_free = (PAGE_HEIGHT - SONG_BOX_SIZE) / 2.0;

    let (bounds, font_size) = match (position, secondary) {
        (PagePosition::TopLeft | PagePosition::TopRight, false) => (
            Rect::new(
                SONG_BOX_SIZE + PADDING * 4.0,
                PADDING,
                width,
                PAGE_HEIGHT - SONG_BOX_SIZE - PADDING * 8.0,
            ),
            TEXT_FONT_SIZE,
        ),
        (PagePosition::BottomLeft | PagePosition::BottomRight, false) => (
            Rect::new(
                PADDING,
                PADDING,
                width,
                PAGE_HEIGHT - SONG_BOX_SIZE - PADDING * 8.0,
            ),
            BOTTOM_TEXT_FONT_SIZE,
        ),
        // Upper half, above the centered song box
        (PagePosition::Center, false) => (
            Rect::new(PADDING * 3.0, PADDING, width, half_free - PADDING),
            TEXT_FONT_SIZE,
        ),
        // Lower half, below the centered song box
        (PagePosition::Center, true) => (
            Rect::new(
                (PAGE_HEIGHT + SONG_BOX_SIZE) / 2.0 + PADDING,
                PADDING,
                width,
                half_free - PADDING * 2.0,
            ),
            TEXT_FONT_SIZE,
        ),
        (PagePosition::NoSongBox, false) => (
            Rect::new(PADDING, PADDING, width, PAGE_HEIGHT - PADDING * 2.0),
            TEXT_FONT_SIZE,
        ),
        (_, true) => return None,
    };

    Some(TextArea { bounds, font_size })
}

/// [`text_area`] for a raw position label; unknown labels are not rendered.
pub fn text_area_for_label(label: &str, secondary: bool) -> Option<TextArea> {
    PagePosition::from_label(label).and_then(|p| text_area(p, secondary))
}

/// Character cap of a text region
pub fn char_limit(position: PagePosition, secondary: bool) -> usize {
    if secondary {
        SECONDARY_TEXT_LIMIT
    } else if position == PagePosition::Center {
        CENTER_TEXT_LIMIT
    } else {
        DEFAULT_TEXT_LIMIT
    }
}

/// Truncate `text` to at most `limit` characters
pub fn clamp_text(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

// =============================================================================
// Song Box
// =============================================================================

/// Bounds of the song box, or `None` when the position hides it
pub fn song_box(position: PagePosition) -> Option<Rect> {
    let far_left = PAGE_WIDTH - SONG_BOX_INSET - SONG_BOX_SIZE;
    let far_top = PAGE_HEIGHT - SONG_BOX_INSET - SONG_BOX_SIZE;

    let (top, left) = match position {
        PagePosition::TopLeft => (SONG_BOX_INSET, SONG_BOX_INSET),
        PagePosition::TopRight => (SONG_BOX_INSET, far_left),
        PagePosition::Center => (
            (PAGE_HEIGHT - SONG_BOX_SIZE) / 2.0,
            (PAGE_WIDTH - SONG_BOX_SIZE) / 2.0,
        ),
        PagePosition::BottomLeft => (far_top, SONG_BOX_INSET),
        PagePosition::BottomRight => (far_top, far_left),
        PagePosition::NoSongBox => return None,
    };

    Some(Rect::new(top, left, SONG_BOX_SIZE, SONG_BOX_SIZE))
}

pub fn song_box_for_label(label: &str) -> Option<Rect> {
    PagePosition::from_label(label).and_then(song_box)
}

/// Column of the song title, directly below (or, for bottom layouts,
/// above) the song box
pub fn song_title_area(position: PagePosition) -> Option<SongTitleArea> {
    let song = song_box(position)?;

    let anchor = if position.is_bottom() {
        let box_bottom_gap = PAGE_HEIGHT - song.bottom();
        TitleAnchor::Bottom(box_bottom_gap + SONG_TITLE_OFFSET)
    } else {
        TitleAnchor::Top(song.top + SONG_TITLE_OFFSET)
    };

    Some(SongTitleArea {
        left: song.left,
        width: SONG_TITLE_WIDTH,
        anchor,
        font_size: SONG_TITLE_FONT_SIZE,
    })
}

pub fn song_title_area_for_label(label: &str) -> Option<SongTitleArea> {
    PagePosition::from_label(label).and_then(song_title_area)
}

// =============================================================================
// Resize
// =============================================================================

/// Element size for a resize gesture: twice the pointer's distance from
/// the element center, clamped to the allowed size range.
pub fn size_from_pointer(center: (f32, f32), pointer: (f32, f32)) -> f32 {
    let dx = pointer.0 - center.0;
    let dy = pointer.1 - center.1;
    let distance = (dx * dx + dy * dy).sqrt();
    (distance * 2.0).clamp(MIN_ELEMENT_SIZE, MAX_ELEMENT_SIZE)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Rect {
        Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT)
    }

    #[test]
    fn test_top_layout_starts_below_song_box() {
        for position in [PagePosition::TopLeft, PagePosition::TopRight] {
            let area = text_area(position, false).unwrap();
            assert_eq!(area.bounds, Rect::new(160.0, 10.0, 255.0, 200.0));
            assert_eq!(area.font_size, 22.0);

            let song = song_box(position).unwrap();
            assert!(area.bounds.top > song.bottom());
        }
    }

    #[test]
    fn test_bottom_layout_leaves_room_for_song_box() {
        for position in [PagePosition::BottomLeft, PagePosition::BottomRight] {
            let area = text_area(position, false).unwrap();
            assert_eq!(area.bounds, Rect::new(10.0, 10.0, 255.0, 200.0));
            assert_eq!(area.font_size, 20.0);

            let song = song_box(position).unwrap();
            assert!(area.bounds.bottom() < song.top);
        }
    }

    #[test]
    fn test_center_splits_canvas_in_halves() {
        let primary = text_area(PagePosition::Center, false).unwrap();
        let secondary = text_area(PagePosition::Center, true).unwrap();
        let song = song_box(PagePosition::Center).unwrap();

        assert_eq!(primary.bounds, Rect::new(30.0, 10.0, 255.0, 130.0));
        assert_eq!(secondary.bounds, Rect::new(270.0, 10.0, 255.0, 120.0));
        assert!(primary.bounds.bottom() <= PAGE_HEIGHT / 2.0);
        assert!(secondary.bounds.top >= PAGE_HEIGHT / 2.0);
        assert!(secondary.bounds.top >= song.bottom());
    }

    #[test]
    fn test_secondary_only_for_center() {
        for position in PagePosition::ALL {
            let expected = position == PagePosition::Center;
            assert_eq!(text_area(position, true).is_some(), expected, "{position}");
        }
    }

    #[test]
    fn test_no_song_box_hides_song_regions() {
        assert!(song_box(PagePosition::NoSongBox).is_none());
        assert!(song_title_area(PagePosition::NoSongBox).is_none());

        let area = text_area(PagePosition::NoSongBox, false).unwrap();
        assert_eq!(area.bounds.height, PAGE_HEIGHT - 2.0 * PADDING);
    }

    #[test]
    fn test_song_box_anchors() {
        assert_eq!(song_box(PagePosition::TopLeft).unwrap().left, 10.0);
        assert_eq!(song_box(PagePosition::TopRight).unwrap().right(), 265.0);
        assert_eq!(song_box(PagePosition::BottomLeft).unwrap().bottom(), 390.0);

        let center = song_box(PagePosition::Center).unwrap();
        assert_eq!(center.center(), (PAGE_WIDTH / 2.0, PAGE_HEIGHT / 2.0));

        for position in PagePosition::ALL {
            if let Some(song) = song_box(position) {
                assert!(canvas().contains(&song), "{position}");
            }
        }
    }

    #[test]
    fn test_song_title_follows_song_box() {
        let top = song_title_area(PagePosition::TopRight).unwrap();
        assert_eq!(top.anchor, TitleAnchor::Top(135.0));
        assert_eq!(top.left, 145.0);
        assert_eq!(top.width, 120.0);

        let bottom = song_title_area(PagePosition::BottomLeft).unwrap();
        assert_eq!(bottom.anchor, TitleAnchor::Bottom(135.0));

        let center = song_title_area(PagePosition::Center).unwrap();
        assert_eq!(center.anchor, TitleAnchor::Top(265.0));
    }

    #[test]
    fn test_unknown_label_not_rendered() {
        assert!(text_area_for_label("Upside Down", false).is_none());
        assert!(song_box_for_label("").is_none());
        assert!(song_title_area_for_label("center").is_none());
        assert!(text_area_for_label("Center", true).is_some());
    }

    #[test]
    fn test_char_limits() {
        assert_eq!(char_limit(PagePosition::Center, false), 70);
        assert_eq!(char_limit(PagePosition::Center, true), 70);
        assert_eq!(char_limit(PagePosition::TopLeft, false), 200);
        assert_eq!(clamp_text(&"a".repeat(71), 70).len(), 70);
        assert_eq!(clamp_text("héllo", 2), "hé");
        assert_eq!(clamp_text("short", 70), "short");
    }

    #[test]
    fn test_size_from_pointer_clamps() {
        assert_eq!(size_from_pointer((50.0, 50.0), (53.0, 54.0)), 10.0);
        assert_eq!(size_from_pointer((50.0, 50.0), (50.0, 50.0)), 8.0);
        assert_eq!(size_from_pointer((50.0, 50.0), (500.0, 500.0)), 100.0);
    }
}
