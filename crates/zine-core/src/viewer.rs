//! Read-through of a finished zine
//!
//! Surfaces are shown in reading order, front cover to back cover. Moving
//! past either end stays on the end surface.

use crate::constants::SURFACE_COUNT;
use crate::model::PageMap;
use crate::track::Track;
use crate::types::Surface;

/// Front cover, pages 1-6, back cover
pub const READING_ORDER: [Surface; SURFACE_COUNT] = [
    Surface::FrontCover,
    Surface::Page(1),
    Surface::Page(2),
    Surface::Page(3),
    Surface::Page(4),
    Surface::Page(5),
    Surface::Page(6),
    Surface::BackCover,
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZineViewer {
    index: usize,
    muted: bool,
}

impl ZineViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position in reading order, `0..=7`
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn surface(&self) -> Surface {
        READING_ORDER[self.index]
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == SURFACE_COUNT
    }

    /// Jump to a position, clamped to the first and last surface
    pub fn go_to(&mut self, index: i64) -> Surface {
        self.index = index.clamp(0, SURFACE_COUNT as i64 - 1) as usize;
        self.surface()
    }

    pub fn next(&mut self) -> Surface {
        self.go_to(self.index as i64 + 1)
    }

    pub fn prev(&mut self) -> Surface {
        self.go_to(self.index as i64 - 1)
    }

    /// Heading for the current surface
    pub fn title(&self) -> String {
        match self.surface() {
            Surface::FrontCover => "Cover".to_string(),
            other => other.label(),
        }
    }

    /// One-based progress, e.g. `3 / 8`
    pub fn indicator(&self) -> String {
        format!("{} / {}", self.index + 1, SURFACE_COUNT)
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Track whose preview should play on the current surface: the
    /// selected track of an interior page, if it has a preview and sound
    /// is on.
    pub fn track_to_preview<'a>(&self, pages: &'a PageMap) -> Option<&'a Track> {
        if self.muted {
            return None;
        }
        let Surface::Page(number) = self.surface() else {
            return None;
        };
        pages
            .get(&number)?
            .selected_track
            .as_ref()
            .filter(|t| t.has_preview())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_pages;

    #[test]
    fn test_navigation_is_bounded() {
        let mut viewer = ZineViewer::new();
        assert_eq!(viewer.surface(), Surface::FrontCover);
        assert_eq!(viewer.prev(), Surface::FrontCover);

        assert_eq!(viewer.next(), Surface::Page(1));
        assert_eq!(viewer.go_to(100), Surface::BackCover);
        assert!(viewer.is_last());
        assert_eq!(viewer.next(), Surface::BackCover);
        assert_eq!(viewer.index(), 7);

        assert_eq!(viewer.go_to(-3), Surface::FrontCover);
        assert!(viewer.is_first());
    }

    #[test]
    fn test_labels() {
        let mut viewer = ZineViewer::new();
        assert_eq!(viewer.title(), "Cover");
        assert_eq!(viewer.indicator(), "1 / 8");
        viewer.go_to(3);
        assert_eq!(viewer.title(), "Page 3");
        viewer.go_to(7);
        assert_eq!(viewer.title(), "Back Cover");
        assert_eq!(viewer.indicator(), "8 / 8");
    }

    #[test]
    fn test_track_to_preview() {
        let mut pages = default_pages();
        let mut viewer = ZineViewer::new();
        viewer.go_to(2);
        assert!(viewer.track_to_preview(&pages).is_none());

        if let Some(page) = pages.get_mut(&2) {
            page.selected_track = Some(Track {
                preview: "https://example.com/p.mp3".to_string(),
                ..Default::default()
            });
        }
        assert!(viewer.track_to_preview(&pages).is_some());

        viewer.toggle_mute();
        assert!(viewer.track_to_preview(&pages).is_none());

        viewer.toggle_mute();
        viewer.go_to(0);
        assert!(viewer.track_to_preview(&pages).is_none());
    }
}
