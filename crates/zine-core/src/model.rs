//! Zine data model
//!
//! [`PageData`] and [`CoverData`] are the editable state of one zine;
//! [`Zine`] is the persisted record. Field names on the wire are camelCase
//! so saved collections stay readable by older builds.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::catalog::Font;
use crate::constants::{INTERIOR_PAGES, PLACEHOLDER_SONG_TITLE};
use crate::placement::DecorationLayer;
use crate::track::Track;
use crate::types::{Fill, PagePosition};

/// Interior pages keyed by page number
pub type PageMap = BTreeMap<u8, PageData>;

/// One interior page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct PageData {
    /// Primary text per position label. Switching positions keeps the
    /// text typed under every other label.
    pub texts: BTreeMap<String, String>,
    /// Overflow text per position label (only `Center` shows it)
    pub secondary_texts: BTreeMap<String, String>,
    pub background: Fill,
    pub font: Font,
    pub position: PagePosition,
    /// Title shown under the song box when no track is selected
    pub song_title: String,
    #[cfg_attr(feature = "serde", serde(rename = "hearts"))]
    pub decorations: DecorationLayer,
    pub selected_track: Option<Track>,
}

impl Default for PageData {
    fn default() -> Self {
        let empty_texts: BTreeMap<String, String> = PagePosition::TEXT_LABELS
            .iter()
            .map(|p| (p.label().to_string(), String::new()))
            .collect();

        Self {
            texts: empty_texts.clone(),
            secondary_texts: empty_texts,
            background: Fill::white(),
            font: Font::default(),
            position: PagePosition::default(),
            song_title: PLACEHOLDER_SONG_TITLE.to_string(),
            decorations: DecorationLayer::new(),
            selected_track: None,
        }
    }
}

impl PageData {
    /// Text shown in the primary region for the current position
    pub fn primary_text(&self) -> &str {
        self.texts
            .get(self.position.label())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Text shown in the overflow region, `Center` only
    pub fn secondary_text(&self) -> Option<&str> {
        if self.position != PagePosition::Center {
            return None;
        }
        Some(
            self.secondary_texts
                .get(self.position.label())
                .map(String::as_str)
                .unwrap_or(""),
        )
    }

    /// Title rendered under the song box, if any.
    ///
    /// A selected track wins; otherwise the stored title is shown once it
    /// differs from the placeholder.
    pub fn visible_song_title(&self) -> Option<&str> {
        if self.position == PagePosition::NoSongBox {
            return None;
        }
        match &self.selected_track {
            Some(track) => Some(&track.title),
            None if self.song_title != PLACEHOLDER_SONG_TITLE => Some(&self.song_title),
            None => None,
        }
    }

    /// Whether anything differs from a freshly created page
    pub fn is_customized(&self) -> bool {
        *self != PageData::default()
    }
}

/// Partial update for a [`PageData`]. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagePatch {
    pub texts: Option<BTreeMap<String, String>>,
    pub secondary_texts: Option<BTreeMap<String, String>>,
    pub background: Option<Fill>,
    pub font: Option<Font>,
    pub position: Option<PagePosition>,
    pub song_title: Option<String>,
    pub decorations: Option<DecorationLayer>,
    /// `Some(None)` clears the track
    pub selected_track: Option<Option<Track>>,
}

impl PagePatch {
    /// Shallow merge into `page`
    pub fn apply(self, page: &mut PageData) {
        if let Some(texts) = self.texts {
            page.texts = texts;
        }
        if let Some(secondary_texts) = self.secondary_texts {
            page.secondary_texts = secondary_texts;
        }
        if let Some(background) = self.background {
            page.background = background;
        }
        if let Some(font) = self.font {
            page.font = font;
        }
        if let Some(position) = self.position {
            page.position = position;
        }
        if let Some(song_title) = self.song_title {
            page.song_title = song_title;
        }
        if let Some(decorations) = self.decorations {
            page.decorations = decorations;
        }
        if let Some(selected_track) = self.selected_track {
            page.selected_track = selected_track;
        }
    }
}

/// Fresh pages 1 through 6
pub fn default_pages() -> PageMap {
    (1..=INTERIOR_PAGES)
        .map(|n| (n, PageData::default()))
        .collect()
}

/// Front and back cover
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CoverData {
    pub selected_color: Fill,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub back_color: Option<Fill>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub back_title: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "DecorationLayer::is_empty")
    )]
    pub front_decorations: DecorationLayer,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "DecorationLayer::is_empty")
    )]
    pub back_decorations: DecorationLayer,
}

impl Default for CoverData {
    fn default() -> Self {
        Self {
            selected_color: Fill::white(),
            title: String::new(),
            back_color: None,
            back_title: None,
            front_decorations: DecorationLayer::new(),
            back_decorations: DecorationLayer::new(),
        }
    }
}

impl CoverData {
    pub fn back_fill(&self) -> Fill {
        self.back_color.clone().unwrap_or_default()
    }

    pub fn back_title_text(&self) -> &str {
        self.back_title.as_deref().unwrap_or("")
    }
}

/// Partial update for [`CoverData`]. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverPatch {
    pub selected_color: Option<Fill>,
    pub title: Option<String>,
    pub back_color: Option<Fill>,
    pub back_title: Option<String>,
    pub front_decorations: Option<DecorationLayer>,
    pub back_decorations: Option<DecorationLayer>,
}

impl CoverPatch {
    pub fn apply(self, cover: &mut CoverData) {
        if let Some(selected_color) = self.selected_color {
            cover.selected_color = selected_color;
        }
        if let Some(title) = self.title {
            cover.title = title;
        }
        if self.back_color.is_some() {
            cover.back_color = self.back_color;
        }
        if self.back_title.is_some() {
            cover.back_title = self.back_title;
        }
        if let Some(front_decorations) = self.front_decorations {
            cover.front_decorations = front_decorations;
        }
        if let Some(back_decorations) = self.back_decorations {
            cover.back_decorations = back_decorations;
        }
    }
}

/// A saved zine
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Zine {
    pub id: String,
    pub title: String,
    /// Front cover fill at creation time, for listings
    #[cfg_attr(feature = "serde", serde(default))]
    pub cover_color: Fill,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    pub cover_data: CoverData,
    pub page_data: PageMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page() {
        let page = PageData::default();
        assert_eq!(page.texts.len(), 5);
        assert!(page.texts.values().all(String::is_empty));
        assert_eq!(page.background, Fill::Color("#ffffff".to_string()));
        assert_eq!(page.font.family(), "Comic Sans MS");
        assert_eq!(page.position, PagePosition::TopLeft);
        assert!(page.decorations.is_empty());
        assert!(page.selected_track.is_none());
        assert!(!page.is_customized());
    }

    #[test]
    fn test_patch_merges_only_set_fields() {
        let mut page = PageData::default();
        page.song_title = "kept".to_string();

        PagePatch {
            font: Some(Font::Jokerman),
            ..Default::default()
        }
        .apply(&mut page);

        assert_eq!(page.font, Font::Jokerman);
        assert_eq!(page.song_title, "kept");
        assert_eq!(page.position, PagePosition::TopLeft);
    }

    #[test]
    fn test_patch_can_clear_track() {
        let mut page = PageData {
            selected_track: Some(Track::default()),
            ..Default::default()
        };
        PagePatch {
            selected_track: Some(None),
            ..Default::default()
        }
        .apply(&mut page);
        assert!(page.selected_track.is_none());
    }

    #[test]
    fn test_visible_song_title() {
        let mut page = PageData::default();
        assert_eq!(page.visible_song_title(), None);

        page.song_title = "Custom".to_string();
        assert_eq!(page.visible_song_title(), Some("Custom"));

        page.selected_track = Some(Track {
            title: "Track".to_string(),
            ..Default::default()
        });
        assert_eq!(page.visible_song_title(), Some("Track"));

        page.position = PagePosition::NoSongBox;
        assert_eq!(page.visible_song_title(), None);
    }

    #[test]
    fn test_secondary_text_only_in_center() {
        let mut page = PageData::default();
        assert_eq!(page.secondary_text(), None);
        page.position = PagePosition::Center;
        assert_eq!(page.secondary_text(), Some(""));
    }
}
