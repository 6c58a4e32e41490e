//! The zine being edited
//!
//! [`ZineSession`] owns the in-progress cover and pages. Every page edit is
//! expressed as a [`PagePatch`] merged by [`ZineSession::update_page`], and
//! every cover edit as a [`CoverPatch`].

use crate::catalog::{CatalogEntry, Font};
use crate::constants::{COVER_TITLE_LIMIT, INTERIOR_PAGES};
use crate::geometry::{char_limit, clamp_text};
use crate::model::*;
use crate::placement::{DecorationLayer, DecorativeElement, GrabMode, PointerCapture};
use crate::track::Track;
use crate::types::{Fill, PagePosition, Surface};

#[cfg(feature = "serde")]
use crate::store::{Storage, ZineStore};

#[derive(Debug, Clone)]
pub struct ZineSession {
    cover: CoverData,
    pages: PageMap,
    zine_id: Option<String>,
    capture: PointerCapture,
    /// Bumped whenever the session starts over on a different zine
    generation: u64,
}

impl Default for ZineSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ZineSession {
    pub fn new() -> Self {
        Self {
            cover: CoverData::default(),
            pages: default_pages(),
            zine_id: None,
            capture: PointerCapture::new(),
            generation: 0,
        }
    }

    pub fn cover(&self) -> &CoverData {
        &self.cover
    }

    pub fn pages(&self) -> &PageMap {
        &self.pages
    }

    pub fn page(&self, number: u8) -> Option<&PageData> {
        self.pages.get(&number)
    }

    /// Id of the saved record this session writes to
    pub fn zine_id(&self) -> Option<&str> {
        self.zine_id.as_deref()
    }

    /// Changes on reset and load; async results captured under an older
    /// generation belong to a zine that is no longer being edited.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn capture(&self) -> &PointerCapture {
        &self.capture
    }

    // =========================================================================
    // Core mutations
    // =========================================================================

    /// Shallow-merge `patch` into page `number`.
    ///
    /// Pages 1-6 always exist; other numbers are accepted only when a
    /// loaded record brought them. Returns whether the page was updated.
    pub fn update_page(&mut self, number: u8, patch: PagePatch) -> bool {
        let known = (1..=INTERIOR_PAGES).contains(&number) || self.pages.contains_key(&number);
        if !known {
            log::debug!("Ignoring update for unknown page {}", number);
            return false;
        }
        patch.apply(self.pages.entry(number).or_default());
        true
    }

    pub fn update_cover(&mut self, patch: CoverPatch) {
        patch.apply(&mut self.cover);
    }

    /// Back to a blank zine with no saved record attached
    pub fn reset_all(&mut self) {
        self.cover = CoverData::default();
        self.pages = default_pages();
        self.zine_id = None;
        self.capture.release();
        self.generation += 1;
    }

    /// Replace the session with a copy of a saved zine
    pub fn load_zine(&mut self, zine: &Zine) {
        self.reset_all();
        self.cover = zine.cover_data.clone();
        for (number, page) in &zine.page_data {
            self.pages.insert(*number, page.clone());
        }
        self.zine_id = Some(zine.id.clone());
    }

    // =========================================================================
    // Page edits
    // =========================================================================

    /// Set the primary text for the page's current position, truncated to
    /// that position's cap
    pub fn set_text(&mut self, number: u8, text: &str) -> bool {
        let Some(page) = self.pages.get(&number) else {
            return false;
        };
        let position = page.position;
        let mut texts = page.texts.clone();
        texts.insert(
            position.label().to_string(),
            clamp_text(text, char_limit(position, false)),
        );
        self.update_page(
            number,
            PagePatch {
                texts: Some(texts),
                ..Default::default()
            },
        )
    }

    /// Set the overflow text. Only the `Center` layout has one; other
    /// positions ignore the edit.
    pub fn set_secondary_text(&mut self, number: u8, text: &str) -> bool {
        let Some(page) = self.pages.get(&number) else {
            return false;
        };
        if page.position != PagePosition::Center {
            return false;
        }
        let mut secondary_texts = page.secondary_texts.clone();
        secondary_texts.insert(
            page.position.label().to_string(),
            clamp_text(text, char_limit(page.position, true)),
        );
        self.update_page(
            number,
            PagePatch {
                secondary_texts: Some(secondary_texts),
                ..Default::default()
            },
        )
    }

    pub fn set_position(&mut self, number: u8, position: PagePosition) -> bool {
        self.update_page(
            number,
            PagePatch {
                position: Some(position),
                ..Default::default()
            },
        )
    }

    pub fn set_font(&mut self, number: u8, font: Font) -> bool {
        self.update_page(
            number,
            PagePatch {
                font: Some(font),
                ..Default::default()
            },
        )
    }

    /// Set the fill of any surface
    pub fn set_background(&mut self, surface: Surface, fill: Fill) -> bool {
        match surface {
            Surface::Page(number) => self.update_page(
                number,
                PagePatch {
                    background: Some(fill),
                    ..Default::default()
                },
            ),
            Surface::FrontCover => {
                self.update_cover(CoverPatch {
                    selected_color: Some(fill),
                    ..Default::default()
                });
                true
            }
            Surface::BackCover => {
                self.update_cover(CoverPatch {
                    back_color: Some(fill),
                    ..Default::default()
                });
                true
            }
        }
    }

    /// Attach a track and show its display name as the song title
    pub fn select_track(&mut self, number: u8, track: Track) -> bool {
        self.update_page(
            number,
            PagePatch {
                song_title: Some(track.display_name()),
                selected_track: Some(Some(track)),
                ..Default::default()
            },
        )
    }

    // =========================================================================
    // Cover edits
    // =========================================================================

    /// Front cover title, truncated to the cover cap
    pub fn set_cover_title(&mut self, title: &str) {
        self.update_cover(CoverPatch {
            title: Some(clamp_text(title, COVER_TITLE_LIMIT)),
            ..Default::default()
        });
    }

    pub fn set_back_title(&mut self, title: &str) {
        self.update_cover(CoverPatch {
            back_title: Some(clamp_text(title, COVER_TITLE_LIMIT)),
            ..Default::default()
        });
    }

    // =========================================================================
    // Decorations
    // =========================================================================

    /// Decorations of a surface, `None` for an unknown page
    pub fn layer(&self, surface: Surface) -> Option<&DecorationLayer> {
        match surface {
            Surface::Page(number) => self.pages.get(&number).map(|p| &p.decorations),
            Surface::FrontCover => Some(&self.cover.front_decorations),
            Surface::BackCover => Some(&self.cover.back_decorations),
        }
    }

    /// Run `edit` on a copy of the surface's layer and write it back
    /// through the patch path
    fn edit_layer<T>(
        &mut self,
        surface: Surface,
        edit: impl FnOnce(&mut DecorationLayer) -> T,
    ) -> Option<T> {
        let mut layer = self.layer(surface)?.clone();
        let result = edit(&mut layer);
        match surface {
            Surface::Page(number) => {
                self.update_page(
                    number,
                    PagePatch {
                        decorations: Some(layer),
                        ..Default::default()
                    },
                );
            }
            Surface::FrontCover => self.update_cover(CoverPatch {
                front_decorations: Some(layer),
                ..Default::default()
            }),
            Surface::BackCover => self.update_cover(CoverPatch {
                back_decorations: Some(layer),
                ..Default::default()
            }),
        }
        Some(result)
    }

    pub fn add_decoration(
        &mut self,
        surface: Surface,
        entry: &CatalogEntry,
    ) -> Option<DecorativeElement> {
        self.edit_layer(surface, |layer| layer.add(entry))
    }

    pub fn remove_decoration(&mut self, surface: Surface, id: &str) -> Option<DecorativeElement> {
        self.edit_layer(surface, |layer| layer.remove(id)).flatten()
    }

    // =========================================================================
    // Pointer gestures
    // =========================================================================

    /// Grab an element for dragging or resizing.
    ///
    /// Fails while another element is held or if the element does not exist.
    pub fn pointer_down(&mut self, surface: Surface, id: &str, mode: GrabMode) -> bool {
        let exists = self
            .layer(surface)
            .is_some_and(|layer| layer.get(id).is_some());
        exists && self.capture.grab(surface, id, mode)
    }

    /// Apply the held gesture at the pointer position. No-op when nothing
    /// is held.
    pub fn pointer_move(&mut self, pointer_x: f32, pointer_y: f32) -> bool {
        let Some(grab) = self.capture.active().cloned() else {
            return false;
        };
        self.edit_layer(grab.surface, |layer| match grab.mode {
            GrabMode::Drag => layer.move_to(&grab.element_id, pointer_x, pointer_y),
            GrabMode::Resize => layer.resize(&grab.element_id, pointer_x, pointer_y),
        })
        .unwrap_or(false)
    }

    /// Pointer released or left the canvas
    pub fn pointer_up(&mut self) {
        self.capture.release();
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Save into `store`, reusing this session's record when it has one
    #[cfg(feature = "serde")]
    pub fn save_to<S: Storage>(&mut self, store: &mut ZineStore<S>) -> String {
        let id = store.save(
            &self.cover.title,
            &self.cover,
            &self.pages,
            self.zine_id.as_deref(),
        );
        self.zine_id = Some(id.clone());
        id
    }

    /// Save and start over on a blank zine
    #[cfg(feature = "serde")]
    pub fn finish<S: Storage>(&mut self, store: &mut ZineStore<S>) -> String {
        let id = self.save_to(store);
        self.reset_all();
        id
    }
}
