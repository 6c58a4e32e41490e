use crate::model::{CoverData, PageMap};
use crate::types::*;

/// Calculate summary counts for a zine
pub fn calculate_statistics(cover: &CoverData, pages: &PageMap) -> ZineStatistics {
    let mut stats = ZineStatistics {
        decorations: cover.front_decorations.len() + cover.back_decorations.len(),
        characters: cover.title.chars().count() + cover.back_title_text().chars().count(),
        ..Default::default()
    };

    for page in pages.values() {
        if page.is_customized() {
            stats.pages_customized += 1;
        }
        if page.selected_track.is_some() {
            stats.tracks_selected += 1;
        }
        if page.background.is_image() {
            stats.image_backgrounds += 1;
        }
        stats.decorations += page.decorations.len();
        stats.characters += page.primary_text().chars().count()
            + page.secondary_text().map_or(0, |s| s.chars().count());
    }

    for fill in [Some(&cover.selected_color), cover.back_color.as_ref()]
        .into_iter()
        .flatten()
    {
        if fill.is_image() {
            stats.image_backgrounds += 1;
        }
    }

    stats
}
