//! Track search collaborator

use std::future::Future;

use zine_core::{Result, Track};

/// Source of tracks for the song box.
///
/// Searches run on spawned tasks, so implementations must be shareable
/// across threads.
pub trait TrackLookup: Send + Sync + 'static {
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<Track>>> + Send;
}

/// Searches a fixed list of tracks by title or artist, case-insensitively
#[derive(Debug, Clone, Default)]
pub struct CatalogLookup {
    tracks: Vec<Track>,
}

impl CatalogLookup {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }
}

impl TrackLookup for CatalogLookup {
    async fn search(&self, query: &str) -> Result<Vec<Track>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .tracks
            .iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.artist.name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}
