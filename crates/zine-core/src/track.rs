//! Song metadata supplied by the external track lookup

/// One externally-sourced song
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: Artist,
    pub album: Album,
    /// Length in seconds
    pub duration: u32,
    /// Preview audio reference, empty when the service has none
    pub preview: String,
    /// Link to the track on the service
    pub link: String,
    /// Popularity rank; higher is more popular
    pub rank: u64,
    #[cfg_attr(feature = "serde", serde(rename = "explicit_lyrics"))]
    pub explicit: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub picture: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Album {
    pub id: String,
    pub title: String,
    pub cover_small: String,
    pub cover_medium: String,
}

/// Rank needed per popularity star
const RANK_PER_STAR: u64 = 200_000;

impl Track {
    /// "Title by Artist", used as the page's song title
    pub fn display_name(&self) -> String {
        format!("{} by {}", self.title, self.artist.name)
    }

    /// Duration as `m:ss`
    pub fn duration_string(&self) -> String {
        format!("{}:{:02}", self.duration / 60, self.duration % 60)
    }

    /// Five-star popularity rating, e.g. `★★★☆☆`
    pub fn popularity_stars(&self) -> String {
        let stars = (self.rank / RANK_PER_STAR).min(5) as usize;
        format!("{}{}", "★".repeat(stars), "☆".repeat(5 - stars))
    }

    pub fn has_preview(&self) -> bool {
        !self.preview.is_empty()
    }

    /// Best available album art, preferring the medium size
    pub fn cover_art(&self) -> Option<&str> {
        [&self.album.cover_medium, &self.album.cover_small]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
    }
}
