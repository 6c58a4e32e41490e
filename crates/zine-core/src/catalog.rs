//! Built-in decorations, fonts and palettes offered by the editor

use std::fmt;

/// Decoration category, used to group the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    Hearts,
    Music,
    Shapes,
    Nature,
    Misc,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Hearts,
        Category::Music,
        Category::Shapes,
        Category::Nature,
        Category::Misc,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Hearts => "Hearts",
            Category::Music => "Music",
            Category::Shapes => "Shapes",
            Category::Nature => "Nature",
            Category::Misc => "Misc",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Category::Hearts => "💕",
            Category::Music => "🎵",
            Category::Shapes => "⭐",
            Category::Nature => "🌿",
            Category::Misc => "✨",
        }
    }
}

/// A decoration the user can place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
    /// Tint for monochrome glyphs
    pub color: Option<&'static str>,
    pub category: Category,
}

const fn entry(
    id: &'static str,
    symbol: &'static str,
    name: &'static str,
    color: Option<&'static str>,
    category: Category,
) -> CatalogEntry {
    CatalogEntry {
        id,
        symbol,
        name,
        color,
        category,
    }
}

pub const CATALOG: &[CatalogEntry] = &[
    entry("heart-red", "♥", "Red Heart", Some("#e91e63"), Category::Hearts),
    entry("heart-pink", "💖", "Pink Heart", None, Category::Hearts),
    entry("heart-purple", "💜", "Purple Heart", None, Category::Hearts),
    entry("heart-blue", "💙", "Blue Heart", None, Category::Hearts),
    entry("music-note", "♪", "Music Note", Some("#2196f3"), Category::Music),
    entry("music-notes", "♫", "Music Notes", None, Category::Music),
    entry("treble-clef", "𝄞", "Treble Clef", None, Category::Music),
    entry("microphone", "🎤", "Microphone", None, Category::Music),
    entry("headphones", "🎧", "Headphones", None, Category::Music),
    entry("star", "★", "Star", Some("#ffd700"), Category::Shapes),
    entry("star-outline", "☆", "Star Outline", None, Category::Shapes),
    entry("circle", "●", "Circle", None, Category::Shapes),
    entry("diamond", "♦", "Diamond", None, Category::Shapes),
    entry("sparkle", "✨", "Sparkle", None, Category::Shapes),
    entry("flower", "🌸", "Flower", None, Category::Nature),
    entry("sun", "☀️", "Sun", None, Category::Nature),
    entry("moon", "🌙", "Moon", None, Category::Nature),
    entry("cloud", "☁️", "Cloud", None, Category::Nature),
    entry("peace", "☮", "Peace Sign", None, Category::Misc),
    entry("infinity", "∞", "Infinity", None, Category::Misc),
    entry("arrow", "→", "Arrow", None, Category::Misc),
    entry("crown", "👑", "Crown", None, Category::Misc),
];

/// Glyph rendered for elements stored without a symbol
pub const FALLBACK_SYMBOL: &str = "♥";

pub fn find_entry(id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.id == id)
}

pub fn entries_in(category: Category) -> impl Iterator<Item = &'static CatalogEntry> {
    CATALOG.iter().filter(move |e| e.category == category)
}

// =============================================================================
// Fonts
// =============================================================================

/// Fonts offered for page text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum Font {
    #[default]
    ComicSans,
    Papyrus,
    BrushScript,
    LucidaHandwriting,
    BradleyHand,
    Kristen,
    Curlz,
    Jokerman,
    TempusSans,
}

impl Font {
    pub const ALL: [Font; 9] = [
        Font::ComicSans,
        Font::Papyrus,
        Font::BrushScript,
        Font::LucidaHandwriting,
        Font::BradleyHand,
        Font::Kristen,
        Font::Curlz,
        Font::Jokerman,
        Font::TempusSans,
    ];

    pub fn family(self) -> &'static str {
        match self {
            Font::ComicSans => "Comic Sans MS",
            Font::Papyrus => "Papyrus",
            Font::BrushScript => "Brush Script MT",
            Font::LucidaHandwriting => "Lucida Handwriting",
            Font::BradleyHand => "Bradley Hand ITC",
            Font::Kristen => "Kristen ITC",
            Font::Curlz => "Curlz MT",
            Font::Jokerman => "Jokerman",
            Font::TempusSans => "Tempus Sans ITC",
        }
    }

    pub fn from_family(family: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.family() == family)
    }
}

/// Families outside the list fall back to the default font
impl From<String> for Font {
    fn from(family: String) -> Self {
        Font::from_family(&family).unwrap_or_default()
    }
}

impl From<Font> for String {
    fn from(font: Font) -> Self {
        font.family().to_string()
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.family())
    }
}

// =============================================================================
// Palettes
// =============================================================================

pub const COVER_COLORS: &[&str] = &[
    "#e81416", "#ffa500", "#faeb36", "#79c314", "#487de7", "#4b369d", "#ffadad", "#ffd6a5",
    "#fdffb6", "#caffbf", "#9bf6ff", "#a0c4ff", "#bdb2ff", "#ffc6ff", "#b0c4b1", "#755407",
    "#ff00ff", "#00ffff", "#00ff00", "#000000",
];

pub const BACKGROUND_COLORS: &[&str] = &["#ffffff", "#f2f2f2", "#ffecb3", "#e6f2ff"];

/// Whether `color` is a `#rgb` or `#rrggbb` hex color
pub fn is_hex_color(color: &str) -> bool {
    let Some(digits) = color.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Black or white, whichever reads better on `hex`
pub fn contrast_color(hex: &str) -> &'static str {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return "#000000";
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    let (Some(r), Some(g), Some(b)) = (channel(0), channel(2), channel(4)) else {
        return "#000000";
    };

    let luminance = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0;
    if luminance > 0.5 { "#000000" } else { "#ffffff" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            assert!(CATALOG[i + 1..].iter().all(|b| b.id != a.id), "{}", a.id);
        }
    }

    #[test]
    fn test_every_category_populated() {
        for category in Category::ALL {
            assert!(entries_in(category).count() > 0, "{}", category.name());
        }
        assert_eq!(entries_in(Category::Music).count(), 5);
    }

    #[test]
    fn test_font_fallback() {
        assert_eq!(Font::from("Papyrus".to_string()), Font::Papyrus);
        assert_eq!(Font::from("Wingdings".to_string()), Font::ComicSans);
        assert_eq!(String::from(Font::TempusSans), "Tempus Sans ITC");
    }

    #[test]
    fn test_colors() {
        assert!(COVER_COLORS.iter().all(|c| is_hex_color(c)));
        assert!(is_hex_color("#fff"));
        assert!(!is_hex_color("/images/bg.png"));
        assert_eq!(contrast_color("#000000"), "#ffffff");
        assert_eq!(contrast_color("#ffecb3"), "#000000");
        assert_eq!(contrast_color("garbage"), "#000000");
    }
}
