use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Track lookup failed: {0}")]
    Lookup(String),
    #[error("No saved zine with id {0}")]
    UnknownZine(String),
    #[error("Page {0} is not an interior page (expected 1-6)")]
    InvalidPage(u8),
}

pub type Result<T> = std::result::Result<T, ZineError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Portrait,
    /// Landscape: width > height (the folded zine sheet is printed this way)
    #[default]
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Rotation applied to a cell of the print sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    #[default]
    None,
    Clockwise180,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise180 => 180,
        }
    }
}

/// Where the song box sits on an interior page.
///
/// The position also decides where the text regions go, see
/// [`crate::geometry::text_area`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum PagePosition {
    #[default]
    TopLeft,
    TopRight,
    Center,
    BottomLeft,
    BottomRight,
    NoSongBox,
}

impl PagePosition {
    pub const ALL: [PagePosition; 6] = [
        PagePosition::TopLeft,
        PagePosition::TopRight,
        PagePosition::Center,
        PagePosition::BottomLeft,
        PagePosition::BottomRight,
        PagePosition::NoSongBox,
    ];

    /// Positions that carry their own text entry. `No Song Box` reuses
    /// whatever the page had, so it has no slot in the text maps.
    pub const TEXT_LABELS: [PagePosition; 5] = [
        PagePosition::TopLeft,
        PagePosition::TopRight,
        PagePosition::Center,
        PagePosition::BottomLeft,
        PagePosition::BottomRight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PagePosition::TopLeft => "Top Left",
            PagePosition::TopRight => "Top Right",
            PagePosition::Center => "Center",
            PagePosition::BottomLeft => "Bottom Left",
            PagePosition::BottomRight => "Bottom Right",
            PagePosition::NoSongBox => "No Song Box",
        }
    }

    /// Parse a display label. Unrecognized labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }

    /// Whether the song box hangs from the bottom edge of the canvas
    pub fn is_bottom(self) -> bool {
        matches!(self, PagePosition::BottomLeft | PagePosition::BottomRight)
    }
}

/// Unrecognized labels fall back to the default position
impl From<String> for PagePosition {
    fn from(label: String) -> Self {
        PagePosition::from_label(&label).unwrap_or_default()
    }
}

impl From<PagePosition> for String {
    fn from(position: PagePosition) -> Self {
        position.label().to_string()
    }
}

impl fmt::Display for PagePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Background of a page or cover: a flat color or an image reference.
///
/// Stored as a bare string. Strings starting with `/` or `data:` are image
/// references, everything else is a color.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum Fill {
    Color(String),
    Image(String),
}

impl Fill {
    pub fn white() -> Self {
        Fill::Color("#ffffff".to_string())
    }

    pub fn parse(value: &str) -> Self {
        if value.starts_with('/') || value.starts_with("data:") {
            Fill::Image(value.to_string())
        } else {
            Fill::Color(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Fill::Color(s) | Fill::Image(s) => s,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Fill::Image(_))
    }
}

impl Default for Fill {
    fn default() -> Self {
        Fill::white()
    }
}

impl From<String> for Fill {
    fn from(value: String) -> Self {
        Fill::parse(&value)
    }
}

impl From<Fill> for String {
    fn from(fill: Fill) -> Self {
        match fill {
            Fill::Color(s) | Fill::Image(s) => s,
        }
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the eight printable faces of a zine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Surface {
    FrontCover,
    /// Interior page, numbered 1 through 6
    Page(u8),
    BackCover,
}

impl Surface {
    pub fn is_cover(self) -> bool {
        !matches!(self, Surface::Page(_))
    }

    pub fn label(self) -> String {
        match self {
            Surface::FrontCover => "Front Cover".to_string(),
            Surface::Page(n) => format!("Page {}", n),
            Surface::BackCover => "Back Cover".to_string(),
        }
    }
}

/// Printer's marks drawn on the print sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrinterMarks {
    /// Dashed lines where the sheet is folded
    pub fold_lines: bool,
    /// Solid line along the slit cut through the middle of the sheet
    pub cut_lines: bool,
}

impl Default for PrinterMarks {
    fn default() -> Self {
        Self {
            fold_lines: true,
            cut_lines: true,
        }
    }
}

/// Summary of a zine's contents
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZineStatistics {
    /// Interior pages with any text, decoration, track or non-default fill
    pub pages_customized: usize,
    /// Decorations across all pages and both covers
    pub decorations: usize,
    /// Interior pages with a selected track
    pub tracks_selected: usize,
    /// Characters of text across all pages and covers
    pub characters: usize,
    /// Surfaces whose background is an image
    pub image_backgrounds: usize,
}
