//! Print sheet composition
//!
//! Lays the eight surfaces out on one sheet and resolves everything a
//! renderer needs per cell: where it goes on paper, how it is turned, and
//! what it shows.

use crate::catalog::{Font, contrast_color};
use crate::constants::*;
use crate::geometry::{Rect, SongTitleArea, TextArea, song_box, song_title_area, text_area};
use crate::model::{CoverData, PageData, PageMap};
use crate::options::PrintOptions;
use crate::placement::DecorativeElement;
use crate::types::*;

use super::{
    GridLayout, GridPosition, MarkLine, ZINE_IMPOSITION, create_grid_layout, generate_marks,
    surface_bounds,
};

// =============================================================================
// Sheet Transform
// =============================================================================

/// Maps sheet-local layout units onto paper.
///
/// The grid is offset, then scaled about the top center of the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetTransform {
    /// Sheet width in layout units
    pub sheet_width: f32,
    /// Sheet height in layout units
    pub sheet_height: f32,
    pub scale: f32,
    pub offset: (f32, f32),
}

impl SheetTransform {
    pub fn from_options(options: &PrintOptions) -> Self {
        let (width_mm, height_mm) = options.paper_mm();
        Self {
            sheet_width: mm_to_px(width_mm),
            sheet_height: mm_to_px(height_mm),
            scale: options.scale,
            offset: options.offset_px,
        }
    }

    /// Transform a sheet-local point, still in layout units
    pub fn apply(&self, (x, y): (f32, f32)) -> (f32, f32) {
        let origin_x = self.sheet_width / 2.0;
        (
            origin_x + self.scale * (x - origin_x + self.offset.0),
            self.scale * (y + self.offset.1),
        )
    }

    /// Transform a sheet-local point to millimetres on paper
    pub fn point_to_mm(&self, point: (f32, f32)) -> (f32, f32) {
        let (x, y) = self.apply(point);
        (px_to_mm(x), px_to_mm(y))
    }

    /// Transform a sheet-local rect to millimetres on paper
    pub fn rect_to_mm(&self, rect: &Rect) -> Rect {
        let (left, top) = self.point_to_mm((rect.left, rect.top));
        Rect::new(
            top,
            left,
            px_to_mm(rect.width * self.scale),
            px_to_mm(rect.height * self.scale),
        )
    }
}

// =============================================================================
// Cell Content
// =============================================================================

/// A text region and what it shows
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextBlock {
    pub area: TextArea,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SongTitleBlock {
    pub area: SongTitleArea,
    pub text: String,
}

/// A fully resolved interior page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageLayout {
    pub background: Fill,
    pub font: Font,
    pub position: PagePosition,
    /// Primary region first, then the overflow region if the layout has one
    pub text: Vec<TextBlock>,
    pub song_box: Option<Rect>,
    pub song_title: Option<SongTitleBlock>,
    /// Album art for the song box
    pub cover_art: Option<String>,
    /// In draw order
    pub decorations: Vec<DecorativeElement>,
}

impl PageLayout {
    pub fn from_page(page: &PageData) -> Self {
        let mut text = Vec::new();
        if let Some(area) = text_area(page.position, false) {
            text.push(TextBlock {
                area,
                text: page.primary_text().to_string(),
            });
        }
        if let (Some(area), Some(secondary)) =
            (text_area(page.position, true), page.secondary_text())
        {
            text.push(TextBlock {
                area,
                text: secondary.to_string(),
            });
        }

        let song_title = song_title_area(page.position)
            .zip(page.visible_song_title())
            .map(|(area, title)| SongTitleBlock {
                area,
                text: title.to_string(),
            });

        Self {
            background: page.background.clone(),
            font: page.font,
            position: page.position,
            text,
            song_box: song_box(page.position),
            song_title,
            cover_art: page
                .selected_track
                .as_ref()
                .and_then(|t| t.cover_art())
                .map(str::to_string),
            decorations: page.decorations.elements().to_vec(),
        }
    }
}

/// A fully resolved cover
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverLayout {
    pub background: Fill,
    pub title: String,
    /// Text color that stays readable on the background
    pub title_color: String,
    /// Center of the title column, which runs vertically
    pub title_center: (f32, f32),
    pub title_span: f32,
    pub title_rotation_degrees: f32,
    pub decorations: Vec<DecorativeElement>,
}

impl CoverLayout {
    /// The front cover. An untitled zine still prints a title.
    pub fn front(cover: &CoverData) -> Self {
        let title = if cover.title.is_empty() {
            UNTITLED_ZINE.to_string()
        } else {
            cover.title.clone()
        };
        Self {
            title_color: title_color(&cover.selected_color),
            background: cover.selected_color.clone(),
            title,
            title_center: (FRONT_TITLE_CENTER_X, PAGE_HEIGHT / 2.0),
            title_span: COVER_TITLE_SPAN,
            title_rotation_degrees: COVER_TITLE_ROTATION,
            decorations: cover.front_decorations.elements().to_vec(),
        }
    }

    pub fn back(cover: &CoverData) -> Self {
        let background = cover.back_fill();
        Self {
            title_color: title_color(&background),
            background,
            title: cover.back_title_text().to_string(),
            title_center: (BACK_TITLE_CENTER_X, PAGE_HEIGHT / 2.0),
            title_span: COVER_TITLE_SPAN,
            title_rotation_degrees: COVER_TITLE_ROTATION,
            decorations: cover.back_decorations.elements().to_vec(),
        }
    }
}

fn title_color(background: &Fill) -> String {
    match background {
        Fill::Color(hex) => contrast_color(hex).to_string(),
        Fill::Image(_) => "#000000".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CellContent {
    Page(PageLayout),
    Cover(CoverLayout),
}

// =============================================================================
// Sheet
// =============================================================================

/// One surface placed on the sheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrintCell {
    pub surface: Surface,
    pub grid_pos: GridPosition,
    /// Rotation about the cell center
    pub rotation: Rotation,
    /// Sheet-local bounds in layout units
    pub bounds: Rect,
    /// Bounds on paper in millimetres, after the sheet transform
    pub paper_mm: Rect,
    pub content: CellContent,
}

/// The composed print sheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrintSheet {
    /// Paper size in millimetres, orientation applied
    pub paper_mm: (f32, f32),
    pub transform: SheetTransform,
    pub grid: GridLayout,
    /// In row-major order
    pub cells: Vec<PrintCell>,
    pub marks: Vec<MarkLine>,
}

impl PrintSheet {
    pub fn cell(&self, surface: Surface) -> Option<&PrintCell> {
        self.cells.iter().find(|c| c.surface == surface)
    }

    pub fn row(&self, row: usize) -> impl Iterator<Item = &PrintCell> {
        self.cells.iter().filter(move |c| c.grid_pos.row == row)
    }
}

/// Compose the print sheet with the default options
pub fn compose_print_sheet(cover: &CoverData, pages: &PageMap) -> PrintSheet {
    build_sheet(cover, pages, &PrintOptions::default())
}

/// Compose the print sheet with custom options.
///
/// Pages missing from `pages` print as blank default pages.
pub fn compose_print_sheet_with(
    cover: &CoverData,
    pages: &PageMap,
    options: &PrintOptions,
) -> Result<PrintSheet> {
    options.validate()?;
    Ok(build_sheet(cover, pages, options))
}

fn build_sheet(cover: &CoverData, pages: &PageMap, options: &PrintOptions) -> PrintSheet {
    let transform = SheetTransform::from_options(options);
    let grid = create_grid_layout(transform.sheet_width, transform.sheet_height);

    let cells = ZINE_IMPOSITION
        .iter()
        .map(|slot| {
            let bounds = surface_bounds(&grid, slot.grid_pos);
            PrintCell {
                surface: slot.surface,
                grid_pos: slot.grid_pos,
                rotation: slot.rotation,
                bounds,
                paper_mm: transform.rect_to_mm(&bounds),
                content: cell_content(slot.surface, cover, pages),
            }
        })
        .collect();

    let marks = generate_marks(&options.marks, &grid, &transform);

    PrintSheet {
        paper_mm: options.paper_mm(),
        transform,
        grid,
        cells,
        marks,
    }
}

fn cell_content(surface: Surface, cover: &CoverData, pages: &PageMap) -> CellContent {
    match surface {
        Surface::FrontCover => CellContent::Cover(CoverLayout::front(cover)),
        Surface::BackCover => CellContent::Cover(CoverLayout::back(cover)),
        Surface::Page(number) => match pages.get(&number) {
            Some(page) => CellContent::Page(PageLayout::from_page(page)),
            None => {
                log::debug!("Page {} missing, printing defaults", number);
                CellContent::Page(PageLayout::from_page(&PageData::default()))
            }
        },
    }
}
