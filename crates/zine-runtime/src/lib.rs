use std::path::PathBuf;

// Re-export types from the core crate
pub use zine_core::{
    CoverData, CoverPatch, GrabMode, PageData, PagePatch, PrintOptions, PrintSheet, Surface,
    Track, Zine, ZineStatistics,
};

mod images;
mod lookup;
mod worker;

pub use images::{ImageError, load_image_data_uri};
pub use lookup::{CatalogLookup, TrackLookup};
pub use worker::worker_task;

/// Commands sent from the UI to the worker
#[derive(Debug)]
pub enum ZineCommand {
    // Editing
    UpdatePage {
        page: u8,
        patch: PagePatch,
    },
    UpdateCover {
        patch: CoverPatch,
    },
    /// The page currently on screen; track results for other pages are
    /// dropped
    SetActivePage {
        page: Option<u8>,
    },
    AddDecoration {
        surface: Surface,
        /// Catalog entry id
        element_id: String,
    },
    RemoveDecoration {
        surface: Surface,
        id: String,
    },
    PointerDown {
        surface: Surface,
        id: String,
        mode: GrabMode,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    PointerUp,

    // Tracks
    /// Search for tracks on `page`, which also becomes the active page
    SearchTracks {
        page: u8,
        query: String,
    },
    SelectTrack {
        page: u8,
        track: Track,
    },

    // Images
    /// Read an image file and use it as the surface background
    LoadImage {
        surface: Surface,
        path: PathBuf,
    },

    // Saved zines
    NewZine,
    SaveZine,
    /// Save and start over on a blank zine
    FinishZine,
    LoadZine {
        id: String,
    },
    DeleteZine {
        id: String,
    },
    ListZines,
    /// Ask for a `PageChanged` with the page's current state
    GetPage {
        page: u8,
    },

    // Output
    GeneratePreview {
        options: PrintOptions,
    },
    CalculateStats,
    LoadPrintOptions {
        path: PathBuf,
    },
}

/// Updates sent from the worker to the UI
#[derive(Debug, Clone)]
pub enum ZineUpdate {
    PageChanged {
        page: u8,
        data: PageData,
    },
    CoverChanged {
        cover: CoverData,
    },
    /// The session was reset or replaced by a loaded zine
    SessionReplaced {
        zine_id: Option<String>,
        cover: CoverData,
    },
    TrackResults {
        page: u8,
        query: String,
        tracks: Vec<Track>,
    },
    Saved {
        id: String,
    },
    Deleted {
        id: String,
    },
    ZineList {
        zines: Vec<Zine>,
    },
    PreviewGenerated {
        sheet: Box<PrintSheet>,
    },
    StatsCalculated {
        stats: ZineStatistics,
    },
    PrintOptionsLoaded {
        options: PrintOptions,
    },
    Error {
        message: String,
    },
}
