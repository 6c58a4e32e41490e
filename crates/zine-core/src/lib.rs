pub mod catalog;
pub mod constants;
pub mod geometry;
mod model;
mod options;
pub mod placement;
pub mod print;
mod session;
mod stats;
#[cfg(feature = "serde")]
pub mod store;
mod track;
mod types;
mod viewer;

pub use catalog::{CatalogEntry, Category, Font};
pub use model::*;
pub use options::*;
pub use placement::{DecorationLayer, DecorativeElement, GrabMode, PointerCapture};
pub use print::{PrintSheet, compose_print_sheet, compose_print_sheet_with};
pub use session::ZineSession;
pub use stats::calculate_statistics;
#[cfg(feature = "serde")]
pub use store::{FileStorage, MemoryStorage, Storage, ZineStore};
pub use track::*;
pub use types::*;
pub use viewer::*;
