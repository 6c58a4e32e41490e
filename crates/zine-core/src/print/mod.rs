//! Print layout for the folded single-sheet zine
//!
//! This module maps the eight surfaces onto one sheet:
//! - Imposition (which surface goes in which cell, and how it is turned)
//! - Grid layout (slot sizes, fold and slit positions)
//! - Sheet composition (paper transform and per-cell content)
//! - Printer's marks

mod grid;
mod imposition;
mod marks;
mod sheet;

pub use grid::*;
pub use imposition::*;
pub use marks::*;
pub use sheet::*;
