//! Free-form placement of decorative elements
//!
//! Each page and cover owns a [`DecorationLayer`]: an ordered arena of
//! placed elements. Order is z-order, later elements draw on top. Element
//! ids come from a per-layer counter and are unique within the layer.
//!
//! Pointer gestures go through [`PointerCapture`], a single slot holding the
//! element currently grabbed for a drag or a resize.

use crate::catalog::{CatalogEntry, FALLBACK_SYMBOL};
use crate::constants::*;
use crate::geometry::size_from_pointer;
use crate::types::Surface;

/// A decoration placed on a canvas
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DecorativeElement {
    pub id: String,
    /// Left edge of the bounding box
    pub x: f32,
    /// Top edge of the bounding box
    pub y: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub symbol: String,
    /// Catalog entry the element was created from
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub element_id: Option<String>,
    /// Diameter; unset means [`DEFAULT_ELEMENT_SIZE`]
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub size: Option<f32>,
}

impl DecorativeElement {
    pub fn effective_size(&self) -> f32 {
        self.size.unwrap_or(DEFAULT_ELEMENT_SIZE)
    }

    pub fn center(&self) -> (f32, f32) {
        let half = self.effective_size() / 2.0;
        (self.x + half, self.y + half)
    }

    /// Glyph to draw; old records may lack one
    pub fn glyph(&self) -> &str {
        if self.symbol.is_empty() {
            FALLBACK_SYMBOL
        } else {
            &self.symbol
        }
    }
}

/// Top-left corner for a drag ending at the given pointer position
pub fn drag_position(pointer_x: f32, pointer_y: f32) -> (f32, f32) {
    (
        (pointer_x - DRAG_ANCHOR_OFFSET).clamp(0.0, MAX_DRAG_X),
        (pointer_y - DRAG_ANCHOR_OFFSET).clamp(0.0, MAX_DRAG_Y),
    )
}

// =============================================================================
// Layer
// =============================================================================

/// The decorations of one page or cover.
///
/// Serializes as a plain array of elements.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<DecorativeElement>", into = "Vec<DecorativeElement>")
)]
pub struct DecorationLayer {
    elements: Vec<DecorativeElement>,
    next_id: u64,
}

impl DecorationLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[DecorativeElement] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecorativeElement> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&DecorativeElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut DecorativeElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    fn fresh_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let candidate = format!("d{}", self.next_id);
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }
    }

    /// Place a catalog decoration at the spawn point, on top of the others
    pub fn add(&mut self, entry: &CatalogEntry) -> DecorativeElement {
        self.add_symbol(entry.symbol, Some(entry.id))
    }

    /// Place an arbitrary glyph at the spawn point
    pub fn add_symbol(&mut self, symbol: &str, element_id: Option<&str>) -> DecorativeElement {
        let element = DecorativeElement {
            id: self.fresh_id(),
            x: SPAWN_POINT.0,
            y: SPAWN_POINT.1,
            symbol: symbol.to_string(),
            element_id: element_id.map(str::to_string),
            size: None,
        };
        self.elements.push(element.clone());
        element
    }

    /// Drag an element so its anchor follows the pointer.
    ///
    /// Returns `false` if no element has this id.
    pub fn move_to(&mut self, id: &str, pointer_x: f32, pointer_y: f32) -> bool {
        let Some(element) = self.get_mut(id) else {
            return false;
        };
        let (x, y) = drag_position(pointer_x, pointer_y);
        element.x = x;
        element.y = y;
        true
    }

    /// Resize an element around its center from the pointer distance.
    ///
    /// Returns `false` if no element has this id.
    pub fn resize(&mut self, id: &str, pointer_x: f32, pointer_y: f32) -> bool {
        let Some(element) = self.get_mut(id) else {
            return false;
        };
        element.size = Some(size_from_pointer(element.center(), (pointer_x, pointer_y)));
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<DecorativeElement> {
        let index = self.elements.iter().position(|e| e.id == id)?;
        Some(self.elements.remove(index))
    }
}

/// Layers compare by their elements; the id counter is bookkeeping.
impl PartialEq for DecorationLayer {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl From<Vec<DecorativeElement>> for DecorationLayer {
    fn from(elements: Vec<DecorativeElement>) -> Self {
        let next_id = elements.len() as u64;
        Self { elements, next_id }
    }
}

impl From<DecorationLayer> for Vec<DecorativeElement> {
    fn from(layer: DecorationLayer) -> Self {
        layer.elements
    }
}

// =============================================================================
// Pointer Capture
// =============================================================================

/// What a grabbed element is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabMode {
    Drag,
    Resize,
}

/// The element currently held by the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct Grab {
    pub surface: Surface,
    pub element_id: String,
    pub mode: GrabMode,
}

/// Single-slot pointer capture: at most one element is dragged or resized
/// at a time.
#[derive(Debug, Clone, Default)]
pub struct PointerCapture {
    active: Option<Grab>,
}

impl PointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture an element. Fails while another element is held.
    pub fn grab(&mut self, surface: Surface, element_id: &str, mode: GrabMode) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(Grab {
            surface,
            element_id: element_id.to_string(),
            mode,
        });
        true
    }

    pub fn active(&self) -> Option<&Grab> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Pointer up or pointer leave. Always clears the slot.
    pub fn release(&mut self) -> Option<Grab> {
        self.active.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_entry;

    fn star() -> &'static CatalogEntry {
        find_entry("star").unwrap()
    }

    #[test]
    fn test_add_uses_spawn_point_and_defaults() {
        let mut layer = DecorationLayer::new();
        let element = layer.add(star());

        assert_eq!((element.x, element.y), (120.0, 180.0));
        assert_eq!(element.symbol, "★");
        assert_eq!(element.element_id.as_deref(), Some("star"));
        assert_eq!(element.effective_size(), 24.0);
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn test_ids_unique_after_removals() {
        let mut layer = DecorationLayer::new();
        let a = layer.add(star());
        let b = layer.add(star());
        layer.remove(&a.id);
        let c = layer.add(star());

        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_ids_unique_against_loaded_elements() {
        let loaded = vec![DecorativeElement {
            id: "d2".to_string(),
            x: 0.0,
            y: 0.0,
            symbol: "♪".to_string(),
            element_id: None,
            size: None,
        }];
        let mut layer = DecorationLayer::from(loaded);
        let added = layer.add(star());
        assert_ne!(added.id, "d2");
    }

    #[test]
    fn test_move_clamps_to_bounds() {
        let mut layer = DecorationLayer::new();
        let id = layer.add(star()).id;

        assert!(layer.move_to(&id, 100.0, 60.0));
        let e = layer.get(&id).unwrap();
        assert_eq!((e.x, e.y), (85.0, 45.0));

        layer.move_to(&id, -500.0, 9000.0);
        let e = layer.get(&id).unwrap();
        assert_eq!((e.x, e.y), (0.0, 395.0));

        layer.move_to(&id, 1e6, -1e6);
        let e = layer.get(&id).unwrap();
        assert_eq!((e.x, e.y), (245.0, 0.0));
    }

    #[test]
    fn test_resize_from_center() {
        let mut layer = DecorationLayer::new();
        let id = layer.add(star()).id;
        // Center of the default element is (132, 192)
        assert!(layer.resize(&id, 132.0, 222.0));
        assert_eq!(layer.get(&id).unwrap().size, Some(60.0));

        layer.resize(&id, 1000.0, 1000.0);
        assert_eq!(layer.get(&id).unwrap().size, Some(100.0));
    }

    #[test]
    fn test_missing_ids_are_noops() {
        let mut layer = DecorationLayer::new();
        layer.add(star());
        let before = layer.clone();

        assert!(!layer.move_to("nope", 10.0, 10.0));
        assert!(!layer.resize("nope", 10.0, 10.0));
        assert!(layer.remove("nope").is_none());
        assert_eq!(layer, before);
    }

    #[test]
    fn test_capture_is_exclusive() {
        let mut capture = PointerCapture::new();
        assert!(capture.grab(Surface::Page(1), "d1", GrabMode::Drag));
        assert!(!capture.grab(Surface::Page(1), "d2", GrabMode::Resize));
        assert_eq!(capture.active().unwrap().element_id, "d1");

        assert!(capture.release().is_some());
        assert!(capture.release().is_none());
        assert!(capture.grab(Surface::Page(1), "d2", GrabMode::Resize));
    }
}
