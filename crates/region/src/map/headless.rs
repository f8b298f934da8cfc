use std::collections::BTreeMap;

use foundation::math::{PixelSize, Viewport};
use foundation::{Corner, GeoPoint, IdAllocator, LatLngBounds};
use serde::Serialize;
use tracing::debug;

use super::{MapWidget, OverlayId, ShapeId};
use crate::appearance::ShapeStyle;
use crate::events::MapEvent;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlessShape {
    pub bounds: LatLngBounds,
    pub style: Option<ShapeStyle>,
    /// Class list; adding a present class is a no-op, as in the DOM.
    pub classes: Vec<String>,
    pub editable: bool,
}

/// Every capability call, including ones with no visible effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallCounts {
    pub start_drawing: u32,
    pub stop_drawing: u32,
    pub style_changes: u32,
    pub class_adds: u32,
    pub class_removes: u32,
    pub enable_editing: u32,
    pub disable_editing: u32,
    pub shapes_removed: u32,
    pub overlays_added: u32,
    pub overlays_removed: u32,
}

/// In-memory map widget.
///
/// Implements `MapWidget` and simulates the user gestures a real widget
/// would turn into `MapEvent`s.
#[derive(Debug, Default)]
pub struct HeadlessMap {
    viewport: Viewport,
    ids: IdAllocator,
    shapes: BTreeMap<ShapeId, HeadlessShape>,
    overlays: BTreeMap<OverlayId, Option<LatLngBounds>>,
    drawing: bool,
    calls: CallCounts,
}

impl HeadlessMap {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn shape(&self, shape: ShapeId) -> Option<&HeadlessShape> {
        self.shapes.get(&shape)
    }

    pub fn shape_ids(&self) -> Vec<ShapeId> {
        self.shapes.keys().copied().collect()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn overlays(&self) -> impl Iterator<Item = (OverlayId, Option<LatLngBounds>)> + '_ {
        self.overlays.iter().map(|(id, frame)| (*id, *frame))
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    pub fn calls(&self) -> &CallCounts {
        &self.calls
    }

    /// Finishes the rectangle being drawn. `None` unless in draw mode.
    pub fn complete_rectangle(&mut self, a: GeoPoint, b: GeoPoint) -> Option<MapEvent> {
        if !self.drawing {
            return None;
        }
        self.drawing = false;
        let shape = self.add_rectangle(LatLngBounds::from_corners(a, b));
        // Freshly drawn shapes come out of draw mode already editable.
        if let Some(s) = self.shapes.get_mut(&shape) {
            s.editable = true;
        }
        Some(MapEvent::DrawingCommit { shape })
    }

    /// Drags one corner handle. Rejected for non-editable shapes.
    pub fn drag_vertex(
        &mut self,
        shape: ShapeId,
        corner: Corner,
        to: GeoPoint,
    ) -> Option<MapEvent> {
        let s = self.shapes.get_mut(&shape).filter(|s| s.editable)?;
        s.bounds = s.bounds.with_corner(corner, to);
        Some(MapEvent::VertexDragEnd { shape })
    }

    /// Drags the whole shape. Rejected for non-editable shapes.
    pub fn drag_shape(&mut self, shape: ShapeId, d_lat: f64, d_lng: f64) -> Option<MapEvent> {
        let s = self.shapes.get_mut(&shape).filter(|s| s.editable)?;
        s.bounds = s.bounds.translate(d_lat, d_lng);
        Some(MapEvent::DragEnd { shape })
    }

    /// Pans and zooms.
    pub fn set_view(&mut self, center: GeoPoint, zoom: f64) -> MapEvent {
        self.viewport.pan_to(center);
        self.viewport.set_zoom(zoom);
        MapEvent::MoveEnd
    }

    pub fn resize(&mut self, size: PixelSize) -> MapEvent {
        self.viewport.resize(size);
        MapEvent::MoveEnd
    }
}

impl MapWidget for HeadlessMap {
    fn start_rectangle(&mut self) {
        self.calls.start_drawing += 1;
        self.drawing = true;
    }

    fn stop_drawing(&mut self) {
        self.calls.stop_drawing += 1;
        self.drawing = false;
    }

    fn is_drawing(&self) -> bool {
        self.drawing
    }

    fn add_rectangle(&mut self, bounds: LatLngBounds) -> ShapeId {
        let shape = ShapeId(self.ids.next_id());
        self.shapes.insert(
            shape,
            HeadlessShape {
                bounds,
                style: None,
                classes: Vec::new(),
                editable: false,
            },
        );
        debug!(shape = shape.0.get(), "shape added");
        shape
    }

    fn remove_shape(&mut self, shape: ShapeId) {
        if self.shapes.remove(&shape).is_some() {
            self.calls.shapes_removed += 1;
        }
    }

    fn shape_bounds(&self, shape: ShapeId) -> Option<LatLngBounds> {
        self.shapes.get(&shape).map(|s| s.bounds)
    }

    fn set_shape_style(&mut self, shape: ShapeId, style: &ShapeStyle) {
        self.calls.style_changes += 1;
        if let Some(s) = self.shapes.get_mut(&shape) {
            s.style = Some(style.clone());
        }
    }

    fn add_shape_class(&mut self, shape: ShapeId, class: &str) {
        self.calls.class_adds += 1;
        if let Some(s) = self.shapes.get_mut(&shape) {
            if !s.classes.iter().any(|c| c == class) {
                s.classes.push(class.to_string());
            }
        }
    }

    fn remove_shape_class(&mut self, shape: ShapeId, class: &str) {
        self.calls.class_removes += 1;
        if let Some(s) = self.shapes.get_mut(&shape) {
            s.classes.retain(|c| c != class);
        }
    }

    fn enable_editing(&mut self, shape: ShapeId) {
        self.calls.enable_editing += 1;
        if let Some(s) = self.shapes.get_mut(&shape) {
            s.editable = true;
        }
    }

    fn disable_editing(&mut self, shape: ShapeId) {
        self.calls.disable_editing += 1;
        if let Some(s) = self.shapes.get_mut(&shape) {
            s.editable = false;
        }
    }

    fn add_overlay(&mut self, frame: Option<LatLngBounds>) -> OverlayId {
        self.calls.overlays_added += 1;
        let overlay = OverlayId(self.ids.next_id());
        self.overlays.insert(overlay, frame);
        overlay
    }

    fn remove_overlay(&mut self, overlay: OverlayId) {
        if self.overlays.remove(&overlay).is_some() {
            self.calls.overlays_removed += 1;
        }
    }

    fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}
