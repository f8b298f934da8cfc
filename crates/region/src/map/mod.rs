//! Capabilities the controller needs from an interactive map widget.

mod headless;

pub use headless::{CallCounts, HeadlessMap, HeadlessShape};

use foundation::math::Viewport;
use foundation::{Id, LatLngBounds};
use serde::{Deserialize, Serialize};

use crate::appearance::ShapeStyle;

/// On-screen rectangle owned by the map widget.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub Id);

/// Dimming overlay owned by the map widget.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayId(pub Id);

/// Minimal map-widget surface: draw mode, per-shape styling and edit
/// handles, a dimming overlay, and the current viewport for projection.
///
/// Calls naming a shape or overlay the widget no longer knows are ignored.
pub trait MapWidget {
    /// Enters the native "draw a rectangle" interaction.
    fn start_rectangle(&mut self);
    /// Leaves any drawing interaction.
    fn stop_drawing(&mut self);
    fn is_drawing(&self) -> bool;

    /// Adds a rectangle shape. New shapes are not editable.
    fn add_rectangle(&mut self, bounds: LatLngBounds) -> ShapeId;
    fn remove_shape(&mut self, shape: ShapeId);
    fn shape_bounds(&self, shape: ShapeId) -> Option<LatLngBounds>;

    fn set_shape_style(&mut self, shape: ShapeId, style: &ShapeStyle);
    fn add_shape_class(&mut self, shape: ShapeId, class: &str);
    fn remove_shape_class(&mut self, shape: ShapeId, class: &str);
    fn enable_editing(&mut self, shape: ShapeId);
    fn disable_editing(&mut self, shape: ShapeId);

    /// Adds a dimming overlay. `frame` leaves that area undimmed; `None`
    /// follows whatever is being drawn.
    fn add_overlay(&mut self, frame: Option<LatLngBounds>) -> OverlayId;
    fn remove_overlay(&mut self, overlay: OverlayId);

    fn viewport(&self) -> &Viewport;
}
