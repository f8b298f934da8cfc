//! Enabled/disabled appearance of a region rectangle.
//!
//! The style is a pure function of the state. Transitions push style,
//! marker class and edit-handle changes to the map widget only when the
//! state actually changes, so repeated requests are observably free.

use serde::Serialize;

use crate::map::{MapWidget, ShapeId};
use crate::registry::Rectangle;

/// Marker class the view layer keys its disabled rendering on.
pub const DISABLED_CLASS: &str = "map-bounding-box-disabled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Appearance {
    /// Solid stroke, edit and drag handles live.
    #[default]
    Enabled,
    /// Dashed grey stroke, no handles.
    Disabled,
}

impl Appearance {
    pub fn is_enabled(self) -> bool {
        self == Appearance::Enabled
    }

    pub fn style(self) -> ShapeStyle {
        match self {
            Appearance::Enabled => ShapeStyle::enabled(),
            Appearance::Disabled => ShapeStyle::disabled(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeStyle {
    pub weight: f64,
    pub color: &'static str,
    /// `None` renders no fill.
    pub fill: Option<&'static str>,
    pub fill_opacity: Option<f64>,
    pub dash_array: Option<[u32; 2]>,
}

impl ShapeStyle {
    pub fn enabled() -> Self {
        Self {
            weight: 3.0,
            color: "#3388ff",
            fill: None,
            fill_opacity: None,
            dash_array: None,
        }
    }

    pub fn disabled() -> Self {
        Self {
            weight: 1.0,
            color: "#aaa",
            fill: Some("#aaa"),
            fill_opacity: Some(0.0),
            dash_array: Some([5, 3]),
        }
    }
}

/// Moves `rect` to `Disabled`. Returns `false` if it already was.
pub fn disable<M: MapWidget + ?Sized>(map: &mut M, shape: ShapeId, rect: &mut Rectangle) -> bool {
    if rect.appearance == Appearance::Disabled {
        return false;
    }
    rect.appearance = Appearance::Disabled;
    map.set_shape_style(shape, &ShapeStyle::disabled());
    map.add_shape_class(shape, DISABLED_CLASS);
    map.disable_editing(shape);
    true
}

/// Moves `rect` to `Enabled`. Returns `false` if it already was.
pub fn enable<M: MapWidget + ?Sized>(map: &mut M, shape: ShapeId, rect: &mut Rectangle) -> bool {
    if rect.appearance == Appearance::Enabled {
        return false;
    }
    rect.appearance = Appearance::Enabled;
    map.set_shape_style(shape, &ShapeStyle::enabled());
    map.remove_shape_class(shape, DISABLED_CLASS);
    map.enable_editing(shape);
    true
}
