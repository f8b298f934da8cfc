//! Region-of-interest selection on an interactive map.
//!
//! `RegionController` keeps at most one user-drawn rectangle alive, mirrors
//! its extent into the application store, and enables or disables its edit
//! handles as loading state, analysis mode and viewport size change.

pub mod appearance;
pub mod config;
pub mod controller;
pub mod events;
pub mod geometry;
pub mod lookup;
pub mod map;
pub mod registry;
pub mod session;

pub use appearance::{Appearance, DISABLED_CLASS, ShapeStyle};
pub use config::{ConfigError, RegionConfig};
pub use controller::RegionController;
pub use events::MapEvent;
pub use lookup::{DateRangeLookup, RecordingLookup};
pub use map::{HeadlessMap, MapWidget, OverlayId, ShapeId};
pub use registry::{BoundsRegistry, Evicted, Rectangle, RegionId};
pub use session::Session;
