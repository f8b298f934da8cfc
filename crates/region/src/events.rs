use serde::{Deserialize, Serialize};

use crate::map::ShapeId;

/// Map-widget lifecycle events the controller listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MapEvent {
    /// The user finished drawing a new rectangle.
    DrawingCommit { shape: ShapeId },
    /// A corner handle was released.
    VertexDragEnd { shape: ShapeId },
    /// The whole shape was dragged and released.
    DragEnd { shape: ShapeId },
    /// Pan, zoom or resize finished.
    MoveEnd,
}

impl MapEvent {
    /// Widget-side event name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            MapEvent::DrawingCommit { .. } => "editable:drawing:commit",
            MapEvent::VertexDragEnd { .. } => "editable:vertex:dragend",
            MapEvent::DragEnd { .. } => "editable:dragend",
            MapEvent::MoveEnd => "moveend",
        }
    }

    pub fn shape(&self) -> Option<ShapeId> {
        match self {
            MapEvent::DrawingCommit { shape }
            | MapEvent::VertexDragEnd { shape }
            | MapEvent::DragEnd { shape } => Some(*shape),
            MapEvent::MoveEnd => None,
        }
    }
}
