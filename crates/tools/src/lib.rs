//! Replay of scripted map sessions.
//!
//! A script is a viewport plus a list of host actions and user gestures.
//! `replay` runs it through a headless `Session` and reports the resulting
//! store state, regions and controller metrics.

use foundation::math::{PixelSize, Viewport};
use foundation::{Corner, GeoPoint, LatLngBounds};
use region::{
    Appearance, HeadlessMap, MapEvent, MapWidget, RecordingLookup, RegionConfig, RegionController,
    Session, ShapeId,
};
use runtime::MetricsSnapshot;
use serde::{Deserialize, Serialize};
use store::{Action, AnalysisMode, AppState, Store};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub config: Option<RegionConfig>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    SetMode { mode: AnalysisMode },
    SetLoading { loading: bool },
    ClearBounds,
    StartDrawing,
    /// Finish the rectangle being drawn between two corners.
    CompleteRectangle { a: GeoPoint, b: GeoPoint },
    /// Drag a corner of the current region.
    DragVertex { corner: Corner, to: GeoPoint },
    /// Drag the current region as a whole.
    DragShape { d_lat: f64, d_lng: f64 },
    SetView { center: GeoPoint, zoom: f64 },
    Resize { size: PixelSize },
    DrawBounds { north: f64, south: f64, east: f64, west: f64 },
    Dispatch { action: Action },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionReport {
    pub bounds: LatLngBounds,
    pub appearance: Appearance,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub state: AppState,
    pub regions: Vec<RegionReport>,
    pub drawing: bool,
    pub lookups: Vec<(GeoPoint, GeoPoint)>,
    /// Gestures the map refused, e.g. dragging a disabled region.
    pub rejected_gestures: usize,
    pub metrics: MetricsSnapshot,
}

pub fn parse_script(json: &str) -> Result<Script, String> {
    serde_json::from_str(json).map_err(|e| format!("parse script: {e}"))
}

/// Runs `script` against a fresh headless session.
///
/// A `config` embedded in the script overrides the one passed in. The
/// effective config is validated before any step runs.
pub fn replay(script: &Script, config: RegionConfig) -> Result<Report, String> {
    let config = script.config.clone().unwrap_or(config);
    config.validate().map_err(|e| format!("config: {e}"))?;
    let map = HeadlessMap::new(script.viewport.unwrap_or_default());
    let controller = RegionController::new(map, RecordingLookup::default(), config);
    let mut session = Session::new(controller, Store::new());
    let mut rejected = 0;

    for (index, step) in script.steps.iter().enumerate() {
        match apply_step(&mut session, step) {
            Some(true) | None => {}
            Some(false) => {
                warn!(index, ?step, "gesture rejected by the map");
                rejected += 1;
            }
        }
        session.pump();
    }

    Ok(report(&session, rejected))
}

/// `Some(false)` when a gesture produced no map event.
fn apply_step(session: &mut Session<HeadlessMap, RecordingLookup>, step: &Step) -> Option<bool> {
    let event: Option<MapEvent> = match step {
        Step::SetMode { mode } => {
            session.dispatch(Action::SetAnalysisMode(*mode));
            return None;
        }
        Step::SetLoading { loading } => {
            session.dispatch(Action::SetLoading(*loading));
            return None;
        }
        Step::ClearBounds => {
            session.dispatch(Action::ClearBounds);
            return None;
        }
        Step::Dispatch { action } => {
            session.dispatch(action.clone());
            return None;
        }
        Step::StartDrawing => {
            session.start_drawing();
            return None;
        }
        Step::DrawBounds {
            north,
            south,
            east,
            west,
        } => {
            session.draw_bounds(LatLngBounds::from_edges(*north, *south, *east, *west));
            return None;
        }
        Step::CompleteRectangle { a, b } => session.map_mut().complete_rectangle(*a, *b),
        Step::DragVertex { corner, to } => current_shape(session)
            .and_then(|shape| session.map_mut().drag_vertex(shape, *corner, *to)),
        Step::DragShape { d_lat, d_lng } => current_shape(session)
            .and_then(|shape| session.map_mut().drag_shape(shape, *d_lat, *d_lng)),
        Step::SetView { center, zoom } => Some(session.map_mut().set_view(*center, *zoom)),
        Step::Resize { size } => Some(session.map_mut().resize(*size)),
    };

    match event {
        Some(event) => {
            session.post(event);
            Some(true)
        }
        None => Some(false),
    }
}

fn current_shape(session: &Session<HeadlessMap, RecordingLookup>) -> Option<ShapeId> {
    let registry = session.controller().registry();
    registry.current_id().and_then(|id| registry.shape(id))
}

fn report(session: &Session<HeadlessMap, RecordingLookup>, rejected_gestures: usize) -> Report {
    let controller = session.controller();
    let viewport = *session.map().viewport();
    let regions = controller
        .registry()
        .iter()
        .map(|(_, rect, _)| RegionReport {
            bounds: rect.bounds,
            appearance: rect.appearance,
            ratio: region::geometry::region_viewport_ratio(&rect.bounds, &viewport),
        })
        .collect();

    Report {
        state: session.state().clone(),
        regions,
        drawing: controller.is_drawing(),
        lookups: controller.lookup().requests.clone(),
        rejected_gestures,
        metrics: controller.metrics().snapshot(),
    }
}
