use foundation::LatLngBounds;
use foundation::math::format_coordinate;
use serde::{Deserialize, Serialize};

/// Region extent as written to the store: fixed-point decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsPayload {
    pub north: String,
    pub south: String,
    pub east: String,
    pub west: String,
}

impl BoundsPayload {
    /// Renders `bounds` at store precision.
    pub fn from_bounds(bounds: &LatLngBounds) -> Self {
        Self {
            north: format_coordinate(bounds.north()),
            south: format_coordinate(bounds.south()),
            east: format_coordinate(bounds.east()),
            west: format_coordinate(bounds.west()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisMode {
    #[default]
    Point,
    Region,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingState {
    #[serde(rename = "isLoading")]
    pub is_loading: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub bounds: Option<BoundsPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(rename = "analysisMode")]
    pub analysis_mode: AnalysisMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub loading: LoadingState,
    pub view: ViewState,
    pub app: AppSettings,
}

impl AppState {
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading
    }

    pub fn has_region(&self) -> bool {
        self.view.bounds.is_some()
    }

    pub fn in_region_mode(&self) -> bool {
        self.app.analysis_mode == AnalysisMode::Region
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetBounds(BoundsPayload),
    ClearBounds,
    SetLoading(bool),
    SetAnalysisMode(AnalysisMode),
}

/// Pure reducer.
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    let mut next = state.clone();
    match action {
        Action::SetBounds(payload) => next.view.bounds = Some(payload.clone()),
        Action::ClearBounds => next.view.bounds = None,
        Action::SetLoading(is_loading) => next.loading.is_loading = *is_loading,
        Action::SetAnalysisMode(mode) => next.app.analysis_mode = *mode,
    }
    next
}
