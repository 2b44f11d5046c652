use crate::app::AppState;
use crate::config::{IconSpec, MapConfig};
use crate::geo::LatLng;
use crate::marker::{Marker, MarkerId};
use crate::palette::{ColorPalette, DotColor};
use serde::{Deserialize, Serialize};

pub const REMOVE_LABEL: &str = "Remove Dot";
pub const SIDEBAR_TITLE: &str = "Select Dot Color";
pub const SIDEBAR_ARIA: &str = "Color selection sidebar";
pub const USER_ARIA: &str = "Your current location";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotStyle {
    pub radius: f64,
    pub weight: f64,
    pub fill_opacity: f64,
}

impl Default for DotStyle {
    fn default() -> Self { DotStyle { radius: 8.0, weight: 2.0, fill_opacity: 0.8 } }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TileSource {
    pub url: String,
    pub attribution: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserPopup {
    pub message: String,
    pub hint: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RemoveControl {
    pub label: &'static str,
    pub aria_label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DotPopup {
    pub text: String,
    pub remove: Option<RemoveControl>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MarkerView {
    User {
        id: MarkerId,
        position: LatLng,
        draggable: bool,
        aria_label: &'static str,
        popup: UserPopup,
    },
    Dot {
        id: MarkerId,
        position: LatLng,
        draggable: bool,
        color: DotColor,
        style: DotStyle,
        aria_label: String,
        popup: DotPopup,
    },
}

impl MarkerView {
    pub fn id(&self) -> &MarkerId {
        match self {
            MarkerView::User { id, .. } | MarkerView::Dot { id, .. } => id,
        }
    }

    pub fn position(&self) -> LatLng {
        match self {
            MarkerView::User { position, .. } | MarkerView::Dot { position, .. } => *position,
        }
    }

    pub fn draggable(&self) -> bool {
        match self {
            MarkerView::User { draggable, .. } | MarkerView::Dot { draggable, .. } => *draggable,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub center: LatLng,
    pub zoom: f64,
    pub center_revision: u64,
    pub tile: TileSource,
    pub user_icon: IconSpec,
    pub markers: Vec<MarkerView>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum View {
    Loading { text: String },
    Ready(Scene),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorButton {
    pub name: &'static str,
    pub fill_color: &'static str,
    pub border_color: &'static str,
    pub pressed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sidebar {
    pub title: &'static str,
    pub aria_label: &'static str,
    pub buttons: Vec<ColorButton>,
}

pub fn dot_label(color: &DotColor) -> String { format!("Custom {} dot", color.name) }

pub(crate) fn marker_view(m: &Marker, state: &AppState, config: &MapConfig) -> MarkerView {
    match m.color {
        Some(color) if !m.is_user => {
            let label = dot_label(&color);
            let remove = m.draggable.then(|| RemoveControl {
                label: REMOVE_LABEL,
                aria_label: format!("Remove {} dot", color.name),
            });
            MarkerView::Dot {
                id: m.id.clone(),
                position: m.position,
                draggable: m.draggable,
                color,
                style: config.dot,
                popup: DotPopup { text: format!("{} at {}", label, m.position.label()), remove },
                aria_label: label,
            }
        }
        _ => MarkerView::User {
            id: m.id.clone(),
            position: m.position,
            draggable: m.draggable,
            aria_label: USER_ARIA,
            popup: UserPopup {
                message: state.location_error.clone().unwrap_or_else(|| config.messages.greeting.clone()),
                hint: config.messages.hint.clone(),
            },
        },
    }
}

pub(crate) fn scene(state: &AppState, config: &MapConfig, center_revision: u64) -> Scene {
    Scene {
        center: state.center,
        zoom: config.zoom,
        center_revision,
        tile: TileSource { url: config.tile_url.clone(), attribution: config.attribution.clone() },
        user_icon: config.user_icon.clone(),
        markers: state.markers.iter().map(|m| marker_view(m, state, config)).collect(),
    }
}

pub(crate) fn sidebar(palette: &ColorPalette) -> Sidebar {
    Sidebar {
        title: SIDEBAR_TITLE,
        aria_label: SIDEBAR_ARIA,
        buttons: palette
            .colors()
            .iter()
            .map(|c| ColorButton {
                name: c.name,
                fill_color: c.fill_color,
                border_color: c.border_color,
                pressed: palette.is_selected(c),
            })
            .collect(),
    }
}
