use crate::config::MapConfig;
use crate::error::DotmapError;
use crate::geo::LatLng;
use crate::location::{LocationOutcome, Resolution};
use crate::marker::{Clock, Marker, MarkerId, MarkerStore};
use crate::palette::{ColorPalette, DotColor};
use crate::view::{self, Scene, Sidebar, View};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

/// Per-session state, dropped with the map.
#[derive(Debug)]
pub struct AppState {
    pub center: LatLng,
    pub location_error: Option<String>,
    pub markers: MarkerStore,
    pub loading: bool,
    pub palette: ColorPalette,
}

impl AppState {
    pub fn selected_color(&self) -> DotColor { self.palette.selected() }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    LocationResolved(LocationOutcome),
    MapClick(LatLng),
    DragEnd { id: MarkerId, position: LatLng },
    RemoveDot { id: MarkerId },
    SelectColor(DotColor),
}

/// Result of a dispatch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dispatch {
    pub changed: bool,
    /// The event must not reach the map surface's click handler.
    pub consumed: bool,
    pub created: Option<MarkerId>,
}

impl Dispatch {
    fn ignored() -> Self { Dispatch::default() }
    fn changed(changed: bool) -> Self { Dispatch { changed, ..Dispatch::default() } }
}

pub struct MapApp {
    config: MapConfig,
    state: AppState,
    revision: u64,
    center_revision: u64,
}

impl Default for MapApp {
    fn default() -> Self { MapApp::new(MapConfig::default()) }
}

impl MapApp {
    pub fn new(config: MapConfig) -> Self { Self::with_store(config, MarkerStore::new()) }

    pub fn with_clock(config: MapConfig, clock: Box<dyn Clock>) -> Self {
        Self::with_store(config, MarkerStore::with_clock(clock))
    }

    fn with_store(config: MapConfig, markers: MarkerStore) -> Self {
        let state = AppState {
            center: config.default_center,
            location_error: None,
            markers,
            loading: true,
            palette: ColorPalette::new(),
        };
        MapApp { config, state, revision: 1, center_revision: 1 }
    }

    pub fn config(&self) -> &MapConfig { &self.config }
    pub fn state(&self) -> &AppState { &self.state }
    pub fn markers(&self) -> &MarkerStore { &self.state.markers }
    pub fn selected_color(&self) -> DotColor { self.state.selected_color() }
    /// Increments on every state change.
    pub fn revision(&self) -> u64 { self.revision }
    /// Increments whenever the map must re-center.
    pub fn center_revision(&self) -> u64 { self.center_revision }

    pub fn phase(&self) -> Phase {
        if self.state.loading { Phase::Loading } else { Phase::Ready }
    }

    pub fn is_ready(&self) -> bool { self.phase() == Phase::Ready }

    /// Single entry point for every state change. Invalid or premature
    /// actions are ignored.
    pub fn dispatch(&mut self, action: Action) -> Dispatch {
        let out = match action {
            Action::LocationResolved(outcome) => self.resolve(&outcome),
            Action::SelectColor(color) => {
                let before = self.state.palette;
                let known = self.state.palette.select(color);
                Dispatch { changed: known && before != self.state.palette, consumed: true, created: None }
            }
            _ if !self.is_ready() => Dispatch::ignored(),
            Action::MapClick(position) => {
                if !position.is_finite() {
                    return Dispatch::ignored();
                }
                let color = self.state.selected_color();
                let id = self.state.markers.append(position, color);
                Dispatch { changed: true, consumed: false, created: Some(id) }
            }
            Action::DragEnd { id, position } => {
                if !position.is_finite() {
                    return Dispatch::ignored();
                }
                Dispatch::changed(self.state.markers.update_position(&id, position))
            }
            Action::RemoveDot { id } => {
                let removable = self.state.markers.get(&id).is_some_and(Marker::removable);
                let changed = removable && self.state.markers.remove(&id);
                Dispatch { changed, consumed: true, created: None }
            }
        };
        if out.changed {
            self.revision = self.revision.wrapping_add(1);
        }
        out
    }

    /// Like `dispatch`, but reports why an action would be ignored.
    pub fn try_dispatch(&mut self, action: Action) -> Result<Dispatch, DotmapError> {
        self.check(&action)?;
        Ok(self.dispatch(action))
    }

    pub fn check(&self, action: &Action) -> Result<(), DotmapError> {
        let finite = |p: &LatLng| LatLng::checked(p.lat, p.lng).map(|_| ());
        match action {
            Action::LocationResolved(_) if self.is_ready() => Err(DotmapError::AlreadyResolved),
            Action::LocationResolved(_) => Ok(()),
            Action::SelectColor(c) => DotColor::by_name(c.name)
                .map(|_| ())
                .ok_or_else(|| DotmapError::UnknownColor(c.name.to_string())),
            _ if !self.is_ready() => Err(DotmapError::NotReady),
            Action::MapClick(p) => finite(p),
            Action::DragEnd { id, position } => {
                finite(position)?;
                self.known(id).map(|_| ())
            }
            Action::RemoveDot { id } => {
                if self.known(id)?.removable() {
                    Ok(())
                } else {
                    Err(DotmapError::NotRemovable(id.clone()))
                }
            }
        }
    }

    fn known(&self, id: &MarkerId) -> Result<&Marker, DotmapError> {
        self.state.markers.get(id).ok_or_else(|| DotmapError::UnknownMarker(id.clone()))
    }

    fn resolve(&mut self, outcome: &LocationOutcome) -> Dispatch {
        if !self.state.loading {
            return Dispatch::ignored();
        }
        let r = Resolution::from_outcome(outcome, &self.config);
        if r.center != self.state.center {
            self.center_revision = self.center_revision.wrapping_add(1);
        }
        self.state.center = r.center;
        self.state.location_error = r.error;
        self.state.markers.insert_user(r.marker);
        self.state.loading = false;
        Dispatch::changed(true)
    }

    pub fn view(&self) -> View {
        match self.scene() {
            Some(scene) => View::Ready(scene),
            None => View::Loading { text: self.config.messages.loading.clone() },
        }
    }

    pub fn scene(&self) -> Option<Scene> {
        self.is_ready().then(|| view::scene(&self.state, &self.config, self.center_revision))
    }

    pub fn sidebar(&self) -> Sidebar { view::sidebar(&self.state.palette) }

    pub fn to_json(&self) -> serde_json::Value { crate::json::to_json_impl(self) }
}
