use crate::geo::LatLng;
use crate::palette::DotColor;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(String);

impl MarkerId {
    /// Id of the marker placed at a successfully resolved location.
    pub const USER: &'static str = "user";
    /// Id of the marker placed at the fallback center.
    pub const DEFAULT: &'static str = "default";

    pub fn as_str(&self) -> &str { &self.0 }
}

impl From<&str> for MarkerId {
    fn from(s: &str) -> Self { MarkerId(s.to_string()) }
}

impl From<String> for MarkerId {
    fn from(s: String) -> Self { MarkerId(s) }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub id: MarkerId,
    pub position: LatLng,
    pub draggable: bool,
    pub is_user: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<DotColor>,
}

impl Marker {
    pub fn user(id: &str, position: LatLng) -> Self {
        Marker { id: MarkerId::from(id), position, draggable: false, is_user: true, color: None }
    }

    pub fn dot(id: MarkerId, position: LatLng, color: DotColor) -> Self {
        Marker { id, position, draggable: true, is_user: false, color: Some(color) }
    }

    /// Only draggable dots offer a remove control.
    pub fn removable(&self) -> bool { self.draggable && !self.is_user }
}

/// Millisecond time source for marker ids.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Counter clock: every read advances by one.
#[derive(Debug, Default)]
pub struct SequenceClock {
    next: std::cell::Cell<u64>,
}

impl SequenceClock {
    pub fn starting_at(start: u64) -> Self { SequenceClock { next: std::cell::Cell::new(start) } }
}

impl Clock for SequenceClock {
    fn now_ms(&self) -> u64 {
        let v = self.next.get();
        self.next.set(v.wrapping_add(1));
        v
    }
}

/// Time-based ids, bumped past the last issued stamp so they never repeat.
#[derive(Debug, Default)]
pub(crate) struct IdGen {
    last: Option<u64>,
}

impl IdGen {
    pub(crate) fn next(&mut self, now_ms: u64) -> MarkerId {
        let stamp = match self.last {
            Some(last) if now_ms <= last => last + 1,
            _ => now_ms,
        };
        self.last = Some(stamp);
        MarkerId(stamp.to_string())
    }
}

/// Insertion-ordered markers with unique ids.
pub struct MarkerStore {
    markers: Vec<Marker>,
    ids: IdGen,
    clock: Box<dyn Clock>,
}

impl Default for MarkerStore {
    fn default() -> Self { Self::with_clock(Box::new(SequenceClock::starting_at(1))) }
}

impl fmt::Debug for MarkerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerStore").field("markers", &self.markers).finish()
    }
}

impl MarkerStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        MarkerStore { markers: Vec::new(), ids: IdGen::default(), clock }
    }

    pub fn append(&mut self, position: LatLng, color: DotColor) -> MarkerId {
        let mut id = self.ids.next(self.clock.now_ms());
        // Sentinel or externally inserted ids can collide with a stamp.
        while self.get(&id).is_some() {
            id = self.ids.next(0);
        }
        self.markers.push(Marker::dot(id.clone(), position, color));
        id
    }

    /// Places the user marker, replacing any previous one. Returns false,
    /// leaving the store untouched, when `marker` is not a user marker.
    pub fn insert_user(&mut self, marker: Marker) -> bool {
        if !marker.is_user {
            return false;
        }
        self.markers.retain(|m| !m.is_user && m.id != marker.id);
        self.markers.insert(0, marker);
        true
    }

    pub fn update_position(&mut self, id: &MarkerId, position: LatLng) -> bool {
        match self.markers.iter_mut().find(|m| &m.id == id) {
            Some(m) => { m.position = position; true }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &MarkerId) -> bool {
        let before = self.markers.len();
        self.markers.retain(|m| &m.id != id);
        self.markers.len() != before
    }

    pub fn get(&self, id: &MarkerId) -> Option<&Marker> { self.markers.iter().find(|m| &m.id == id) }

    pub fn user(&self) -> Option<&Marker> { self.markers.iter().find(|m| m.is_user) }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> { self.markers.iter() }

    pub fn as_slice(&self) -> &[Marker] { &self.markers }

    pub fn len(&self) -> usize { self.markers.len() }

    pub fn is_empty(&self) -> bool { self.markers.is_empty() }
}
