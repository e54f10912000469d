//! In-memory map surface for the harness and tests

use std::collections::BTreeMap;

use super::{IconSpec, LineStyle, MapFactory, MapWidget};
use crate::components::GeoPoint;
use crate::error::MapError;

/// A recorded camera flight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flight {
    pub at: GeoPoint,
    pub zoom: u8,
    pub duration_secs: f64,
}

/// Map surface that just records what it was asked to draw
#[derive(Default)]
pub struct HeadlessMap {
    container: String,
    center: GeoPoint,
    zoom: u8,
    markers: BTreeMap<String, (GeoPoint, IconSpec)>,
    marker_writes: usize,
    polylines: BTreeMap<String, (Vec<GeoPoint>, LineStyle)>,
    tile_layers: Vec<String>,
    flights: Vec<Flight>,
    mouse_move: Option<Box<dyn FnMut(GeoPoint)>>,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Current camera center (last flight target, or the initial center)
    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn marker(&self, id: &str) -> Option<&(GeoPoint, IconSpec)> {
        self.markers.get(id)
    }

    pub fn marker_ids(&self) -> impl Iterator<Item = &str> {
        self.markers.keys().map(String::as_str)
    }

    /// Total `add_or_update_marker` calls received
    pub fn marker_writes(&self) -> usize {
        self.marker_writes
    }

    pub fn polyline(&self, id: &str) -> Option<&(Vec<GeoPoint>, LineStyle)> {
        self.polylines.get(id)
    }

    pub fn polyline_count(&self) -> usize {
        self.polylines.len()
    }

    pub fn tile_layers(&self) -> &[String] {
        &self.tile_layers
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn last_flight(&self) -> Option<&Flight> {
        self.flights.last()
    }

    /// Feed a cursor position to the registered mouse-move listener
    pub fn move_cursor(&mut self, at: GeoPoint) {
        if let Some(callback) = self.mouse_move.as_mut() {
            callback(at);
        }
    }
}

impl MapWidget for HeadlessMap {
    fn add_tile_layer(&mut self, url_template: &str) {
        self.tile_layers.push(url_template.to_string());
    }

    fn add_or_update_marker(&mut self, id: &str, at: GeoPoint, icon: &IconSpec) {
        self.marker_writes += 1;
        self.markers.insert(id.to_string(), (at, icon.clone()));
    }

    fn add_polyline(&mut self, id: &str, points: &[GeoPoint], style: &LineStyle) {
        self.polylines
            .insert(id.to_string(), (points.to_vec(), style.clone()));
    }

    fn fly_to(&mut self, at: GeoPoint, zoom: u8, duration_secs: f64) {
        self.center = at;
        self.zoom = zoom;
        self.flights.push(Flight {
            at,
            zoom,
            duration_secs,
        });
    }

    fn on_mouse_move(&mut self, callback: Box<dyn FnMut(GeoPoint)>) {
        self.mouse_move = Some(callback);
    }
}

/// Builds `HeadlessMap`s. Can be told to fail, to exercise the not-ready path.
#[derive(Debug, Clone, Default)]
pub struct HeadlessMapFactory {
    pub fail_with: Option<String>,
}

impl HeadlessMapFactory {
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
        }
    }
}

impl MapFactory for HeadlessMapFactory {
    type Map = HeadlessMap;

    fn create_map(&mut self, container: &str, center: GeoPoint, zoom: u8) -> Result<HeadlessMap, MapError> {
        if let Some(reason) = &self.fail_with {
            return Err(MapError::Unavailable(reason.clone()));
        }
        Ok(HeadlessMap {
            container: container.to_string(),
            center,
            zoom,
            ..HeadlessMap::default()
        })
    }
}
