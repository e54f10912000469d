//! Marker reconciliation between snapshots and the map surface

use std::collections::HashMap;

use super::{CameraMove, IconSpec, MapWidget};
use crate::components::GeoPoint;
use crate::error::SimError;
use crate::store::Snapshot;

/// Last state pushed to the map for one marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerState {
    pub position: GeoPoint,
    pub icon: IconSpec,
}

/// Outcome of one reconcile pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl ReconcileReport {
    /// True when the pass issued no calls against the map
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.updated == 0
    }
}

/// Keeps one marker per vessel id on the map. Markers are created once and
/// then only moved/restyled; nothing is ever removed.
#[derive(Debug, Default)]
pub struct MapSyncAdapter {
    markers: HashMap<String, MarkerState>,
}

impl MapSyncAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn marker(&self, id: &str) -> Option<&MarkerState> {
        self.markers.get(id)
    }

    /// Create-or-update a marker for every vessel in `snapshot`.
    /// Markers whose position and icon already match are left alone, so a
    /// second pass over the same snapshot is a no-op.
    pub fn reconcile<M: MapWidget + ?Sized>(&mut self, snapshot: &Snapshot, map: &mut M) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        for vessel in snapshot.iter() {
            let desired = MarkerState {
                position: vessel.position,
                icon: IconSpec::for_vessel(vessel),
            };
            match self.markers.get_mut(&vessel.id) {
                Some(current) if *current == desired => report.unchanged += 1,
                Some(current) => {
                    map.add_or_update_marker(&vessel.id, desired.position, &desired.icon);
                    *current = desired;
                    report.updated += 1;
                }
                None => {
                    map.add_or_update_marker(&vessel.id, desired.position, &desired.icon);
                    self.markers.insert(vessel.id.clone(), desired);
                    report.created += 1;
                }
            }
        }

        report
    }

    /// Pan/zoom to a vessel's current position. Never touches vessel state.
    pub fn focus<M: MapWidget + ?Sized>(
        &self,
        snapshot: &Snapshot,
        id: &str,
        map: &mut M,
        camera: CameraMove,
    ) -> Result<GeoPoint, SimError> {
        let vessel = snapshot
            .get(id)
            .ok_or_else(|| SimError::UnknownVessel(id.to_string()))?;
        map.fly_to(vessel.position, camera.zoom, camera.duration_secs);
        Ok(vessel.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::*;
    use crate::map::HeadlessMap;

    fn vessel(id: &str, lat: f64, heading: f64, scripted: bool) -> Vessel {
        Vessel {
            id: id.into(),
            name: id.into(),
            kind: if scripted {
                VesselKind::Special
            } else {
                VesselKind::Fishing
            },
            position: GeoPoint::new(lat, -20.0),
            heading,
            speed_knots: 9.0,
            status: VesselStatus::EnRoute,
            motion: if scripted {
                Motion::Scripted { progress: 0.3 }
            } else {
                Motion::Ambient {
                    velocity: Velocity::new(0.001, 0.001),
                }
            },
            itinerary: Itinerary {
                from: "Dakar".into(),
                to: "Lagos".into(),
                cargo: "Ore".into(),
                built_year: 2015,
                length_m: 180,
                tonnage_gt: 12_000,
                mmsi: "200000002".into(),
                flag: "PA".into(),
            },
        }
    }

    fn snapshot(tick: u64, vessels: Vec<Vessel>) -> Snapshot {
        Snapshot { tick, vessels }
    }

    #[test]
    fn test_reconcile_creates_then_idles() {
        let mut adapter = MapSyncAdapter::new();
        let mut map = HeadlessMap::new();
        let snap = snapshot(0, vec![vessel("a", 10.0, 0.0, true), vessel("b", 20.0, 90.0, false)]);

        let first = adapter.reconcile(&snap, &mut map);
        assert_eq!(first.created, 2);
        assert_eq!(map.marker_count(), 2);
        let writes = map.marker_writes();

        let second = adapter.reconcile(&snap, &mut map);
        assert!(second.is_noop());
        assert_eq!(second.unchanged, 2);
        assert_eq!(map.marker_writes(), writes);
        assert_eq!(map.marker_count(), 2);
    }

    #[test]
    fn test_reconcile_updates_moved_marker() {
        let mut adapter = MapSyncAdapter::new();
        let mut map = HeadlessMap::new();
        adapter.reconcile(&snapshot(0, vec![vessel("a", 10.0, 0.0, false)]), &mut map);

        let report = adapter.reconcile(&snapshot(1, vec![vessel("a", 11.0, 5.0, false)]), &mut map);
        assert_eq!(report.updated, 1);
        assert_eq!(report.created, 0);
        assert_eq!(map.marker_count(), 1);

        let (pos, icon) = map.marker("a").unwrap();
        assert_eq!(pos.lat, 11.0);
        assert_eq!(icon.rotation_deg, 5.0);
        assert_eq!(adapter.marker("a").unwrap().position.lat, 11.0);
    }

    #[test]
    fn test_focus_flies_to_vessel() {
        let adapter = MapSyncAdapter::new();
        let mut map = HeadlessMap::new();
        let snap = snapshot(0, vec![vessel("a", 10.0, 0.0, false)]);
        let camera = CameraMove {
            zoom: 6,
            duration_secs: 1.2,
        };

        let at = adapter.focus(&snap, "a", &mut map, camera).unwrap();
        assert_eq!(at.lat, 10.0);
        let flight = map.last_flight().unwrap();
        assert_eq!(flight.zoom, 6);

        assert!(matches!(
            adapter.focus(&snap, "missing", &mut map, camera),
            Err(SimError::UnknownVessel(_))
        ));
    }
}
