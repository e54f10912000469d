//! Fleet seeding: one scripted vessel plus N ambient vessels

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::names::*;
use crate::components::*;
use crate::regions::RegionSet;
use crate::route::RouteModel;
use crate::schedule::ScheduleModel;

/// Id of the tracked vessel
pub const TRACKED_VESSEL_ID: &str = "special-001";

/// Upper bound on the magnitude of each drift component, per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftLimits {
    pub max_dlat: f64,
    pub max_dlng: f64,
}

impl DriftLimits {
    /// Largest single-axis displacement any ambient vessel can make in one tick
    pub fn max_step(&self) -> f64 {
        self.max_dlat.max(self.max_dlng)
    }
}

impl Default for DriftLimits {
    fn default() -> Self {
        Self {
            max_dlat: 0.0075,
            max_dlng: 0.01,
        }
    }
}

/// Seed the whole fleet. The tracked vessel comes first and its state
/// depends only on `now`; ambient vessels are random.
pub fn seed_fleet(
    regions: &RegionSet,
    route: &RouteModel,
    schedule: &ScheduleModel,
    ambient_count: u32,
    drift: DriftLimits,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Vec<Vessel> {
    let mut fleet = Vec::with_capacity(ambient_count as usize + 1);
    fleet.push(tracked_vessel(route, schedule, now));
    for i in 0..ambient_count {
        fleet.push(ambient_vessel(i, regions, drift, rng));
    }
    fleet
}

/// The scripted vessel at its scheduled position for `now`
pub fn tracked_vessel(route: &RouteModel, schedule: &ScheduleModel, now: DateTime<Utc>) -> Vessel {
    let progress = schedule.progress_now(now);
    Vessel {
        id: TRACKED_VESSEL_ID.to_string(),
        name: "MV Abidjan Star".to_string(),
        kind: VesselKind::Special,
        position: route.position_at(progress),
        heading: route.heading_at(progress),
        speed_knots: 14.2,
        status: VesselStatus::EnRoute,
        motion: Motion::Scripted { progress },
        itinerary: Itinerary {
            from: "Halifax, Canada".to_string(),
            to: "Abidjan, Côte d'Ivoire".to_string(),
            cargo: "Industrial equipment".to_string(),
            built_year: 2019,
            length_m: 225,
            tonnage_gt: 42_500,
            mmsi: "316001234".to_string(),
            flag: "CA".to_string(),
        },
    }
}

/// A randomly placed ambient vessel inside one of the regions
pub fn ambient_vessel(
    index: u32,
    regions: &RegionSet,
    drift: DriftLimits,
    rng: &mut impl Rng,
) -> Vessel {
    let position = regions.sample_point(rng);
    let velocity = Velocity::new(
        symmetric(drift.max_dlat, rng),
        symmetric(drift.max_dlng, rng),
    );
    let speed_knots = ((5.0 + rng.gen::<f64>() * 16.0) * 10.0).round() / 10.0;
    let status = *pick(VesselStatus::all(), rng);

    Vessel {
        id: format!("v{index}"),
        name: VESSEL_NAMES[index as usize % VESSEL_NAMES.len()].to_string(),
        kind: *pick(KIND_BAG, rng),
        position,
        heading: rng.gen_range(0.0..360.0),
        speed_knots,
        status,
        motion: Motion::Ambient { velocity },
        itinerary: Itinerary {
            from: pick(PORTS, rng).to_string(),
            to: pick(PORTS, rng).to_string(),
            cargo: pick(CARGOES, rng).to_string(),
            built_year: rng.gen_range(2005..2023),
            length_m: *pick(LENGTHS_M, rng),
            tonnage_gt: *pick(TONNAGES_GT, rng),
            mmsi: (200_000_000u64 + rng.gen_range(0..99_999_999u64)).to_string(),
            flag: pick(FLAGS, rng).to_string(),
        },
    }
}

/// Uniform in (-limit, limit); zero when the limit is zero
fn symmetric(limit: f64, rng: &mut impl Rng) -> f64 {
    if limit <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-limit..limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn route() -> RouteModel {
        RouteModel::from_pairs(&[[44.6, -63.6], [25.0, -25.0], [5.3, -4.0]]).unwrap()
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_seed_fleet_shape() {
        let schedule = ScheduleModel::anchored_at(now(), 0.38, Duration::days(15)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let fleet = seed_fleet(
            &RegionSet::north_atlantic(),
            &route(),
            &schedule,
            42,
            DriftLimits::default(),
            now(),
            &mut rng,
        );

        assert_eq!(fleet.len(), 43);
        assert_eq!(fleet.iter().filter(|v| v.is_scripted()).count(), 1);
        assert_eq!(fleet[0].id, TRACKED_VESSEL_ID);

        let mut ids: Vec<&str> = fleet.iter().map(|v| v.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 43);
    }

    #[test]
    fn test_tracked_vessel_is_deterministic() {
        let schedule = ScheduleModel::anchored_at(now(), 0.38, Duration::days(15)).unwrap();
        let a = tracked_vessel(&route(), &schedule, now());
        let b = tracked_vessel(&route(), &schedule, now());
        assert_eq!(a, b);
        let progress = a.progress().unwrap();
        assert!((progress - 0.38).abs() < 1e-6);
        assert_eq!(a.position, route().position_at(progress));
        assert_eq!(a.status, VesselStatus::EnRoute);
    }

    #[test]
    fn test_ambient_vessel_ranges() {
        let regions = RegionSet::north_atlantic();
        let drift = DriftLimits::default();
        let mut rng = StdRng::seed_from_u64(3);
        for i in 0..200 {
            let v = ambient_vessel(i, &regions, drift, &mut rng);
            assert!(regions.regions().iter().any(|r| r.contains(&v.position)));
            assert!((0.0..360.0).contains(&v.heading));
            assert!((5.0..=21.0).contains(&v.speed_knots));
            let vel = v.velocity().unwrap();
            assert!(vel.dlat.abs() <= drift.max_dlat);
            assert!(vel.dlng.abs() <= drift.max_dlng);
            assert_ne!(v.kind, VesselKind::Special);
            assert_eq!(v.itinerary.mmsi.len(), 9);
        }
    }
}
