//! Read-side projections over a snapshot for list, grid and search views

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::components::{Vessel, VesselKind, VesselStatus};
use crate::store::Snapshot;

/// Result count of the map search box
pub const SEARCH_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    /// Fastest first
    Speed,
    Kind,
}

/// Filter and sort settings of a fleet list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetQuery {
    /// Case-insensitive match on name, MMSI, flag and ports
    pub text: String,
    pub kind: Option<VesselKind>,
    pub status: Option<VesselStatus>,
    pub sort: SortKey,
}

impl FleetQuery {
    pub fn matches(&self, vessel: &Vessel) -> bool {
        if self.kind.is_some_and(|k| k != vessel.kind) {
            return false;
        }
        if self.status.is_some_and(|s| s != vessel.status) {
            return false;
        }
        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let it = &vessel.itinerary;
        [
            vessel.name.as_str(),
            it.mmsi.as_str(),
            it.flag.as_str(),
            it.from.as_str(),
            it.to.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn apply<'a>(&self, snapshot: &'a Snapshot) -> Vec<&'a Vessel> {
        let mut out: Vec<&Vessel> = snapshot.iter().filter(|v| self.matches(v)).collect();
        match self.sort {
            SortKey::Name => out.sort_by(|a, b| a.name.cmp(&b.name)),
            SortKey::Speed => out.sort_by(|a, b| b.speed_knots.total_cmp(&a.speed_knots)),
            SortKey::Kind => out.sort_by_key(|v| v.kind),
        }
        out
    }
}

/// Name-prefix-agnostic search used by the map search box.
/// An empty query returns nothing.
pub fn search_by_name<'a>(snapshot: &'a Snapshot, text: &str, limit: usize) -> Vec<&'a Vessel> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    snapshot
        .iter()
        .filter(|v| v.name.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

/// Fleet-wide counters for the dashboard header
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetStats {
    pub total: usize,
    pub by_kind: BTreeMap<VesselKind, usize>,
    pub en_route: usize,
    pub at_anchor: usize,
    pub maneuvering: usize,
    pub average_speed_knots: f64,
}

impl FleetStats {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut stats = Self {
            total: snapshot.len(),
            ..Default::default()
        };
        let mut speed_sum = 0.0;
        for vessel in snapshot.iter() {
            *stats.by_kind.entry(vessel.kind).or_insert(0) += 1;
            match vessel.status {
                VesselStatus::EnRoute => stats.en_route += 1,
                VesselStatus::AtAnchor => stats.at_anchor += 1,
                VesselStatus::Maneuvering => stats.maneuvering += 1,
            }
            speed_sum += vessel.speed_knots;
        }
        if stats.total > 0 {
            stats.average_speed_knots = speed_sum / stats.total as f64;
        }
        stats
    }

    pub fn count(&self, kind: VesselKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// Whole days left at `progress` on a voyage of `total_days`
pub fn days_remaining(progress: f64, total_days: f64) -> u32 {
    ((1.0 - progress) * total_days).round().max(0.0) as u32
}

/// Calendar ETA: `today` plus the whole days remaining
pub fn eta_date(progress: f64, today: DateTime<Utc>, total_days: f64) -> DateTime<Utc> {
    today + Duration::days(i64::from(days_remaining(progress, total_days)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::*;
    use chrono::TimeZone;

    fn vessel(id: &str, name: &str, kind: VesselKind, status: VesselStatus, speed: f64) -> Vessel {
        Vessel {
            id: id.into(),
            name: name.into(),
            kind,
            position: GeoPoint::new(40.0, -30.0),
            heading: 90.0,
            speed_knots: speed,
            status,
            motion: Motion::Ambient {
                velocity: Velocity::default(),
            },
            itinerary: Itinerary {
                from: "Rotterdam".into(),
                to: "Santos".into(),
                cargo: "Grain".into(),
                built_year: 2012,
                length_m: 200,
                tonnage_gt: 30_000,
                mmsi: format!("2000000{id}"),
                flag: "NL".into(),
            },
        }
    }

    fn fleet() -> Snapshot {
        Snapshot {
            tick: 3,
            vessels: vec![
                vessel("01", "Nordic Spirit", VesselKind::Tanker, VesselStatus::EnRoute, 12.0),
                vessel("02", "Atlantic Dawn", VesselKind::Cargo, VesselStatus::AtAnchor, 18.5),
                vessel("03", "Sea Falcon", VesselKind::Fishing, VesselStatus::Maneuvering, 7.0),
                vessel("04", "Atlantic Pearl", VesselKind::Cargo, VesselStatus::EnRoute, 15.0),
            ],
        }
    }

    #[test]
    fn test_default_query_sorts_by_name() {
        let snap = fleet();
        let names: Vec<_> = FleetQuery::default()
            .apply(&snap)
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Atlantic Dawn", "Atlantic Pearl", "Nordic Spirit", "Sea Falcon"]
        );
    }

    #[test]
    fn test_filter_and_speed_sort() {
        let snap = fleet();
        let query = FleetQuery {
            text: "atlantic".into(),
            kind: Some(VesselKind::Cargo),
            sort: SortKey::Speed,
            ..Default::default()
        };
        let ids: Vec<_> = query.apply(&snap).iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["02", "04"]);

        let anchored = FleetQuery {
            status: Some(VesselStatus::AtAnchor),
            ..Default::default()
        };
        assert_eq!(anchored.apply(&snap).len(), 1);
    }

    #[test]
    fn test_text_matches_itinerary_fields() {
        let snap = fleet();
        let query = FleetQuery {
            text: "SANTOS".into(),
            ..Default::default()
        };
        assert_eq!(query.apply(&snap).len(), 4);

        let by_mmsi = FleetQuery {
            text: "200000003".into(),
            ..Default::default()
        };
        assert_eq!(by_mmsi.apply(&snap)[0].name, "Sea Falcon");
    }

    #[test]
    fn test_search_by_name_limit() {
        let snap = fleet();
        assert_eq!(search_by_name(&snap, "a", 2).len(), 2);
        assert_eq!(search_by_name(&snap, "falcon", SEARCH_LIMIT)[0].id, "03");
        assert!(search_by_name(&snap, "   ", SEARCH_LIMIT).is_empty());
    }

    #[test]
    fn test_fleet_stats() {
        let stats = FleetStats::from_snapshot(&fleet());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.count(VesselKind::Cargo), 2);
        assert_eq!(stats.count(VesselKind::Military), 0);
        assert_eq!(stats.en_route, 2);
        assert_eq!(stats.at_anchor, 1);
        assert_eq!(stats.maneuvering, 1);
        assert!((stats.average_speed_knots - 13.125).abs() < 1e-9);
    }

    #[test]
    fn test_eta_date() {
        let today = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(days_remaining(0.5, 10.0), 5);
        assert_eq!(days_remaining(1.2, 10.0), 0);
        assert_eq!(
            eta_date(0.5, today, 10.0),
            Utc.with_ymd_and_hms(2024, 3, 6, 12, 0, 0).unwrap()
        );
    }
}
