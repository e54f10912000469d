//! Vessel components and the flattened `Vessel` record published in snapshots.

use super::common::{GeoPoint, Velocity};
use serde::{Deserialize, Serialize};

/// Vessel category - determines marker color and label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VesselKind {
    Cargo,
    Tanker,
    Passenger,
    Fishing,
    Military,
    /// The tracked vessel's category
    Special,
}

impl VesselKind {
    pub fn all() -> &'static [VesselKind] {
        &[
            VesselKind::Cargo,
            VesselKind::Tanker,
            VesselKind::Passenger,
            VesselKind::Fishing,
            VesselKind::Military,
            VesselKind::Special,
        ]
    }

    /// Marker fill color (CSS hex)
    pub fn color(&self) -> &'static str {
        match self {
            VesselKind::Cargo => "#2ed573",
            VesselKind::Tanker => "#ff4757",
            VesselKind::Passenger => "#1e90ff",
            VesselKind::Fishing => "#ffa502",
            VesselKind::Military => "#a29bfe",
            VesselKind::Special => "#ffd700",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VesselKind::Cargo => "Cargo",
            VesselKind::Tanker => "Tanker",
            VesselKind::Passenger => "Passenger",
            VesselKind::Fishing => "Fishing",
            VesselKind::Military => "Military",
            VesselKind::Special => "Special Cargo",
        }
    }

    /// Stable lowercase key, used for sorting and filtering
    pub fn key(&self) -> &'static str {
        match self {
            VesselKind::Cargo => "cargo",
            VesselKind::Tanker => "tanker",
            VesselKind::Passenger => "passenger",
            VesselKind::Fishing => "fishing",
            VesselKind::Military => "military",
            VesselKind::Special => "special",
        }
    }
}

/// Navigational status shown in the views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VesselStatus {
    EnRoute,
    AtAnchor,
    Maneuvering,
}

impl VesselStatus {
    pub fn all() -> &'static [VesselStatus] {
        &[
            VesselStatus::EnRoute,
            VesselStatus::AtAnchor,
            VesselStatus::Maneuvering,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            VesselStatus::EnRoute => "En route",
            VesselStatus::AtAnchor => "At anchor",
            VesselStatus::Maneuvering => "Maneuvering",
        }
    }
}

/// Immutable display metadata, fixed at creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub from: String,
    pub to: String,
    pub cargo: String,
    pub built_year: u16,
    pub length_m: u32,
    pub tonnage_gt: u32,
    pub mmsi: String,
    /// ISO 3166 alpha-2 flag state
    pub flag: String,
}

impl Itinerary {
    /// Gross tonnage with thousands separators, e.g. `42,500 GT`
    pub fn tonnage_label(&self) -> String {
        let digits = self.tonnage_gt.to_string();
        let mut out = String::with_capacity(digits.len() + 4);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out.push_str(" GT");
        out
    }
}

// ── ECS components ─────────────────────────────────────────────────────

/// Stable identity of a vessel entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
}

/// Current position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position(pub GeoPoint);

/// Heading in degrees, [0, 360)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Heading(pub f64);

/// Reported speed over ground (display only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speed(pub f64);

/// Per-tick drift - present only on ambient vessels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drift(pub Velocity);

/// Route progress - present only on the scripted vessel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Voyage {
    /// Fraction of the route completed, [0, 1)
    pub progress: f64,
}

// ── Snapshot record ────────────────────────────────────────────────────

/// How a vessel moves from tick to tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Motion {
    /// Follows the route as a function of progress
    Scripted { progress: f64 },
    /// Drifts by a fixed velocity, reflected at the operating area edges
    Ambient { velocity: Velocity },
}

/// One vessel as seen by readers of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    pub id: String,
    pub name: String,
    pub kind: VesselKind,
    pub position: GeoPoint,
    pub heading: f64,
    pub speed_knots: f64,
    pub status: VesselStatus,
    pub motion: Motion,
    pub itinerary: Itinerary,
}

impl Vessel {
    pub fn is_scripted(&self) -> bool {
        matches!(self.motion, Motion::Scripted { .. })
    }

    /// Route progress, only for the scripted vessel
    pub fn progress(&self) -> Option<f64> {
        match self.motion {
            Motion::Scripted { progress } => Some(progress),
            Motion::Ambient { .. } => None,
        }
    }

    /// Drift velocity, only for ambient vessels
    pub fn velocity(&self) -> Option<Velocity> {
        match self.motion {
            Motion::Scripted { .. } => None,
            Motion::Ambient { velocity } => Some(velocity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn itinerary(tonnage_gt: u32) -> Itinerary {
        Itinerary {
            from: "Halifax".into(),
            to: "Abidjan".into(),
            cargo: "Containers".into(),
            built_year: 2019,
            length_m: 225,
            tonnage_gt,
            mmsi: "316001234".into(),
            flag: "CA".into(),
        }
    }

    #[test]
    fn test_tonnage_label() {
        assert_eq!(itinerary(42_500).tonnage_label(), "42,500 GT");
        assert_eq!(itinerary(500).tonnage_label(), "500 GT");
        assert_eq!(itinerary(1_234_567).tonnage_label(), "1,234,567 GT");
    }

    #[test]
    fn test_motion_accessors() {
        let mut vessel = Vessel {
            id: "v0".into(),
            name: "Sea Falcon".into(),
            kind: VesselKind::Cargo,
            position: GeoPoint::new(40.0, -20.0),
            heading: 90.0,
            speed_knots: 12.5,
            status: VesselStatus::AtAnchor,
            motion: Motion::Ambient {
                velocity: Velocity::new(0.001, -0.002),
            },
            itinerary: itinerary(18_000),
        };
        assert!(!vessel.is_scripted());
        assert_eq!(vessel.progress(), None);
        assert_eq!(vessel.velocity(), Some(Velocity::new(0.001, -0.002)));

        vessel.motion = Motion::Scripted { progress: 0.5 };
        assert!(vessel.is_scripted());
        assert_eq!(vessel.progress(), Some(0.5));
    }

    #[test]
    fn test_kind_serde_names() {
        let json = serde_json::to_string(&VesselKind::Special).unwrap();
        assert_eq!(json, "\"special\"");
        let status: VesselStatus = serde_json::from_str("\"at-anchor\"").unwrap();
        assert_eq!(status, VesselStatus::AtAnchor);
    }
}
