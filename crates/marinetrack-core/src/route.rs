//! Route model - a fixed polyline of waypoints and the pure progress → pose mapping.

use serde::{Deserialize, Serialize};

use crate::components::{normalize_heading, GeoPoint};
use crate::error::ConfigError;

/// Keeps the segment lookup off the coincident final endpoint
const SEGMENT_EPSILON: f64 = 1e-4;

/// Ordered waypoints, fixed at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GeoPoint>", into = "Vec<GeoPoint>")]
pub struct RouteModel {
    waypoints: Vec<GeoPoint>,
}

impl RouteModel {
    /// Build a route. Fails on fewer than 2 waypoints or any invalid coordinate.
    pub fn new(waypoints: Vec<GeoPoint>) -> Result<Self, ConfigError> {
        if waypoints.len() < 2 {
            return Err(ConfigError::TooFewWaypoints {
                found: waypoints.len(),
            });
        }
        if let Some(index) = waypoints
            .iter()
            .position(|w| !w.is_finite() || !w.in_valid_range())
        {
            return Err(ConfigError::InvalidWaypoint { index });
        }
        Ok(Self { waypoints })
    }

    /// Convenience constructor from `[lat, lng]` pairs
    pub fn from_pairs(pairs: &[[f64; 2]]) -> Result<Self, ConfigError> {
        Self::new(pairs.iter().copied().map(GeoPoint::from).collect())
    }

    pub fn waypoints(&self) -> &[GeoPoint] {
        &self.waypoints
    }

    pub fn segment_count(&self) -> usize {
        self.waypoints.len() - 1
    }

    pub fn start(&self) -> GeoPoint {
        self.waypoints[0]
    }

    pub fn end(&self) -> GeoPoint {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Segment index and fraction within it for a progress value
    pub fn locate(&self, progress: f64) -> (usize, f64) {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let total = self.segment_count() as f64;
        let p = (progress * total).min(total - SEGMENT_EPSILON);
        let segment = p.floor() as usize;
        (segment, p - segment as f64)
    }

    /// Point on the polyline for `progress` in [0, 1)
    pub fn position_at(&self, progress: f64) -> GeoPoint {
        let (segment, frac) = self.locate(progress);
        self.waypoints[segment].lerp(&self.waypoints[segment + 1], frac)
    }

    /// Heading of the active segment, degrees clockwise from north in [0, 360)
    pub fn heading_at(&self, progress: f64) -> f64 {
        let (segment, _) = self.locate(progress);
        let a = self.waypoints[segment];
        let b = self.waypoints[segment + 1];
        let dlat = b.lat - a.lat;
        let dlng = b.lng - a.lng;
        normalize_heading(dlng.atan2(dlat).to_degrees())
    }
}

impl TryFrom<Vec<GeoPoint>> for RouteModel {
    type Error = ConfigError;

    fn try_from(waypoints: Vec<GeoPoint>) -> Result<Self, Self::Error> {
        Self::new(waypoints)
    }
}

impl From<RouteModel> for Vec<GeoPoint> {
    fn from(route: RouteModel) -> Self {
        route.waypoints
    }
}
