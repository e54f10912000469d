//! Geographic primitives shared by routes, regions and vessels.

use serde::{Deserialize, Serialize};

/// A point in flat lat/lng space (degrees)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const ORIGIN: Self = Self { lat: 0.0, lng: 0.0 };

    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Linear interpolation, each axis independently
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            lat: self.lat + (other.lat - self.lat) * t,
            lng: self.lng + (other.lng - self.lng) * t,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// True when lat is within [-90, 90] and lng within [-180, 180]
    pub fn in_valid_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Clamp into the valid lat/lng range
    pub fn clamped(&self) -> Self {
        Self {
            lat: self.lat.clamp(-90.0, 90.0),
            lng: self.lng.clamp(-180.0, 180.0),
        }
    }

    /// Human readable coordinates, e.g. `44.6000°N 63.6000°W`
    pub fn to_hemisphere_string(&self) -> String {
        format!(
            "{:.4}°{} {:.4}°{}",
            self.lat.abs(),
            if self.lat >= 0.0 { "N" } else { "S" },
            self.lng.abs(),
            if self.lng >= 0.0 { "E" } else { "W" },
        )
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl std::ops::Add<Velocity> for GeoPoint {
    type Output = Self;
    fn add(self, v: Velocity) -> Self {
        Self {
            lat: self.lat + v.dlat,
            lng: self.lng + v.dlng,
        }
    }
}

/// Signed per-tick displacement of an ambient vessel
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Velocity {
    pub dlat: f64,
    pub dlng: f64,
}

impl Velocity {
    pub fn new(dlat: f64, dlng: f64) -> Self {
        Self { dlat, dlng }
    }

    /// Largest single-axis displacement
    pub fn max_component(&self) -> f64 {
        self.dlat.abs().max(self.dlng.abs())
    }
}

/// Axis-aligned lat/lng box
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    pub const fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lng >= self.min_lng
            && point.lng <= self.max_lng
    }

    /// Finite, non-inverted, and inside the valid lat/lng range
    pub fn is_valid(&self) -> bool {
        let corners = [
            GeoPoint::new(self.min_lat, self.min_lng),
            GeoPoint::new(self.max_lat, self.max_lng),
        ];
        corners.iter().all(|c| c.is_finite() && c.in_valid_range())
            && self.min_lat <= self.max_lat
            && self.min_lng <= self.max_lng
    }
}

/// Normalize any angle in degrees into [0, 360)
pub fn normalize_heading(degrees: f64) -> f64 {
    let h = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(10.0, -20.0);
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid, GeoPoint::new(5.0, -10.0));
    }

    #[test]
    fn test_add_velocity() {
        let p = GeoPoint::new(1.0, 2.0) + Velocity::new(0.5, -0.25);
        assert_eq!(p, GeoPoint::new(1.5, 1.75));
    }

    #[test]
    fn test_clamped() {
        let p = GeoPoint::new(95.0, -200.0).clamped();
        assert_eq!(p, GeoPoint::new(90.0, -180.0));
        assert!(p.in_valid_range());
    }

    #[test]
    fn test_bounds_contains() {
        let b = GeoBounds::new(-10.0, 65.0, -80.0, 40.0);
        assert!(b.contains(&GeoPoint::new(0.0, 0.0)));
        assert!(!b.contains(&GeoPoint::new(66.0, 0.0)));
        assert!(b.is_valid());
        assert!(!GeoBounds::new(5.0, 1.0, 0.0, 1.0).is_valid());
    }

    #[test]
    fn test_normalize_heading() {
        assert_eq!(normalize_heading(370.0), 10.0);
        assert_eq!(normalize_heading(-90.0), 270.0);
        assert_eq!(normalize_heading(360.0), 0.0);
        let tiny = normalize_heading(-1e-17);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_format_coordinates() {
        let p = GeoPoint::new(44.6, -63.6);
        assert_eq!(p.to_hemisphere_string(), "44.6000°N 63.6000°W");
        let q = GeoPoint::new(-5.25, 4.0);
        assert_eq!(q.to_hemisphere_string(), "5.2500°S 4.0000°E");
    }
}
