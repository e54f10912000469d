//! Seeding regions and the soft operating-area boundary for ambient vessels.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{GeoBounds, GeoPoint, Velocity};
use crate::error::ConfigError;

/// Bounding boxes that ambient vessels are seeded into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GeoBounds>", into = "Vec<GeoBounds>")]
pub struct RegionSet {
    regions: Vec<GeoBounds>,
}

impl RegionSet {
    pub fn new(regions: Vec<GeoBounds>) -> Result<Self, ConfigError> {
        if regions.is_empty() {
            return Err(ConfigError::EmptyRegionSet);
        }
        if let Some(index) = regions.iter().position(|r| !r.is_valid()) {
            return Err(ConfigError::InvalidRegion { index });
        }
        Ok(Self { regions })
    }

    /// North Atlantic / West African shipping lanes
    pub fn north_atlantic() -> Self {
        Self {
            regions: vec![
                GeoBounds::new(45.0, 55.0, -15.0, 5.0),
                GeoBounds::new(35.0, 50.0, -40.0, -10.0),
                GeoBounds::new(10.0, 35.0, -30.0, -5.0),
                GeoBounds::new(-5.0, 15.0, -20.0, 5.0),
                GeoBounds::new(25.0, 55.0, -10.0, 30.0),
                GeoBounds::new(40.0, 60.0, -60.0, -20.0),
            ],
        }
    }

    pub fn regions(&self) -> &[GeoBounds] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Uniformly pick a region
    pub fn pick(&self, rng: &mut impl Rng) -> &GeoBounds {
        &self.regions[rng.gen_range(0..self.regions.len())]
    }

    /// Uniform point inside a random region
    pub fn sample_point(&self, rng: &mut impl Rng) -> GeoPoint {
        let region = self.pick(rng);
        GeoPoint::new(
            region.min_lat + rng.gen::<f64>() * region.lat_span(),
            region.min_lng + rng.gen::<f64>() * region.lng_span(),
        )
    }
}

impl Default for RegionSet {
    fn default() -> Self {
        Self::north_atlantic()
    }
}

impl TryFrom<Vec<GeoBounds>> for RegionSet {
    type Error = ConfigError;

    fn try_from(regions: Vec<GeoBounds>) -> Result<Self, Self::Error> {
        Self::new(regions)
    }
}

impl From<RegionSet> for Vec<GeoBounds> {
    fn from(set: RegionSet) -> Self {
        set.regions
    }
}

/// Soft containment box. Crossing an edge reverses the matching velocity
/// component; the position itself is never snapped back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingArea {
    pub bounds: GeoBounds,
}

impl OperatingArea {
    pub fn new(bounds: GeoBounds) -> Result<Self, ConfigError> {
        if !bounds.is_valid() {
            return Err(ConfigError::InvalidOperatingArea);
        }
        Ok(Self { bounds })
    }

    /// Velocity after reflecting off any edge `position` has crossed.
    /// The reflected component always points back inside, so a vessel that
    /// is already outside cannot oscillate on the edge.
    pub fn reflect(&self, position: GeoPoint, velocity: Velocity) -> Velocity {
        let mut v = velocity;
        if position.lat > self.bounds.max_lat {
            v.dlat = -v.dlat.abs();
        } else if position.lat < self.bounds.min_lat {
            v.dlat = v.dlat.abs();
        }
        if position.lng > self.bounds.max_lng {
            v.dlng = -v.dlng.abs();
        } else if position.lng < self.bounds.min_lng {
            v.dlng = v.dlng.abs();
        }
        v
    }
}

impl Default for OperatingArea {
    fn default() -> Self {
        Self {
            bounds: GeoBounds::new(-10.0, 65.0, -80.0, 40.0),
        }
    }
}
