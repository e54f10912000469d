//! Simulation configuration - defaults, JSON loading and validation.
//!
//! Every model the simulation needs is built from here exactly once, so a bad
//! route, schedule or region fails before the first tick instead of producing
//! NaN positions later.

use std::io::Read;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::components::{GeoBounds, GeoPoint};
use crate::error::{ConfigError, SimError};
use crate::generation::DriftLimits;
use crate::map::CameraMove;
use crate::regions::{OperatingArea, RegionSet};
use crate::route::RouteModel;
use crate::schedule::{anchored_departure, ScheduleModel};

/// Halifax to Abidjan
pub const DEFAULT_ROUTE: &[[f64; 2]] = &[
    [44.6, -63.6],
    [43.0, -55.0],
    [40.0, -45.0],
    [35.0, -35.0],
    [25.0, -25.0],
    [15.0, -20.0],
    [10.0, -15.0],
    [7.0, -10.0],
    [5.3, -4.0],
];

/// Length of the default voyage
pub const DEFAULT_TRIP_DAYS: i64 = 15;

/// Where along the default voyage the tracked vessel is at startup
pub const DEFAULT_START_PROGRESS: f64 = 0.38;

/// Departure and arrival of the scripted voyage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoyageConfig {
    pub departure_at: DateTime<Utc>,
    pub arrival_at: DateTime<Utc>,
}

impl VoyageConfig {
    /// A voyage of `days` that is `progress` complete at `now`
    pub fn anchored_at(now: DateTime<Utc>, progress: f64, days: i64) -> Self {
        let total = Duration::days(days);
        let departure_at = anchored_departure(now, progress, total);
        Self {
            departure_at,
            arrival_at: departure_at + total,
        }
    }
}

impl Default for VoyageConfig {
    fn default() -> Self {
        Self::anchored_at(Utc::now(), DEFAULT_START_PROGRESS, DEFAULT_TRIP_DAYS)
    }
}

/// Map surface settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Host element the map is created in
    pub container: String,
    pub initial_center: GeoPoint,
    pub initial_zoom: u8,
    pub tile_url: String,
    /// Camera flight once the map is ready
    pub intro_center: GeoPoint,
    pub intro: CameraMove,
    /// Camera move when a vessel is focused from a list or "center" button
    pub focus: CameraMove,
    /// Camera move when a vessel is picked from the search box
    pub search_focus: CameraMove,
    pub departure_port_color: String,
    pub arrival_port_color: String,
    /// Port marker tooltips
    pub departure_port_label: String,
    pub arrival_port_label: String,
    /// Color of the dashed route line
    pub route_color: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            container: "map".to_string(),
            initial_center: GeoPoint::new(25.0, -25.0),
            initial_zoom: 4,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            intro_center: GeoPoint::new(25.0, -30.0),
            intro: CameraMove {
                zoom: 3,
                duration_secs: 2.0,
            },
            focus: CameraMove {
                zoom: 6,
                duration_secs: 1.2,
            },
            search_focus: CameraMove {
                zoom: 7,
                duration_secs: 1.5,
            },
            departure_port_color: "#00d4ff".to_string(),
            arrival_port_color: "#ffd700".to_string(),
            departure_port_label: "🇨🇦 Halifax (Départ)".to_string(),
            arrival_port_label: "🇨🇮 Abidjan (Destination)".to_string(),
            route_color: "#ffd700".to_string(),
        }
    }
}

/// Full simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub route: Vec<GeoPoint>,
    pub voyage: VoyageConfig,
    pub regions: Vec<GeoBounds>,
    pub ambient_count: u32,
    pub operating_area: GeoBounds,
    pub tick_period_ms: u64,
    /// Half-width of the per-tick ambient heading noise, degrees
    pub heading_jitter_deg: f64,
    pub drift: DriftLimits,
    /// Seed for ambient randomness; entropy when absent
    pub seed: Option<u64>,
    pub map: MapSettings,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            route: DEFAULT_ROUTE.iter().copied().map(GeoPoint::from).collect(),
            voyage: VoyageConfig::default(),
            regions: RegionSet::north_atlantic().regions().to_vec(),
            ambient_count: 42,
            operating_area: OperatingArea::default().bounds,
            tick_period_ms: 1000,
            heading_jitter_deg: 1.0,
            drift: DriftLimits::default(),
            seed: None,
            map: MapSettings::default(),
        }
    }
}

/// Validated models built from a configuration
#[derive(Debug, Clone)]
pub struct SimulationModels {
    pub route: RouteModel,
    pub schedule: ScheduleModel,
    pub regions: RegionSet,
    pub operating_area: OperatingArea,
    pub tick_period: StdDuration,
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SimError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn tick_period(&self) -> StdDuration {
        StdDuration::from_millis(self.tick_period_ms)
    }

    /// Build every model, failing on the first invalid piece
    pub fn build(&self) -> Result<SimulationModels, ConfigError> {
        if self.tick_period_ms == 0 {
            return Err(ConfigError::InvalidTickPeriod);
        }
        for (field, value) in [
            ("heading_jitter_deg", self.heading_jitter_deg),
            ("drift.max_dlat", self.drift.max_dlat),
            ("drift.max_dlng", self.drift.max_dlng),
        ] {
            if !is_sampling_half_width(value) {
                return Err(ConfigError::InvalidMotionLimits { field });
            }
        }
        Ok(SimulationModels {
            route: RouteModel::new(self.route.clone())?,
            schedule: ScheduleModel::new(self.voyage.departure_at, self.voyage.arrival_at)?,
            regions: RegionSet::new(self.regions.clone())?,
            operating_area: OperatingArea::new(self.operating_area)?,
            tick_period: self.tick_period(),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build().map(|_| ())
    }
}

/// `value` can bound a symmetric `-value..value` sample: the span must stay finite
fn is_sampling_half_width(value: f64) -> bool {
    value >= 0.0 && (value * 2.0).is_finite()
}
