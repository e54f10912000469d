//! Error types for the simulation core.

use chrono::{DateTime, Utc};

/// Invalid construction parameters. Raised at build time, never mid-simulation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("route needs at least 2 waypoints, found {found}")]
    TooFewWaypoints { found: usize },

    #[error("waypoint {index} is not a finite in-range coordinate")]
    InvalidWaypoint { index: usize },

    #[error("arrival {arrival} must be after departure {departure}")]
    ScheduleInverted {
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    },

    #[error("region set is empty")]
    EmptyRegionSet,

    #[error("region {index} is inverted or out of range")]
    InvalidRegion { index: usize },

    #[error("operating area is inverted or out of range")]
    InvalidOperatingArea,

    #[error("tick period must be greater than zero")]
    InvalidTickPeriod,

    #[error("{field} must be a finite, non-negative half-width")]
    InvalidMotionLimits { field: &'static str },
}

/// Violations of the store's identity rules
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate vessel id: {0}")]
    DuplicateId(String),

    #[error("only one scripted vessel allowed, found {first} and {second}")]
    MultipleScripted { first: String, second: String },

    #[error("scripted vessel {id} has progress {progress} outside [0, 1)")]
    ProgressOutOfRange { id: String, progress: f64 },

    #[error("vessel {id} starts outside the valid coordinate range: ({lat}, {lng})")]
    PositionOutOfRange { id: String, lat: f64, lng: f64 },
}

/// A transition produced a state that breaks a motion invariant.
/// Always a defect in the motion code, never a user error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MotionError {
    #[error("progress of {id} went backward: {from} -> {to}")]
    ProgressRegressed { id: String, from: f64, to: f64 },

    #[error("{id} left the valid coordinate range: ({lat}, {lng})")]
    PositionOutOfRange { id: String, lat: f64, lng: f64 },

    #[error("{id} produced a non-finite value")]
    NonFinite { id: String },
}

/// The external map surface could not be brought up
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    #[error("map surface unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchedulerError {
    #[error("tick scheduler is already running")]
    AlreadyRunning,
}

/// Umbrella error for the public simulation context
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error("map error: {0}")]
    Map(#[from] MapError),

    #[error("unknown vessel: {0}")]
    UnknownVessel(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
