//! MarineTrack Core - Vessel Motion Simulation and Map Sync Engine
//!
//! Simulates a fleet of vessels on the North Atlantic: one tracked vessel
//! whose position is a pure function of wall-clock time along a fixed route,
//! and dozens of ambient vessels drifting randomly inside a soft operating
//! area. Each tick the fleet advances and an external map is reconciled to
//! match.
//!
//! # Architecture
//!
//! Vessel state lives in a private ECS world (`hecs`) inside the store:
//! - **Components**: pure data per vessel (Position, Heading, Voyage, Drift, ...)
//! - **Systems**: the motion system computes every transition, then applies it
//! - **Snapshots**: each tick publishes a new immutable `Arc<Snapshot>`
//!
//! The map widget, list views and timer are host-provided and sit behind the
//! `MapWidget`, `MapFactory` and `TimerHost` traits.
//!
//! # Example
//!
//! ```rust,no_run
//! use marinetrack_core::prelude::*;
//!
//! let mut ctx: SimulationContext<HeadlessMap> =
//!     SimulationContext::new(SimulationConfig::default(), SystemClock).unwrap();
//! let mut host = ManualTimerHost::new();
//! ctx.mount(&mut host).unwrap();
//! ctx.attach_map(HeadlessMap::new());
//!
//! // Call once per timer firing
//! ctx.fire_tick();
//! ```

pub mod clock;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod map;
pub mod query;
pub mod regions;
pub mod route;
pub mod schedule;
pub mod scheduler;
pub mod selection;
pub mod store;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::components::*;
    pub use crate::config::SimulationConfig;
    pub use crate::engine::{SimulationContext, TickOutcome};
    pub use crate::error::SimError;
    pub use crate::map::{HeadlessMap, HeadlessMapFactory, MapFactory, MapWidget};
    pub use crate::scheduler::{ManualTimerHost, TickScheduler, TimerHost};
    pub use crate::selection::Change;
    pub use crate::store::Snapshot;
}
