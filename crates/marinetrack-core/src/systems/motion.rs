//! Motion system - advances every vessel by one tick

use hecs::{Entity, World};
use rand::Rng;

use crate::components::*;
use crate::error::MotionError;
use crate::regions::OperatingArea;
use crate::route::RouteModel;
use crate::schedule::MAX_PROGRESS;

/// Next pose of the scripted vessel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedStep {
    pub progress: f64,
    pub position: GeoPoint,
    pub heading: f64,
}

/// Next kinematic state of an ambient vessel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientStep {
    pub position: GeoPoint,
    pub heading: f64,
    pub velocity: Velocity,
}

/// Pure per-tick transition rules
#[derive(Debug, Clone)]
pub struct MotionEngine {
    route: RouteModel,
    tick_increment: f64,
    area: OperatingArea,
    heading_jitter: f64,
}

impl MotionEngine {
    /// `tick_increment` is the progress gained per tick by the scripted vessel;
    /// `heading_jitter` is the half-width (degrees) of the ambient heading noise.
    pub fn new(route: RouteModel, tick_increment: f64, area: OperatingArea, heading_jitter: f64) -> Self {
        Self {
            route,
            tick_increment: tick_increment.max(0.0),
            area,
            heading_jitter: heading_jitter.abs(),
        }
    }

    pub fn route(&self) -> &RouteModel {
        &self.route
    }

    pub fn tick_increment(&self) -> f64 {
        self.tick_increment
    }

    pub fn operating_area(&self) -> &OperatingArea {
        &self.area
    }

    /// Advance route progress, saturating at `MAX_PROGRESS`. At saturation
    /// the pose stays frozen at the final interpolated point.
    pub fn scripted_step(&self, progress: f64) -> ScriptedStep {
        let next = (progress + self.tick_increment).min(MAX_PROGRESS).max(progress);
        ScriptedStep {
            progress: next,
            position: self.route.position_at(next),
            heading: self.route.heading_at(next),
        }
    }

    /// Drift, jitter the heading, then reflect off the operating area
    pub fn ambient_step(
        &self,
        position: GeoPoint,
        heading: f64,
        velocity: Velocity,
        rng: &mut impl Rng,
    ) -> AmbientStep {
        let next = position + velocity;
        let jitter = if self.heading_jitter > 0.0 {
            rng.gen_range(-self.heading_jitter..self.heading_jitter)
        } else {
            0.0
        };
        AmbientStep {
            // Reflection is soft; the clamp only guards the global lat/lng range
            position: next.clamped(),
            heading: normalize_heading(heading + jitter + 360.0),
            velocity: self.area.reflect(next, velocity),
        }
    }

    /// Next state of a single vessel record
    pub fn next_state(&self, vessel: &Vessel, rng: &mut impl Rng) -> Result<Vessel, MotionError> {
        let mut next = vessel.clone();
        match vessel.motion {
            Motion::Scripted { progress } => {
                let step = self.scripted_step(progress);
                check_progress(&vessel.id, progress, step.progress)?;
                next.position = step.position;
                next.heading = step.heading;
                next.status = VesselStatus::EnRoute;
                next.motion = Motion::Scripted {
                    progress: step.progress,
                };
            }
            Motion::Ambient { velocity } => {
                let step = self.ambient_step(vessel.position, vessel.heading, velocity, rng);
                next.position = step.position;
                next.heading = step.heading;
                next.motion = Motion::Ambient {
                    velocity: step.velocity,
                };
            }
        }
        check_pose(&next.id, next.position, next.heading)?;
        Ok(next)
    }
}

fn check_progress(id: &str, from: f64, to: f64) -> Result<(), MotionError> {
    if !to.is_finite() {
        return Err(MotionError::NonFinite { id: id.to_string() });
    }
    if to < from {
        return Err(MotionError::ProgressRegressed {
            id: id.to_string(),
            from,
            to,
        });
    }
    Ok(())
}

fn check_pose(id: &str, position: GeoPoint, heading: f64) -> Result<(), MotionError> {
    if !position.is_finite() || !heading.is_finite() {
        return Err(MotionError::NonFinite { id: id.to_string() });
    }
    if !position.in_valid_range() {
        return Err(MotionError::PositionOutOfRange {
            id: id.to_string(),
            lat: position.lat,
            lng: position.lng,
        });
    }
    Ok(())
}

enum PendingUpdate {
    Scripted(ScriptedStep),
    Ambient(AmbientStep),
}

/// Move every vessel in the world by one tick.
///
/// All transitions are computed and checked before any component is written,
/// so a failing transition leaves the world untouched. Returns the number of
/// vessels moved.
pub fn motion_system(
    world: &mut World,
    engine: &MotionEngine,
    rng: &mut impl Rng,
) -> Result<usize, MotionError> {
    let mut updates: Vec<(Entity, PendingUpdate)> = Vec::with_capacity(64);

    for (entity, (identity, voyage)) in world.query::<(&Identity, &Voyage)>().iter() {
        let step = engine.scripted_step(voyage.progress);
        check_progress(&identity.id, voyage.progress, step.progress)?;
        check_pose(&identity.id, step.position, step.heading)?;
        updates.push((entity, PendingUpdate::Scripted(step)));
    }

    for (entity, (identity, pos, heading, drift)) in world
        .query::<(&Identity, &Position, &Heading, &Drift)>()
        .iter()
    {
        let step = engine.ambient_step(pos.0, heading.0, drift.0, rng);
        check_pose(&identity.id, step.position, step.heading)?;
        updates.push((entity, PendingUpdate::Ambient(step)));
    }

    let moved = updates.len();
    for (entity, update) in updates {
        match update {
            PendingUpdate::Scripted(step) => {
                if let Ok(mut voyage) = world.get::<&mut Voyage>(entity) {
                    voyage.progress = step.progress;
                }
                if let Ok(mut pos) = world.get::<&mut Position>(entity) {
                    pos.0 = step.position;
                }
                if let Ok(mut heading) = world.get::<&mut Heading>(entity) {
                    heading.0 = step.heading;
                }
                // Pinned; nothing else may change the scripted vessel's status
                if let Ok(mut status) = world.get::<&mut VesselStatus>(entity) {
                    *status = VesselStatus::EnRoute;
                }
            }
            PendingUpdate::Ambient(step) => {
                if let Ok(mut pos) = world.get::<&mut Position>(entity) {
                    pos.0 = step.position;
                }
                if let Ok(mut heading) = world.get::<&mut Heading>(entity) {
                    heading.0 = step.heading;
                }
                if let Ok(mut drift) = world.get::<&mut Drift>(entity) {
                    drift.0 = step.velocity;
                }
            }
        }
    }

    Ok(moved)
}
