//! Vessel store - sole owner of vessel state, published as immutable snapshots.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use hecs::{Entity, EntityBuilder, World};
use rand::Rng;
use serde::Serialize;

use crate::components::*;
use crate::error::{MotionError, StoreError};
use crate::generation::{seed_fleet, DriftLimits};
use crate::regions::RegionSet;
use crate::route::RouteModel;
use crate::schedule::ScheduleModel;
use crate::systems::{motion_system, MotionEngine};

/// Read-only view of the whole fleet after a given tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Number of ticks applied since seeding
    pub tick: u64,
    /// Vessels in seeding order
    pub vessels: Vec<Vessel>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.vessels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vessels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vessel> {
        self.vessels.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Vessel> {
        self.vessels.iter().find(|v| v.id == id)
    }

    /// The scripted vessel, if the fleet has one
    pub fn tracked(&self) -> Option<&Vessel> {
        self.vessels.iter().find(|v| v.is_scripted())
    }
}

/// Authoritative in-memory fleet. The `hecs::World` is the private working
/// copy; readers only ever see `Arc<Snapshot>` values.
pub struct VesselStore {
    world: World,
    order: Vec<Entity>,
    index: HashMap<String, Entity>,
    snapshot: Arc<Snapshot>,
}

impl VesselStore {
    /// Take ownership of an initial fleet. Ids must be unique, at most one
    /// vessel may be scripted, its progress must lie in [0, 1) and every
    /// position must be a valid coordinate.
    pub fn from_vessels(vessels: Vec<Vessel>) -> Result<Self, StoreError> {
        let mut world = World::new();
        let mut order = Vec::with_capacity(vessels.len());
        let mut index = HashMap::with_capacity(vessels.len());
        let mut scripted: Option<String> = None;

        for vessel in &vessels {
            if index.contains_key(&vessel.id) {
                return Err(StoreError::DuplicateId(vessel.id.clone()));
            }
            if let Motion::Scripted { progress } = vessel.motion {
                if let Some(first) = &scripted {
                    return Err(StoreError::MultipleScripted {
                        first: first.clone(),
                        second: vessel.id.clone(),
                    });
                }
                if !(0.0..1.0).contains(&progress) {
                    return Err(StoreError::ProgressOutOfRange {
                        id: vessel.id.clone(),
                        progress,
                    });
                }
                scripted = Some(vessel.id.clone());
            }
            if !vessel.position.is_finite() || !vessel.position.in_valid_range() {
                return Err(StoreError::PositionOutOfRange {
                    id: vessel.id.clone(),
                    lat: vessel.position.lat,
                    lng: vessel.position.lng,
                });
            }

            let mut builder = EntityBuilder::new();
            builder
                .add(Identity {
                    id: vessel.id.clone(),
                    name: vessel.name.clone(),
                })
                .add(vessel.kind)
                .add(Position(vessel.position))
                .add(Heading(vessel.heading))
                .add(Speed(vessel.speed_knots))
                .add(vessel.status)
                .add(vessel.itinerary.clone());
            match vessel.motion {
                Motion::Scripted { progress } => {
                    builder.add(Voyage { progress });
                }
                Motion::Ambient { velocity } => {
                    builder.add(Drift(velocity));
                }
            }
            let entity = world.spawn(builder.build());

            index.insert(vessel.id.clone(), entity);
            order.push(entity);
        }

        log::info!(
            "Vessel store seeded: {} vessels ({} scripted)",
            vessels.len(),
            usize::from(scripted.is_some())
        );

        Ok(Self {
            world,
            order,
            index,
            snapshot: Arc::new(Snapshot { tick: 0, vessels }),
        })
    }

    /// Seed a fresh fleet and take ownership of it
    pub fn seed(
        regions: &RegionSet,
        route: &RouteModel,
        schedule: &ScheduleModel,
        ambient_count: u32,
        drift: DriftLimits,
        now: DateTime<Utc>,
        rng: &mut impl Rng,
    ) -> Result<Self, StoreError> {
        Self::from_vessels(seed_fleet(
            regions,
            route,
            schedule,
            ambient_count,
            drift,
            now,
            rng,
        ))
    }

    /// The most recently published snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Apply one motion tick to every vessel and publish a new snapshot.
    /// On error nothing changes and the previous snapshot stays published.
    pub fn update(&mut self, engine: &MotionEngine, rng: &mut impl Rng) -> Result<Arc<Snapshot>, MotionError> {
        motion_system(&mut self.world, engine, rng)?;

        let vessels: Vec<Vessel> = self
            .order
            .iter()
            .filter_map(|&entity| self.read_vessel(entity))
            .collect();
        debug_assert_eq!(vessels.len(), self.order.len());

        self.snapshot = Arc::new(Snapshot {
            tick: self.snapshot.tick + 1,
            vessels,
        });
        Ok(self.snapshot())
    }

    fn read_vessel(&self, entity: Entity) -> Option<Vessel> {
        let e = self.world.entity(entity).ok()?;
        let identity = e.get::<&Identity>()?;
        let motion = match (e.get::<&Voyage>(), e.get::<&Drift>()) {
            (Some(voyage), _) => Motion::Scripted {
                progress: voyage.progress,
            },
            (None, Some(drift)) => Motion::Ambient { velocity: drift.0 },
            (None, None) => return None,
        };

        Some(Vessel {
            id: identity.id.clone(),
            name: identity.name.clone(),
            kind: *e.get::<&VesselKind>()?,
            position: e.get::<&Position>()?.0,
            heading: e.get::<&Heading>()?.0,
            speed_knots: e.get::<&Speed>()?.0,
            status: *e.get::<&VesselStatus>()?,
            motion,
            itinerary: (*e.get::<&Itinerary>()?).clone(),
        })
    }
}
