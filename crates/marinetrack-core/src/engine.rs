//! Simulation context - owns every model and drives the tick pipeline

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clock::Clock;
use crate::components::GeoPoint;
use crate::config::{SimulationConfig, SimulationModels};
use crate::error::{MotionError, SimError};
use crate::generation::TRACKED_VESSEL_ID;
use crate::map::{
    CameraMove, IconSpec, LineStyle, MapFactory, MapGate, MapSyncAdapter, MapWidget, ReconcileReport,
};
use crate::scheduler::{TickScheduler, TimerHost, TimerId};
use crate::selection::{Change, SelectionController, SubscriptionId, Subscribers};
use crate::store::{Snapshot, VesselStore};
use crate::systems::MotionEngine;

/// Marker id of the departure port
pub const DEPARTURE_PORT_MARKER: &str = "port-departure";
/// Marker id of the arrival port
pub const ARRIVAL_PORT_MARKER: &str = "port-arrival";
/// Polyline id of the tracked vessel's route
pub const ROUTE_LINE: &str = "route";

/// What a single timer firing did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Scheduler not running, nothing happened
    Idle,
    /// A new snapshot was published. `markers` is `None` when the map was
    /// not ready and marker sync was skipped.
    Advanced {
        tick: u64,
        markers: Option<ReconcileReport>,
    },
    /// The transition failed; the previous snapshot stays published
    Failed(MotionError),
}

/// Main simulation context, constructed once at startup and handed to
/// every consumer by reference
pub struct SimulationContext<M: MapWidget> {
    config: SimulationConfig,
    models: SimulationModels,
    engine: MotionEngine,
    store: VesselStore,
    sync: MapSyncAdapter,
    map: MapGate<M>,
    scheduler: TickScheduler,
    selection: SelectionController,
    subscribers: Subscribers,
    rng: StdRng,
    clock: Box<dyn Clock>,
    /// Formatted cursor position, written by the map's mouse-move listener
    cursor: Rc<RefCell<Option<String>>>,
    map_wait_logged: bool,
}

impl<M: MapWidget> SimulationContext<M> {
    /// Validate the configuration, seed the fleet and focus the tracked vessel
    pub fn new(config: SimulationConfig, clock: impl Clock + 'static) -> Result<Self, SimError> {
        let models = config.build()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let engine = MotionEngine::new(
            models.route.clone(),
            models.schedule.tick_increment(models.tick_period),
            models.operating_area,
            config.heading_jitter_deg,
        );
        let store = VesselStore::seed(
            &models.regions,
            &models.route,
            &models.schedule,
            config.ambient_count,
            config.drift,
            clock.now(),
            &mut rng,
        )?;
        let selection = SelectionController::new(
            store
                .contains(TRACKED_VESSEL_ID)
                .then(|| TRACKED_VESSEL_ID.to_string()),
        );

        Ok(Self {
            scheduler: TickScheduler::new(models.tick_period),
            config,
            models,
            engine,
            store,
            sync: MapSyncAdapter::new(),
            map: MapGate::NotReady,
            selection,
            subscribers: Subscribers::new(),
            rng,
            clock: Box::new(clock),
            cursor: Rc::new(RefCell::new(None)),
            map_wait_logged: false,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn models(&self) -> &SimulationModels {
        &self.models
    }

    pub fn motion_engine(&self) -> &MotionEngine {
        &self.engine
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ---- Map readiness ----

    pub fn is_map_ready(&self) -> bool {
        self.map.is_ready()
    }

    pub fn map(&self) -> Option<&M> {
        self.map.get()
    }

    pub fn map_mut(&mut self) -> Option<&mut M> {
        self.map.get_mut()
    }

    /// Number of vessel markers placed on the map so far
    pub fn marker_count(&self) -> usize {
        self.sync.marker_count()
    }

    /// Flip the gate to ready: tile layer, route line, labelled port markers,
    /// cursor readout, markers for the current snapshot, then the intro flight.
    /// A replaced map starts with a fresh marker registry.
    pub fn attach_map(&mut self, mut map: M) {
        let settings = &self.config.map;
        map.add_tile_layer(&settings.tile_url);
        map.add_polyline(
            ROUTE_LINE,
            self.models.route.waypoints(),
            &LineStyle::route(&settings.route_color),
        );
        map.add_or_update_marker(
            DEPARTURE_PORT_MARKER,
            self.models.route.start(),
            &IconSpec::port(&settings.departure_port_color, &settings.departure_port_label),
        );
        map.add_or_update_marker(
            ARRIVAL_PORT_MARKER,
            self.models.route.end(),
            &IconSpec::port(&settings.arrival_port_color, &settings.arrival_port_label),
        );

        let cursor = Rc::clone(&self.cursor);
        map.on_mouse_move(Box::new(move |at: GeoPoint| {
            *cursor.borrow_mut() = Some(at.to_hemisphere_string());
        }));

        if self.map.is_ready() {
            log::info!("Replacing attached map surface");
            self.sync = MapSyncAdapter::new();
        }
        let report = self.sync.reconcile(&self.store.snapshot(), &mut map);
        map.fly_to(settings.intro_center, settings.intro.zoom, settings.intro.duration_secs);

        log::info!("Map ready: {} vessel markers placed", report.created);
        self.map = MapGate::Ready(map);
        self.map_wait_logged = false;
    }

    /// Create the map through `factory` and attach it. On failure the gate
    /// stays not-ready and the simulation keeps running without markers.
    pub fn attach_map_from<F>(&mut self, factory: &mut F) -> Result<(), SimError>
    where
        F: MapFactory<Map = M>,
    {
        let settings = &self.config.map;
        match factory.create_map(&settings.container, settings.initial_center, settings.initial_zoom) {
            Ok(map) => {
                self.attach_map(map);
                Ok(())
            }
            Err(e) => {
                log::warn!("Map surface failed to initialize: {}", e);
                Err(e.into())
            }
        }
    }

    // ---- Tick lifecycle ----

    /// Register the periodic tick with the host
    pub fn mount(&mut self, host: &mut dyn TimerHost) -> Result<TimerId, SimError> {
        Ok(self.scheduler.start(host)?)
    }

    /// Deregister the tick. Safe to call repeatedly or before `mount`.
    pub fn unmount(&mut self, host: &mut dyn TimerHost) -> bool {
        self.scheduler.stop(host)
    }

    /// Handle one timer firing: advance motion, sync markers if the map is
    /// ready, then notify subscribers
    pub fn fire_tick(&mut self) -> TickOutcome {
        if !self.scheduler.is_running() {
            log::debug!("Tick fired while idle, ignoring");
            return TickOutcome::Idle;
        }

        // Motion is computed in full before any marker is touched
        let snapshot = match self.store.update(&self.engine, &mut self.rng) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("Tick failed, keeping previous snapshot: {}", e);
                return TickOutcome::Failed(e);
            }
        };

        let markers = match self.map.get_mut() {
            Some(map) => Some(self.sync.reconcile(&snapshot, map)),
            None => {
                if !self.map_wait_logged {
                    log::info!("Map not ready, skipping marker sync");
                    self.map_wait_logged = true;
                }
                None
            }
        };

        self.subscribers.notify(&Change::Snapshot(Arc::clone(&snapshot)));

        TickOutcome::Advanced {
            tick: snapshot.tick,
            markers,
        }
    }

    // ---- Read interface ----

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.store.snapshot()
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.selection.focused()
    }

    /// Change the focused vessel. Unknown ids are rejected and leave the
    /// focus as it was.
    pub fn set_focused_id(&mut self, id: Option<&str>) -> Result<(), SimError> {
        let snapshot = self.store.snapshot();
        if self.selection.set(id, &snapshot)? {
            self.notify_focus();
        }
        Ok(())
    }

    /// Focus `id`, or clear focus if it is already focused
    pub fn toggle_focus(&mut self, id: &str) -> Result<Option<String>, SimError> {
        let snapshot = self.store.snapshot();
        let focused = self.selection.toggle(id, &snapshot)?.map(str::to_string);
        self.notify_focus();
        Ok(focused)
    }

    pub fn on_marker_clicked(&mut self, id: &str) -> Result<(), SimError> {
        self.set_focused_id(Some(id))
    }

    /// Fly to the focused vessel at the focus zoom. `None` when nothing is
    /// focused or the map is not ready.
    pub fn center_on_focused(&mut self) -> Result<Option<GeoPoint>, SimError> {
        let Some(id) = self.selection.focused().map(str::to_string) else {
            return Ok(None);
        };
        self.fly_to_vessel(&id, self.config.map.focus)
    }

    /// Focus a vessel picked from the search box and fly to it
    pub fn focus_from_search(&mut self, id: &str) -> Result<Option<GeoPoint>, SimError> {
        self.set_focused_id(Some(id))?;
        self.fly_to_vessel(id, self.config.map.search_focus)
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&Change) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Last cursor position over the map, e.g. `44.6000°N 63.6000°W`
    pub fn cursor_readout(&self) -> Option<String> {
        self.cursor.borrow().clone()
    }

    // ---- Tracked vessel ----

    pub fn tracked_progress(&self) -> Option<f64> {
        self.store.snapshot().tracked().and_then(|v| v.progress())
    }

    pub fn days_remaining(&self) -> Option<u32> {
        self.tracked_progress()
            .map(|p| self.models.schedule.days_remaining(p))
    }

    pub fn eta(&self) -> Option<DateTime<Utc>> {
        self.tracked_progress()
            .map(|p| self.models.schedule.eta(p, self.clock.now()))
    }

    fn fly_to_vessel(&mut self, id: &str, camera: CameraMove) -> Result<Option<GeoPoint>, SimError> {
        let snapshot = self.store.snapshot();
        match self.map.get_mut() {
            Some(map) => self.sync.focus(&snapshot, id, map, camera).map(Some),
            None => Ok(None),
        }
    }

    fn notify_focus(&mut self) {
        let change = Change::Focus(self.selection.focused().map(str::to_string));
        self.subscribers.notify(&change);
    }
}
