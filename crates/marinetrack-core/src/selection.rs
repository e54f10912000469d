//! Focused-vessel selection and change subscriptions for the views

use std::sync::Arc;

use crate::error::SimError;
use crate::store::Snapshot;

/// Which single vessel, if any, is focused across all views
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    focused: Option<String>,
}

impl SelectionController {
    pub fn new(initial: Option<String>) -> Self {
        Self { focused: initial }
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Focus a vessel (or clear focus). Unknown ids are rejected.
    /// Returns whether the focus changed.
    pub fn set(&mut self, id: Option<&str>, snapshot: &Snapshot) -> Result<bool, SimError> {
        if let Some(id) = id {
            if snapshot.get(id).is_none() {
                return Err(SimError::UnknownVessel(id.to_string()));
            }
        }
        if self.focused.as_deref() == id {
            return Ok(false);
        }
        self.focused = id.map(str::to_string);
        Ok(true)
    }

    /// Click-to-select, click-again-to-deselect
    pub fn toggle(&mut self, id: &str, snapshot: &Snapshot) -> Result<Option<&str>, SimError> {
        if self.focused.as_deref() == Some(id) {
            self.focused = None;
        } else {
            self.set(Some(id), snapshot)?;
        }
        Ok(self.focused())
    }
}

/// What changed, delivered to subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// A tick published a new snapshot
    Snapshot(Arc<Snapshot>),
    /// Focus moved to another vessel, or was cleared
    Focus(Option<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&Change)>;

/// Change listeners, notified in subscription order
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&Change) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sid, _)| *sid != id);
        self.callbacks.len() != before
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn notify(&mut self, change: &Change) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn snapshot() -> Snapshot {
        let vessel = |id: &str| Vessel {
            id: id.into(),
            name: id.into(),
            kind: VesselKind::Cargo,
            position: GeoPoint::new(1.0, 1.0),
            heading: 0.0,
            speed_knots: 10.0,
            status: VesselStatus::EnRoute,
            motion: Motion::Ambient {
                velocity: Velocity::default(),
            },
            itinerary: Itinerary {
                from: "A".into(),
                to: "B".into(),
                cargo: "Ore".into(),
                built_year: 2010,
                length_m: 100,
                tonnage_gt: 1000,
                mmsi: "200000000".into(),
                flag: "GB".into(),
            },
        };
        Snapshot {
            tick: 0,
            vessels: vec![vessel("a"), vessel("b")],
        }
    }

    #[test]
    fn test_set_and_clear() {
        let snap = snapshot();
        let mut sel = SelectionController::new(Some("a".into()));
        assert_eq!(sel.focused(), Some("a"));
        assert!(!sel.set(Some("a"), &snap).unwrap());
        assert!(sel.set(Some("b"), &snap).unwrap());
        assert!(sel.set(None, &snap).unwrap());
        assert_eq!(sel.focused(), None);
    }

    #[test]
    fn test_unknown_id_rejected() {
        let snap = snapshot();
        let mut sel = SelectionController::default();
        assert!(matches!(
            sel.set(Some("zzz"), &snap),
            Err(SimError::UnknownVessel(_))
        ));
        assert_eq!(sel.focused(), None);
    }

    #[test]
    fn test_toggle() {
        let snap = snapshot();
        let mut sel = SelectionController::default();
        assert_eq!(sel.toggle("a", &snap).unwrap(), Some("a"));
        assert_eq!(sel.toggle("a", &snap).unwrap(), None);
        assert_eq!(sel.toggle("b", &snap).unwrap(), Some("b"));
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let seen = Rc::new(RefCell::new(0));
        let mut subs = Subscribers::new();
        let counter = Rc::clone(&seen);
        let id = subs.subscribe(move |_| *counter.borrow_mut() += 1);

        subs.notify(&Change::Focus(None));
        assert_eq!(*seen.borrow(), 1);

        assert!(subs.unsubscribe(id));
        assert!(!subs.unsubscribe(id));
        subs.notify(&Change::Focus(None));
        assert_eq!(*seen.borrow(), 1);
        assert!(subs.is_empty());
    }
}
