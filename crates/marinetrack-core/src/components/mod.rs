//! Component definitions for the vessel simulation.
//!
//! Components are pure data attached to vessel entities in the store's
//! `hecs::World`. They have no behavior - that lives in systems.

mod common;
mod vessel;

pub use common::*;
pub use vessel::*;
