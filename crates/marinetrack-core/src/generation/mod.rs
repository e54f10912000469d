//! Generation - creation of the initial fleet.

mod fleet;
mod names;

pub use fleet::*;
pub use names::*;
