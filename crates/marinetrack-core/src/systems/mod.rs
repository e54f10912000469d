//! Systems - logic that operates on vessel components

mod motion;

pub use motion::*;
