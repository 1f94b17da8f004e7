//! Collaborator ports consumed by the deskclock widgets.
//!
//! Each port describes a capability the host environment provides: wall time,
//! drawing, time-change notifications and key-value preferences. Core crates
//! program against these traits so hosts can plug in their own toolkit.

pub mod clock;
pub mod preferences;
pub mod renderer;
pub mod signals;
