pub mod analog_clock;
pub mod cities;
pub mod clock_source;
pub mod config;
pub mod event_bus;
pub mod module_context;
pub mod preferences;
pub mod signals;
pub mod target_drawable;
pub mod timer_display;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use module_context::{ModuleContext, ModuleEventSender};
