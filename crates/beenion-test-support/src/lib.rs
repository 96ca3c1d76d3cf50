//! Shared test doubles and fixtures for the Beenion write side.

mod clock;
mod fixtures;
mod logging;
mod repository;

pub use clock::{FixedClock, fixed_now};
pub use fixtures::{history, stored_events};
pub use logging::init_tracing;
pub use repository::{EmptyEventRepository, FailingEventRepository, RecordingEventRepository};
