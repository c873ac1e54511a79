//! Game drivers: the race coordinator and the top-level controller.

pub mod controller;
pub mod race;

pub use controller::{Controller, StartRequest};
pub use race::{Match, RACE_PLAYERS};
