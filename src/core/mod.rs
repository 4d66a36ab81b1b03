//! Core tuning, configuration and frame timing shared by every front end.

pub mod clock;
pub mod config;
pub mod constants;

pub use clock::{FrameClock, FrameDelta};
pub use config::{ConfigError, GameConfig};
