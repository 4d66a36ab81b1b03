//! The flip-birds game core: session state, physics, scoring and the
//! screen state machine. No I/O happens here; front ends drive it through
//! [`tick`] and [`handle_event`] and act on the returned [`Effect`]s.

pub mod collision;
pub mod controls;
pub mod events;
pub mod machine;
pub mod physics;
pub mod session;
pub mod snapshot;
pub mod story;
pub mod types;
pub mod velocity;

pub use controls::MuteButton;
pub use events::{Clip, Cue, Effect, GameEvent};
pub use machine::{handle_event, tick, transition, FlagOp, Transition, Trigger};
pub use session::GameSession;
pub use snapshot::{snapshot, Snapshot};
pub use types::{Bird, Epoch, Obstacle, Screen, ScreenKind};
pub use velocity::{Autopilot, ManualFlap, VelocitySource};
