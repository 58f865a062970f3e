//! App layer - portfolio state and command processing
//!
//! The App actor receives UI events, network responses and timer firings,
//! updates state, and emits network commands and render state.

pub mod state;
pub mod actor;
pub mod commands;
pub mod timers;

pub use state::{AppState, Effect};
pub use actor::AppActor;
