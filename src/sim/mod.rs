//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied clock only
//! - Seeded RNG only
//! - At most one live object, processed in spawn order
//! - No rendering or platform dependencies

pub mod object;
pub mod state;
pub mod tick;

pub use object::FallingObject;
pub use state::{Calibration, GameEvent, GameOutcome, GamePhase, GameSession, SessionState};
pub use tick::{TickInput, tick};
