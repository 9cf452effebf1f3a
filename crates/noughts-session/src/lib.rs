//! Game sessions for Noughts.
//!
//! Once the lobby has paired two connections, this crate takes over:
//!
//! 1. **Session** ([`Session`]) runs the turn loop for one game, from
//!    `SRT` to `WIN`/`LSE`/`DRW`, as a small state machine ([`Phase`]).
//! 2. **Player count** ([`PlayerRegistry`]) is the one piece of state
//!    shared across sessions. Each connection holds a [`PlayerTicket`]
//!    from the moment it is accepted until its session ends.
//!
//! # How it fits in the stack
//!
//! ```text
//! Lobby (above)     ← builds Seats and hands a pair to Session::new
//!     ↕
//! Session (this crate) ← one task per game, owns both connections
//!     ↕
//! Game + Protocol (below) ← rules and wire frames
//! ```

mod error;
mod phase;
mod registry;
mod session;

pub use error::SessionError;
pub use phase::Phase;
pub use registry::{PlayerRegistry, PlayerTicket};
pub use session::{Outcome, Seat, Session, SessionId};
