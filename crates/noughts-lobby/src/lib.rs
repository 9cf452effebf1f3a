//! The lobby: where accepted connections wait to be paired.
//!
//! # Key types
//!
//! - [`Lobby`]: assigns identities and pairs connections in arrival order
//! - [`Pairing`]: two seats ready to become a [`Session`](noughts_session::Session)
//! - [`LobbyConfig`]: the player ceiling

mod config;
mod error;
mod lobby;

pub use config::{LobbyConfig, MIN_PLAYERS};
pub use error::LobbyError;
pub use lobby::{Lobby, Pairing};
