//! Wire protocol for Noughts.
//!
//! This crate defines the "language" that clients and servers speak:
//!
//! - **Types** ([`PlayerId`], [`Command`], [`ServerMessage`]): the
//!   values that travel on the wire.
//! - **Codec** ([`WireExt`], [`encode_int`], [`decode_int`]): how those
//!   values are turned into fixed-size frames and read back.
//! - **Errors** ([`ProtocolError`]): what can go wrong while framing.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw bytes) and the game
//! session. It knows nothing about boards or turns, only how frames are
//! laid out.
//!
//! ```text
//! Transport (bytes) → Protocol (commands, ints) → Session (turn loop)
//! ```

mod codec;
mod error;
mod types;

pub use codec::{WireExt, decode_int, encode_int};
pub use error::ProtocolError;
pub use types::{COMMAND_LEN, Command, INT_LEN, PlayerId, QUERY_PLAYER_COUNT, ServerMessage};
