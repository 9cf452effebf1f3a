//! Core protocol types for the Noughts wire format.
//!
//! Every type here has an exact byte representation. Client and server
//! must agree on it byte for byte, because there is no framing beyond
//! "commands are 3 bytes, integers are 4 bytes".

use std::fmt;

/// Length of a command token on the wire.
pub const COMMAND_LEN: usize = 3;

/// Length of an integer on the wire.
pub const INT_LEN: usize = 4;

/// The move value a client sends to ask for the active player count
/// instead of placing a mark.
pub const QUERY_PLAYER_COUNT: i32 = 9;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Which of the two seats in a game a connection occupies.
///
/// The identity is a single bit assigned at pairing time: the first
/// connection of a pair is `First` (wire value 0, plays O) and the second
/// is `Second` (wire value 1, plays X). It never changes for the lifetime
/// of the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    First,
    Second,
}

impl PlayerId {
    /// Both identities, in seat order.
    pub const BOTH: [PlayerId; 2] = [PlayerId::First, PlayerId::Second];

    /// The integer sent on the wire for this identity.
    pub fn to_wire(self) -> i32 {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// Parses an identity from its wire integer.
    pub fn from_wire(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::First),
            1 => Some(Self::Second),
            _ => None,
        }
    }

    /// The seat index, usable to index a two-element array.
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// The other player.
    pub fn opponent(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    /// The mark this player places: `'O'` for the first seat, `'X'` for
    /// the second.
    pub fn mark(self) -> char {
        match self {
            Self::First => 'O',
            Self::Second => 'X',
        }
    }
}

/// Display lets us use `{}` in format strings and logging.
/// `tracing::info!(%player, "moved")` prints "P-0".
impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.to_wire())
    }
}

// ---------------------------------------------------------------------------
// Command tokens
// ---------------------------------------------------------------------------

/// A 3-byte ASCII command token sent from server to client.
///
/// Tokens have no terminator and no length prefix: the receiver always
/// reads exactly [`COMMAND_LEN`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `HLD`: waiting for a second player.
    Hold,
    /// `SRT`: the game starts.
    Start,
    /// `TRN`: your turn; reply with one integer move.
    Turn,
    /// `INV`: your last move was rejected; send another.
    Invalid,
    /// `CNT`: followed by one integer, the active player count.
    Count,
    /// `UPD`: followed by two integers, player id and cell.
    Update,
    /// `WAT`: the other player is moving.
    Wait,
    /// `WIN`: you won.
    Win,
    /// `LSE`: you lost.
    Lose,
    /// `DRW`: the game is a draw.
    Draw,
}

impl Command {
    /// Every command, for exhaustive lookups.
    pub const ALL: [Command; 10] = [
        Command::Hold,
        Command::Start,
        Command::Turn,
        Command::Invalid,
        Command::Count,
        Command::Update,
        Command::Wait,
        Command::Win,
        Command::Lose,
        Command::Draw,
    ];

    /// The token bytes for this command.
    pub fn token(self) -> &'static [u8; COMMAND_LEN] {
        match self {
            Self::Hold => b"HLD",
            Self::Start => b"SRT",
            Self::Turn => b"TRN",
            Self::Invalid => b"INV",
            Self::Count => b"CNT",
            Self::Update => b"UPD",
            Self::Wait => b"WAT",
            Self::Win => b"WIN",
            Self::Lose => b"LSE",
            Self::Draw => b"DRW",
        }
    }

    /// Looks up the command for a token. Returns `None` for anything that
    /// is not one of the ten known tokens (tokens are case-sensitive).
    pub fn from_token(token: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.token() == token)
    }

    /// The token as a string, for logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hold => "HLD",
            Self::Start => "SRT",
            Self::Turn => "TRN",
            Self::Invalid => "INV",
            Self::Count => "CNT",
            Self::Update => "UPD",
            Self::Wait => "WAT",
            Self::Win => "WIN",
            Self::Lose => "LSE",
            Self::Draw => "DRW",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ServerMessage: a command plus its payload
// ---------------------------------------------------------------------------

/// A complete server-to-client message: a command and whatever integers
/// follow it.
///
/// The identity integer sent right after accept is not a `ServerMessage`
/// because it has no command token in front of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMessage {
    Hold,
    Start,
    Turn,
    Invalid,
    /// Number of players currently paired or waiting.
    Count(i32),
    /// A mark was placed. `position` is the raw cell index as sent.
    Update { player: PlayerId, position: i32 },
    Wait,
    Win,
    Lose,
    Draw,
}

impl ServerMessage {
    /// The command token that introduces this message.
    pub fn command(&self) -> Command {
        match self {
            Self::Hold => Command::Hold,
            Self::Start => Command::Start,
            Self::Turn => Command::Turn,
            Self::Invalid => Command::Invalid,
            Self::Count(_) => Command::Count,
            Self::Update { .. } => Command::Update,
            Self::Wait => Command::Wait,
            Self::Win => Command::Win,
            Self::Lose => Command::Lose,
            Self::Draw => Command::Draw,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // PlayerId
    // =====================================================================

    #[test]
    fn test_player_id_wire_values() {
        assert_eq!(PlayerId::First.to_wire(), 0);
        assert_eq!(PlayerId::Second.to_wire(), 1);
        assert_eq!(PlayerId::from_wire(0), Some(PlayerId::First));
        assert_eq!(PlayerId::from_wire(1), Some(PlayerId::Second));
    }

    #[test]
    fn test_player_id_from_wire_rejects_other_values() {
        assert_eq!(PlayerId::from_wire(2), None);
        assert_eq!(PlayerId::from_wire(-1), None);
    }

    #[test]
    fn test_player_id_opponent_and_mark() {
        assert_eq!(PlayerId::First.opponent(), PlayerId::Second);
        assert_eq!(PlayerId::Second.opponent(), PlayerId::First);
        // Identity 0 plays O, identity 1 plays X.
        assert_eq!(PlayerId::First.mark(), 'O');
        assert_eq!(PlayerId::Second.mark(), 'X');
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId::First.to_string(), "P-0");
        assert_eq!(PlayerId::Second.to_string(), "P-1");
    }

    // =====================================================================
    // Command
    // =====================================================================

    #[test]
    fn test_command_tokens_are_three_ascii_bytes_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for cmd in Command::ALL {
            let token = cmd.token();
            assert!(token.iter().all(u8::is_ascii_uppercase), "{cmd}");
            assert!(seen.insert(*token), "duplicate token for {cmd}");
            assert_eq!(cmd.as_str().as_bytes(), token);
        }
    }

    #[test]
    fn test_command_from_token_known() {
        assert_eq!(Command::from_token(b"TRN"), Some(Command::Turn));
        assert_eq!(Command::from_token(b"LSE"), Some(Command::Lose));
    }

    #[test]
    fn test_command_from_token_unknown_or_wrong_case() {
        assert_eq!(Command::from_token(b"XYZ"), None);
        assert_eq!(Command::from_token(b"trn"), None);
        assert_eq!(Command::from_token(b"TR"), None);
    }

    // =====================================================================
    // ServerMessage
    // =====================================================================

    #[test]
    fn test_server_message_command_mapping() {
        assert_eq!(ServerMessage::Count(3).command(), Command::Count);
        let upd = ServerMessage::Update {
            player: PlayerId::First,
            position: 4,
        };
        assert_eq!(upd.command(), Command::Update);
    }
}
