//! Lobby configuration.

/// The fewest players the ceiling may allow: one full game.
pub const MIN_PLAYERS: usize = 2;

/// Settings for pairing connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyConfig {
    /// Most players counted at once (waiting or in a game).
    ///
    /// The acceptor only starts a new pairing when two more players fit
    /// under this ceiling. Default: 6, three concurrent games.
    pub max_players: usize,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self { max_players: 6 }
    }
}

impl LobbyConfig {
    /// Returns a config whose ceiling admits at least one game.
    ///
    /// A ceiling below [`MIN_PLAYERS`] could never start a pairing, so it
    /// is raised to that value with a warning.
    pub fn validated(self) -> Self {
        if self.max_players < MIN_PLAYERS {
            tracing::warn!(
                requested = self.max_players,
                using = MIN_PLAYERS,
                "max_players too low for a single game, raising it"
            );
            return Self {
                max_players: MIN_PLAYERS,
            };
        }
        self
    }
}
