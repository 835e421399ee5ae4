//! Error types for world data access and filtering.

use thiserror::Error;

/// Which world data table an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldTable {
    Villages,
    Players,
    Tribes,
}

impl WorldTable {
    /// File name of the table on the game server and in data directories.
    pub fn file_name(self) -> &'static str {
        match self {
            WorldTable::Villages => "village.txt",
            WorldTable::Players => "player.txt",
            WorldTable::Tribes => "ally.txt",
        }
    }
}

impl std::fmt::Display for WorldTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Failure while reading one of the world data tables.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("IO error reading {table}: {source}")]
    Io {
        table: WorldTable,
        #[source]
        source: std::io::Error,
    },

    #[error("Transport error fetching {table}: {source}")]
    Transport {
        table: WorldTable,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server answered {status} for {table}")]
    Status { table: WorldTable, status: u16 },

    #[error("Malformed row in {table} at line {line}: {reason}")]
    Malformed {
        table: WorldTable,
        line: usize,
        reason: String,
    },

    #[error("Gateway configuration error: {0}")]
    Config(String),
}

/// Failure while turning raw form text into a filter request.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CollectError {
    #[error("Invalid separator: {0}")]
    Separator(String),
}

/// Requested tribe or player names that matched no record.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default)]
#[error("Unresolved names (tribes: {missing_tribes:?}, players: {missing_players:?})")]
pub struct UnresolvedNames {
    pub missing_tribes: Vec<String>,
    pub missing_players: Vec<String>,
}

impl UnresolvedNames {
    pub fn is_empty(&self) -> bool {
        self.missing_tribes.is_empty() && self.missing_players.is_empty()
    }
}
