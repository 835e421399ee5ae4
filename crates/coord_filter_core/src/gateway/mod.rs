//! World data access.
//!
//! A [`WorldDataGateway`] hands out the three world tables. [`fetch_world`]
//! reads all of them concurrently and fails as a whole if any single read
//! fails, so callers never see a partial [`WorldSnapshot`].

use crate::error::GatewayError;
use crate::types::{PlayerId, PlayerRecord, TribeId, TribeRecord, VillageRecord};
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::debug;

mod directory;
mod http;

pub use directory::DirectoryWorldGateway;
pub use http::HttpWorldGateway;

/// Source of the three world data tables.
#[async_trait]
pub trait WorldDataGateway: Send + Sync {
    /// Short label used in logs.
    fn describe(&self) -> String;

    async fn villages(&self) -> Result<Vec<VillageRecord>, GatewayError>;

    async fn players(&self) -> Result<Vec<PlayerRecord>, GatewayError>;

    async fn tribes(&self) -> Result<Vec<TribeRecord>, GatewayError>;
}

/// Reads villages, players and tribes concurrently.
///
/// The first failing read aborts the join and its error is returned;
/// the other tables are discarded.
pub async fn fetch_world<G>(gateway: &G) -> Result<WorldSnapshot, GatewayError>
where
    G: WorldDataGateway + ?Sized,
{
    debug!("Fetching world data from {}", gateway.describe());
    let (villages, players, tribes) =
        tokio::try_join!(gateway.villages(), gateway.players(), gateway.tribes())?;

    debug!(
        villages = villages.len(),
        players = players.len(),
        tribes = tribes.len(),
        "World data fetched"
    );

    Ok(WorldSnapshot {
        villages,
        players,
        tribes,
    })
}

/// The three tables from one fetch, kept verbatim.
#[derive(Debug, Clone, Default)]
pub struct WorldSnapshot {
    pub villages: Vec<VillageRecord>,
    pub players: Vec<PlayerRecord>,
    pub tribes: Vec<TribeRecord>,
}

impl WorldSnapshot {
    /// Ids of every player whose name matches one of `names`, ignoring case.
    pub fn player_ids_by_name(&self, names: &[String]) -> HashSet<PlayerId> {
        ids_by_name(names, &self.players, |p| (p.id, p.name.as_str()))
    }

    /// Ids of every tribe whose tag matches one of `tags`, ignoring case.
    pub fn tribe_ids_by_tag(&self, tags: &[String]) -> HashSet<TribeId> {
        ids_by_name(tags, &self.tribes, |t| (t.id, t.tag.as_str()))
    }

    /// Ids of the players belonging to any of `tribe_ids`.
    pub fn tribe_members(&self, tribe_ids: &HashSet<TribeId>) -> HashSet<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.tribe != 0 && tribe_ids.contains(&p.tribe))
            .map(|p| p.id)
            .collect()
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.players.iter().any(|p| names_match(&p.name, name))
    }

    pub fn has_tribe(&self, tag: &str) -> bool {
        self.tribes.iter().any(|t| names_match(&t.tag, tag))
    }
}

/// Case-insensitive name comparison used for every lookup.
pub fn names_match(record_name: &str, requested: &str) -> bool {
    record_name.to_lowercase() == requested.to_lowercase()
}

fn ids_by_name<R>(names: &[String], records: &[R], key: impl Fn(&R) -> (u32, &str)) -> HashSet<u32> {
    let wanted: HashSet<String> = names.iter().map(|n| n.to_lowercase()).collect();
    records
        .iter()
        .map(&key)
        .filter(|(_, name)| wanted.contains(&name.to_lowercase()))
        .map(|(id, _)| id)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::WorldTable;

    /// In-memory gateway; a table set to `None` fails with a status error.
    pub(crate) struct StaticGateway {
        pub villages: Option<Vec<VillageRecord>>,
        pub players: Option<Vec<PlayerRecord>>,
        pub tribes: Option<Vec<TribeRecord>>,
    }

    fn or_status<T: Clone>(table: WorldTable, rows: &Option<Vec<T>>) -> Result<Vec<T>, GatewayError> {
        rows.clone().ok_or(GatewayError::Status { table, status: 503 })
    }

    #[async_trait]
    impl WorldDataGateway for StaticGateway {
        fn describe(&self) -> String {
            "static".to_string()
        }

        async fn villages(&self) -> Result<Vec<VillageRecord>, GatewayError> {
            or_status(WorldTable::Villages, &self.villages)
        }

        async fn players(&self) -> Result<Vec<PlayerRecord>, GatewayError> {
            or_status(WorldTable::Players, &self.players)
        }

        async fn tribes(&self) -> Result<Vec<TribeRecord>, GatewayError> {
            or_status(WorldTable::Tribes, &self.tribes)
        }
    }

    pub(crate) fn player(id: PlayerId, name: &str, tribe: TribeId) -> PlayerRecord {
        PlayerRecord {
            id,
            name: name.to_string(),
            tribe,
            villages: 0,
            points: 0,
            rank: 0,
        }
    }

    pub(crate) fn tribe(id: TribeId, tag: &str) -> TribeRecord {
        TribeRecord {
            id,
            name: format!("{tag} tribe"),
            tag: tag.to_string(),
            members: 0,
            villages: 0,
            points: 0,
            all_points: 0,
            rank: 0,
        }
    }

    pub(crate) fn village(id: u32, x: i32, y: i32, owner: PlayerId) -> VillageRecord {
        VillageRecord {
            id,
            name: format!("Village {id}"),
            x,
            y,
            owner,
            points: 0,
            rank: 0,
        }
    }

    #[tokio::test]
    async fn test_fetch_world_joins_all_tables() {
        let gateway = StaticGateway {
            villages: Some(vec![village(1, 500, 500, 1)]),
            players: Some(vec![player(1, "Bob", 0)]),
            tribes: Some(vec![tribe(3, "NW")]),
        };

        let world = fetch_world(&gateway).await.unwrap();
        assert_eq!(world.villages.len(), 1);
        assert_eq!(world.players[0].name, "Bob");
        assert_eq!(world.tribes[0].tag, "NW");
    }

    #[tokio::test]
    async fn test_fetch_world_fails_if_any_table_fails() {
        let gateway = StaticGateway {
            villages: Some(vec![village(1, 500, 500, 1)]),
            players: None,
            tribes: Some(vec![]),
        };

        let err = fetch_world(&gateway).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Status {
                table: WorldTable::Players,
                status: 503
            }
        ));
    }

    #[test]
    fn test_lookups_ignore_case() {
        let world = WorldSnapshot {
            villages: vec![],
            players: vec![player(1, "Bob", 3), player(2, "Alice", 3), player(4, "Eve", 0)],
            tribes: vec![tribe(3, "NW")],
        };

        let ids = world.player_ids_by_name(&["bOB".to_string()]);
        assert_eq!(ids, HashSet::from([1]));

        let tribes = world.tribe_ids_by_tag(&["nw".to_string()]);
        assert_eq!(tribes, HashSet::from([3]));
        assert_eq!(world.tribe_members(&tribes), HashSet::from([1, 2]));

        assert!(world.has_player("ALICE"));
        assert!(!world.has_tribe("Ghost"));
    }

    #[test]
    fn test_tribeless_players_are_never_members() {
        let world = WorldSnapshot {
            villages: vec![],
            players: vec![player(4, "Eve", 0)],
            tribes: vec![],
        };
        assert!(world.tribe_members(&HashSet::from([0])).is_empty());
    }
}
