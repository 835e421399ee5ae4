//! Gateway over a local directory holding previously downloaded tables.

use super::WorldDataGateway;
use crate::codec;
use crate::error::{GatewayError, WorldTable};
use crate::types::{PlayerRecord, TribeRecord, VillageRecord};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads `village.txt`, `player.txt` and `ally.txt` from a directory.
#[derive(Debug, Clone)]
pub struct DirectoryWorldGateway {
    root: PathBuf,
}

impl DirectoryWorldGateway {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read(&self, table: WorldTable) -> Result<String, GatewayError> {
        tokio::fs::read_to_string(self.root.join(table.file_name()))
            .await
            .map_err(|source| GatewayError::Io { table, source })
    }
}

#[async_trait]
impl WorldDataGateway for DirectoryWorldGateway {
    fn describe(&self) -> String {
        self.root().display().to_string()
    }

    async fn villages(&self) -> Result<Vec<VillageRecord>, GatewayError> {
        codec::parse_villages(&self.read(WorldTable::Villages).await?)
    }

    async fn players(&self) -> Result<Vec<PlayerRecord>, GatewayError> {
        codec::parse_players(&self.read(WorldTable::Players).await?)
    }

    async fn tribes(&self) -> Result<Vec<TribeRecord>, GatewayError> {
        codec::parse_tribes(&self.read(WorldTable::Tribes).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::fetch_world;
    use tempfile::TempDir;

    #[test]
    fn test_describe_names_root() {
        let gateway = DirectoryWorldGateway::new("dumps/en140");
        assert_eq!(gateway.root(), Path::new("dumps/en140"));
        assert_eq!(gateway.describe(), Path::new("dumps/en140").display().to_string());
    }

    #[tokio::test]
    async fn test_missing_table_fails_whole_fetch() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(dir.path().join("village.txt"), "1,A,500,500,7\n")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("player.txt"), "7,Bob,0\n")
            .await
            .unwrap();

        let gateway = DirectoryWorldGateway::new(dir.path());
        let err = fetch_world(&gateway).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Io {
                table: WorldTable::Tribes,
                ..
            }
        ));
    }
}
