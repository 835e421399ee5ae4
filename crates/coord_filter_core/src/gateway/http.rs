//! Gateway that downloads the world tables from a game world server.

use super::WorldDataGateway;
use crate::codec;
use crate::error::{GatewayError, WorldTable};
use crate::types::{PlayerRecord, TribeRecord, VillageRecord};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// Fetches `/map/village.txt`, `/map/player.txt` and `/map/ally.txt` from a
/// world base URL such as `https://en140.tribalwars.net`.
#[derive(Debug, Clone)]
pub struct HttpWorldGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpWorldGateway {
    /// Creates a gateway for `base_url`. A `timeout` of `None` waits forever.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("coord-filter/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Config(format!("http client init failed: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Full URL of a table on this world.
    pub fn table_url(&self, table: WorldTable) -> String {
        format!("{}/map/{}", self.base_url, table.file_name())
    }

    async fn download(&self, table: WorldTable) -> Result<String, GatewayError> {
        let url = self.table_url(table);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| GatewayError::Transport { table, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                table,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| GatewayError::Transport { table, source })?;
        info!("📥 Downloaded {} ({} bytes)", table, body.len());
        Ok(body)
    }
}

#[async_trait]
impl WorldDataGateway for HttpWorldGateway {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    async fn villages(&self) -> Result<Vec<VillageRecord>, GatewayError> {
        codec::parse_villages(&self.download(WorldTable::Villages).await?)
    }

    async fn players(&self) -> Result<Vec<PlayerRecord>, GatewayError> {
        codec::parse_players(&self.download(WorldTable::Players).await?)
    }

    async fn tribes(&self) -> Result<Vec<TribeRecord>, GatewayError> {
        codec::parse_tribes(&self.download(WorldTable::Tribes).await?)
    }
}
