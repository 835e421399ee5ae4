//! One filter run: fetch the world, then filter it.

use crate::error::GatewayError;
use crate::filter::{filter_coordinates, FilterResult};
use crate::gateway::{fetch_world, WorldDataGateway};
use crate::types::FilterRequest;
use tracing::info;

/// Fetches the world through `gateway` and filters it with `request`.
///
/// A failed fetch is returned as the outer error and nothing is filtered.
pub async fn run_filter<G>(gateway: &G, request: &FilterRequest) -> Result<FilterResult, GatewayError>
where
    G: WorldDataGateway + ?Sized,
{
    let world = fetch_world(gateway).await?;
    let result = filter_coordinates(&world, request);
    match &result {
        Ok(coords) => info!("🎯 {} coordinates matched", coords.len()),
        Err(unresolved) => info!("❓ {unresolved}"),
    }
    Ok(result)
}
