//! # Coordinate filter core
//!
//! Reads the village, player and tribe tables of a Tribal Wars world and
//! selects village coordinates by owner and by an inclusive map rectangle.
//!
//! A run has three stages:
//!
//! * [`collector`] normalizes the raw form text into a [`FilterRequest`]
//! * [`gateway`] fetches the three world tables concurrently
//! * [`filter`] resolves names, selects villages and formats coordinates
//!
//! [`render`] then shows the coordinates or the unresolved names.
//!
//! ```no_run
//! use coord_filter_core::{run_filter, DirectoryWorldGateway, FilterForm};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let form = FilterForm {
//!     players: "Bob;Alice".to_string(),
//!     x_min: "400".to_string(),
//!     ..FilterForm::default()
//! };
//! let gateway = DirectoryWorldGateway::new("world_dump");
//! let result = run_filter(&gateway, &form.collect()?).await?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod collector;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod pipeline;
pub mod render;
pub mod types;

pub use collector::{parse_bound, parse_list, FilterForm};
pub use error::{CollectError, GatewayError, UnresolvedNames, WorldTable};
pub use filter::{filter_coordinates, FilterResult};
pub use gateway::{
    fetch_world, DirectoryWorldGateway, HttpWorldGateway, WorldDataGateway, WorldSnapshot,
};
pub use pipeline::run_filter;
pub use render::{render_result, Notifier, Phrases, ResultPanel};
pub use types::{
    BoundingBox, FilterRequest, PlayerId, PlayerRecord, Separator, TribeId, TribeRecord,
    VillageId, VillageRecord,
};
