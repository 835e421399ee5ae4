//! Coordinate filter: names to ids, ids to villages, villages to coordinates.

use crate::error::UnresolvedNames;
use crate::gateway::WorldSnapshot;
use crate::types::{FilterRequest, PlayerId};
use std::collections::HashSet;
use tracing::debug;

/// Either the formatted coordinates or the names that matched nothing.
pub type FilterResult = Result<Vec<String>, UnresolvedNames>;

/// Runs one filter pass over `world`.
///
/// Every requested name must resolve before any village is looked at.
/// When no names are requested at all, owner selection is skipped and
/// only the bounding box applies. Output order follows the village table.
pub fn filter_coordinates(world: &WorldSnapshot, request: &FilterRequest) -> FilterResult {
    let unresolved = UnresolvedNames {
        missing_tribes: request
            .tribe_names
            .iter()
            .filter(|tag| !world.has_tribe(tag))
            .cloned()
            .collect(),
        missing_players: request
            .player_names
            .iter()
            .filter(|name| !world.has_player(name))
            .cloned()
            .collect(),
    };
    if !unresolved.is_empty() {
        return Err(unresolved);
    }

    let owners = if request.has_no_names() {
        None
    } else {
        Some(target_player_ids(world, request))
    };

    let coords: Vec<String> = world
        .villages
        .iter()
        .filter(|v| match &owners {
            Some(ids) => v.owner().is_some_and(|owner| ids.contains(&owner)),
            None => true,
        })
        .filter(|v| request.bounds.contains(v.x, v.y))
        .map(|v| request.separator.format(v.x, v.y))
        .collect();

    debug!("Filter matched {} of {} villages", coords.len(), world.villages.len());
    Ok(coords)
}

/// Union of directly named players and members of the named tribes.
pub fn target_player_ids(world: &WorldSnapshot, request: &FilterRequest) -> HashSet<PlayerId> {
    let tribe_ids = world.tribe_ids_by_tag(&request.tribe_names);
    let mut ids = world.player_ids_by_name(&request.player_names);
    ids.extend(world.tribe_members(&tribe_ids));
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::tests::{player, tribe, village};
    use crate::types::{BoundingBox, Separator};

    fn world() -> WorldSnapshot {
        WorldSnapshot {
            villages: vec![
                village(1, 500, 500, 1),
                village(2, 501, 500, 1),
                village(3, 420, 611, 2),
                village(4, 300, 300, 0),
                village(5, 450, 450, 3),
            ],
            players: vec![player(1, "Bob", 7), player(2, "Alice", 7), player(3, "Eve", 0)],
            tribes: vec![tribe(7, "NW")],
        }
    }

    fn request(tribes: &[&str], players: &[&str]) -> FilterRequest {
        FilterRequest {
            tribe_names: tribes.iter().map(|s| s.to_string()).collect(),
            player_names: players.iter().map(|s| s.to_string()).collect(),
            bounds: BoundingBox::unbounded(),
            separator: Separator::Pipe,
        }
    }

    #[test]
    fn test_single_player_example() {
        let world = WorldSnapshot {
            villages: vec![village(1, 500, 500, 1)],
            players: vec![player(1, "Bob", 0)],
            tribes: vec![],
        };
        assert_eq!(
            filter_coordinates(&world, &request(&[], &["Bob"])),
            Ok(vec!["500|500".to_string()])
        );
    }

    #[test]
    fn test_no_names_and_no_bounds_is_identity() {
        let mut req = request(&[], &[]);
        req.separator = Separator::Comma;
        let coords = filter_coordinates(&world(), &req).unwrap();
        assert_eq!(
            coords,
            vec!["500,500", "501,500", "420,611", "300,300", "450,450"]
        );
    }

    #[test]
    fn test_unresolved_names_short_circuit() {
        let result = filter_coordinates(&world(), &request(&["NW", "Ghosts"], &["Bob", "Ghost"]));
        assert_eq!(
            result,
            Err(UnresolvedNames {
                missing_tribes: vec!["Ghosts".to_string()],
                missing_players: vec!["Ghost".to_string()],
            })
        );

        let result = filter_coordinates(&world(), &request(&[], &["Ghost"]));
        let err = result.unwrap_err();
        assert!(err.missing_tribes.is_empty());
        assert_eq!(err.missing_players, vec!["Ghost"]);
    }

    #[test]
    fn test_names_resolve_case_insensitively() {
        let upper = filter_coordinates(&world(), &request(&["nw"], &["ALICE"])).unwrap();
        let lower = filter_coordinates(&world(), &request(&["NW"], &["alice"])).unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper, vec!["500|500", "501|500", "420|611"]);
    }

    #[test]
    fn test_player_named_directly_and_through_tribe_appears_once() {
        let coords = filter_coordinates(&world(), &request(&["NW"], &["Bob", "bob"])).unwrap();
        assert_eq!(coords, vec!["500|500", "501|500", "420|611"]);
    }

    #[test]
    fn test_unowned_villages_never_selected_by_name() {
        let coords = filter_coordinates(&world(), &request(&[], &["Eve"])).unwrap();
        assert_eq!(coords, vec!["450|450"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut req = request(&[], &["Bob"]);
        req.bounds = BoundingBox {
            x_min: Some(500),
            x_max: Some(500),
            y_min: Some(500),
            y_max: Some(500),
        };
        assert_eq!(filter_coordinates(&world(), &req).unwrap(), vec!["500|500"]);
    }

    #[test]
    fn test_membership_matches_owner_and_box() {
        let world = world();
        let mut req = request(&["NW"], &[]);
        req.bounds = BoundingBox {
            x_min: Some(400),
            x_max: Some(500),
            ..BoundingBox::unbounded()
        };

        let ids = target_player_ids(&world, &req);
        let expected: Vec<String> = world
            .villages
            .iter()
            .filter(|v| ids.contains(&v.owner) && req.bounds.contains(v.x, v.y))
            .map(|v| format!("{}|{}", v.x, v.y))
            .collect();

        assert_eq!(filter_coordinates(&world, &req).unwrap(), expected);
        assert_eq!(expected, vec!["500|500", "420|611"]);
    }

    #[test]
    fn test_empty_result_is_ok() {
        let mut req = request(&[], &["Bob"]);
        req.bounds.y_min = Some(900);
        assert_eq!(filter_coordinates(&world(), &req), Ok(vec![]));
    }
}
