//! Core record and request types shared by the gateway, filter and renderer.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Numeric id of a player as published in the world data.
pub type PlayerId = u32;
/// Numeric id of a tribe as published in the world data.
pub type TribeId = u32;
/// Numeric id of a village as published in the world data.
pub type VillageId = u32;

/// A single row of `village.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VillageRecord {
    pub id: VillageId,
    pub name: String,
    pub x: i32,
    pub y: i32,
    /// Owning player, `0` for unowned (barbarian) villages.
    pub owner: PlayerId,
    pub points: u32,
    pub rank: u32,
}

impl VillageRecord {
    /// Returns the owning player id, or `None` for an unowned village.
    pub fn owner(&self) -> Option<PlayerId> {
        (self.owner != 0).then_some(self.owner)
    }
}

/// A single row of `player.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    /// Tribe the player belongs to, `0` when tribeless.
    pub tribe: TribeId,
    pub villages: u32,
    pub points: u64,
    pub rank: u32,
}

/// A single row of `ally.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TribeRecord {
    pub id: TribeId,
    pub name: String,
    /// Short tag shown on the map; this is what users type to select a tribe.
    pub tag: String,
    pub members: u32,
    pub villages: u32,
    pub points: u64,
    pub all_points: u64,
    pub rank: u32,
}

/// Character placed between x and y when formatting a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Separator {
    /// `xxx|yyy`, the in-game notation.
    #[default]
    #[serde(rename = "|")]
    Pipe,
    /// `xxx,yyy`
    #[serde(rename = ",")]
    Comma,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Separator::Pipe => '|',
            Separator::Comma => ',',
        }
    }

    /// Formats a coordinate pair with this separator.
    pub fn format(self, x: i32, y: i32) -> String {
        format!("{x}{}{y}", self.as_char())
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Separator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "|" => Ok(Separator::Pipe),
            "," => Ok(Separator::Comma),
            other => Err(format!("unsupported separator '{other}', expected '|' or ','")),
        }
    }
}

/// Inclusive rectangle on the map. `None` on a side means unbounded,
/// so a missing minimum behaves as negative infinity and a missing
/// maximum as positive infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BoundingBox {
    pub x_min: Option<i32>,
    pub x_max: Option<i32>,
    pub y_min: Option<i32>,
    pub y_max: Option<i32>,
}

impl BoundingBox {
    /// A box with every side unbounded.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Returns true when `(x, y)` lies inside the box, edges included.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        within(x, self.x_min, self.x_max) && within(y, self.y_min, self.y_max)
    }
}

fn within(value: i32, min: Option<i32>, max: Option<i32>) -> bool {
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

/// Normalized filter input for one run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterRequest {
    pub tribe_names: Vec<String>,
    pub player_names: Vec<String>,
    pub bounds: BoundingBox,
    pub separator: Separator,
}

impl FilterRequest {
    /// True when neither tribes nor players were requested.
    pub fn has_no_names(&self) -> bool {
        self.tribe_names.is_empty() && self.player_names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_is_inclusive() {
        let bounds = BoundingBox {
            x_min: Some(500),
            x_max: Some(500),
            y_min: Some(500),
            y_max: Some(500),
        };
        assert!(bounds.contains(500, 500));
        assert!(!bounds.contains(501, 500));
        assert!(!bounds.contains(500, 499));
    }

    #[test]
    fn test_unbounded_sides() {
        let bounds = BoundingBox {
            x_min: Some(100),
            ..BoundingBox::unbounded()
        };
        assert!(bounds.contains(i32::MAX, i32::MIN));
        assert!(!bounds.contains(99, 0));
    }

    #[test]
    fn test_separator_parsing() {
        assert_eq!("|".parse::<Separator>().unwrap(), Separator::Pipe);
        assert_eq!(" , ".parse::<Separator>().unwrap(), Separator::Comma);
        assert!(";".parse::<Separator>().is_err());
        assert_eq!(Separator::Comma.format(412, 588), "412,588");
    }

    #[test]
    fn test_unowned_village_has_no_owner() {
        let village = VillageRecord {
            id: 1,
            name: "Barbarian village".to_string(),
            x: 1,
            y: 2,
            owner: 0,
            points: 26,
            rank: 0,
        };
        assert_eq!(village.owner(), None);
    }
}
