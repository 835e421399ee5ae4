//! Turns the raw filter form into a [`FilterRequest`].

use crate::error::CollectError;
use crate::types::{BoundingBox, FilterRequest, Separator};
use tracing::warn;

/// Raw text of the filter form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    /// Tribe tags separated by `;` or newlines.
    pub tribes: String,
    /// Player names separated by `;` or newlines.
    pub players: String,
    pub x_min: String,
    pub x_max: String,
    pub y_min: String,
    pub y_max: String,
    pub separator: String,
}

impl FilterForm {
    /// Normalizes the form into a request.
    ///
    /// Name lists are split and trimmed, bound fields are read like a
    /// browser's `parseInt` and fall back to unbounded when empty or
    /// non-numeric. Only an unknown separator is rejected.
    pub fn collect(&self) -> Result<FilterRequest, CollectError> {
        let separator = if self.separator.trim().is_empty() {
            Separator::default()
        } else {
            self.separator.parse().map_err(CollectError::Separator)?
        };

        Ok(FilterRequest {
            tribe_names: parse_list(&self.tribes),
            player_names: parse_list(&self.players),
            bounds: BoundingBox {
                x_min: bound_field("x_min", &self.x_min),
                x_max: bound_field("x_max", &self.x_max),
                y_min: bound_field("y_min", &self.y_min),
                y_max: bound_field("y_max", &self.y_max),
            },
            separator,
        })
    }
}

/// Splits a name list on `;` or newlines, trimming and dropping empties.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split([';', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads the leading integer of `input`: optional sign, then digits.
/// Anything after the digits is ignored. Returns `None` when there is
/// no number to read, which callers treat as an unbounded side.
pub fn parse_bound(input: &str) -> Option<i32> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    // Only digits remain, so a parse failure means the value overflowed.
    let magnitude: i64 = rest[..digits_end].parse().unwrap_or(i64::MAX);
    let value = if negative { -magnitude } else { magnitude };
    Some(value.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
}

fn bound_field(field: &str, raw: &str) -> Option<i32> {
    let value = parse_bound(raw);
    if value.is_none() && !raw.trim().is_empty() {
        warn!("Ignoring non-numeric {field} '{}', treating it as unbounded", raw.trim());
    }
    value
}
