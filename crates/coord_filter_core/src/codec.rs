//! Parser for the comma-separated world data tables published by the game.
//!
//! Every table is one record per line with no header. Text columns are
//! form-URL-encoded, so a literal comma never appears inside a field.

use crate::error::{GatewayError, WorldTable};
use crate::types::{PlayerRecord, TribeRecord, VillageRecord};
use percent_encoding::percent_decode_str;
use std::str::FromStr;

/// Parses `village.txt`: `id,name,x,y,player_id,points[,rank]`.
pub fn parse_villages(text: &str) -> Result<Vec<VillageRecord>, GatewayError> {
    rows(text, WorldTable::Villages, 5)
        .map(|row| -> Result<VillageRecord, GatewayError> {
            let row = row?;
            Ok(VillageRecord {
                id: row.number(0)?,
                name: row.text(1),
                x: row.number(2)?,
                y: row.number(3)?,
                owner: row.number(4)?,
                points: row.optional_number(5)?,
                rank: row.optional_number(6)?,
            })
        })
        .collect()
}

/// Parses `player.txt`: `id,name,tribe_id,villages,points[,rank]`.
pub fn parse_players(text: &str) -> Result<Vec<PlayerRecord>, GatewayError> {
    rows(text, WorldTable::Players, 3)
        .map(|row| -> Result<PlayerRecord, GatewayError> {
            let row = row?;
            Ok(PlayerRecord {
                id: row.number(0)?,
                name: row.text(1),
                tribe: row.number(2)?,
                villages: row.optional_number(3)?,
                points: row.optional_number(4)?,
                rank: row.optional_number(5)?,
            })
        })
        .collect()
}

/// Parses `ally.txt`: `id,name,tag,members,villages,points,all_points[,rank]`.
pub fn parse_tribes(text: &str) -> Result<Vec<TribeRecord>, GatewayError> {
    rows(text, WorldTable::Tribes, 3)
        .map(|row| -> Result<TribeRecord, GatewayError> {
            let row = row?;
            Ok(TribeRecord {
                id: row.number(0)?,
                name: row.text(1),
                tag: row.text(2),
                members: row.optional_number(3)?,
                villages: row.optional_number(4)?,
                points: row.optional_number(5)?,
                all_points: row.optional_number(6)?,
                rank: row.optional_number(7)?,
            })
        })
        .collect()
}

/// Decodes a form-URL-encoded name (`+` is a space, `%XX` an escaped byte).
pub fn decode_name(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

struct Row<'a> {
    table: WorldTable,
    line: usize,
    fields: Vec<&'a str>,
}

impl Row<'_> {
    fn malformed(&self, reason: String) -> GatewayError {
        GatewayError::Malformed {
            table: self.table,
            line: self.line,
            reason,
        }
    }

    fn text(&self, index: usize) -> String {
        decode_name(self.fields[index])
    }

    fn number<T: FromStr>(&self, index: usize) -> Result<T, GatewayError> {
        let raw = self.fields[index].trim();
        raw.parse()
            .map_err(|_| self.malformed(format!("column {} is not a number: '{raw}'", index + 1)))
    }

    fn optional_number<T: FromStr + Default>(&self, index: usize) -> Result<T, GatewayError> {
        match self.fields.get(index) {
            Some(raw) if !raw.trim().is_empty() => self.number(index),
            _ => Ok(T::default()),
        }
    }
}

fn rows(
    text: &str,
    table: WorldTable,
    required: usize,
) -> impl Iterator<Item = Result<Row<'_>, GatewayError>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(move |(index, line)| {
            let fields: Vec<&str> = line.trim_end_matches('\r').split(',').collect();
            if fields.len() < required {
                return Err(GatewayError::Malformed {
                    table,
                    line: index + 1,
                    reason: format!("expected at least {required} columns, found {}", fields.len()),
                });
            }
            Ok(Row {
                table,
                line: index + 1,
                fields,
            })
        })
}
