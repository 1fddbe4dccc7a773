//! City input parsing.
//!
//! The drivers feed the engine a whitespace/tab-delimited text stream
//! of `id x y` records, one city per line. Parsing failures are fatal
//! at setup: [`load_cities`] surfaces [`AcoError::MalformedInput`]
//! before any position reaches the graph.

use crate::error::AcoError;
use std::io::BufRead;

/// One parsed city record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityRecord {
    /// City identifier in `0..num_cities`.
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

/// Parses all city records from a reader.
///
/// Blank lines are skipped. A record with missing fields or
/// non-numeric values fails the whole load, naming the offending line.
pub fn load_cities<R: BufRead>(reader: R) -> Result<Vec<CityRecord>, AcoError> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        records.push(parse_record(trimmed, index + 1)?);
    }
    Ok(records)
}

fn parse_record(line: &str, line_number: usize) -> Result<CityRecord, AcoError> {
    let malformed = |reason: &str| AcoError::MalformedInput {
        line: line_number,
        reason: reason.to_string(),
    };
    let mut fields = line.split_whitespace();
    let id = fields
        .next()
        .ok_or_else(|| malformed("missing city id"))?
        .parse::<usize>()
        .map_err(|_| malformed("city id is not a non-negative integer"))?;
    let x = fields
        .next()
        .ok_or_else(|| malformed("missing x coordinate"))?
        .parse::<f64>()
        .map_err(|_| malformed("x coordinate is not a number"))?;
    let y = fields
        .next()
        .ok_or_else(|| malformed("missing y coordinate"))?
        .parse::<f64>()
        .map_err(|_| malformed("y coordinate is not a number"))?;
    Ok(CityRecord { id, x, y })
}
