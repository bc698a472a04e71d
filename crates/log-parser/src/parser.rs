//! Datalog CSV Parser

use crate::channels::{find_channel, ChannelRole};
use crate::error::ParseError;
use crate::table::ColumnTable;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

/// Parser configuration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Fail when no time channel is recognized (strict callers)
    pub require_time_channel: bool,
}

/// Parser for comma-delimited datalog exports
///
/// Lines beginning with `#` are comment/metadata lines; the first remaining
/// line is the header row. Rows with a mismatched field count are dropped,
/// unparseable fields become NaN. No quoting or escaping is supported.
#[derive(Debug, Clone, Default)]
pub struct LogParser {
    config: ParserConfig,
}

impl LogParser {
    /// Create a parser with the given config
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse raw log text into a column table
    pub fn parse(&self, text: &str) -> Result<ColumnTable, ParseError> {
        self.parse_with_progress(text, |_| {})
    }

    /// Parse raw log text, reporting percent complete per data row
    pub fn parse_with_progress<F>(
        &self,
        text: &str,
        mut on_progress: F,
    ) -> Result<ColumnTable, ParseError>
    where
        F: FnMut(u8),
    {
        let mut metadata = Vec::new();
        let mut lines = Vec::new();

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(rest) = line.strip_prefix('#') {
                if let Some(pair) = split_metadata(rest) {
                    metadata.push(pair);
                }
                continue;
            }
            lines.push(line);
        }

        if lines.len() < 2 {
            return Err(ParseError::TooFewLines);
        }

        let headers: Vec<String> = lines[0].split(',').map(|h| h.trim().to_string()).collect();
        let width = headers.len();
        let total_rows = lines.len() - 1;

        let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(total_rows); width];
        let mut dropped = 0usize;

        for (row, line) in lines[1..].iter().enumerate() {
            let mut fields = line.split(',');
            // Splitting is lazy, so count and store in one pass per column
            let mut filled = 0usize;
            for column in columns.iter_mut() {
                match fields.next() {
                    Some(field) => {
                        column.push(parse_field(field));
                        filled += 1;
                    }
                    None => break,
                }
            }
            if filled != width || fields.next().is_some() {
                // Field count mismatch: roll back and drop the row
                for column in columns.iter_mut().take(filled) {
                    column.pop();
                }
                dropped += 1;
            }
            on_progress((((row + 1) * 100) / total_rows) as u8);
        }

        if dropped > 0 {
            debug!("dropped {} rows with mismatched field count", dropped);
        }

        let time_index = find_channel(&headers, ChannelRole::Time);
        if self.config.require_time_channel && time_index.is_none() {
            return Err(ParseError::MissingTimeChannel);
        }

        Ok(ColumnTable {
            headers,
            columns,
            time_index,
            metadata,
        })
    }
}

/// Convert one field to f64, NaN when blank or unparseable
///
/// Thousands separators are stripped before parsing. An empty field must
/// become NaN, never zero.
fn parse_field(field: &str) -> f64 {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    let cleaned: Cow<'_, str> = if trimmed.contains(',') {
        Cow::Owned(trimmed.replace(',', ""))
    } else {
        Cow::Borrowed(trimmed)
    };
    cleaned.parse::<f64>().unwrap_or(f64::NAN)
}

/// Split a `#` line into a key/value metadata pair, if it has one
fn split_metadata(rest: &str) -> Option<(String, String)> {
    let sep = rest.find([':', '='])?;
    let key = rest[..sep].trim();
    let value = rest[sep + 1..].trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}
