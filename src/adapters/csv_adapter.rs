//! CSV journal file adapter.
//!
//! Expected header: `symbol,direction,entry_price,exit_price,volume,
//! stop_loss,take_profit,entry_time,exit_time,entry_quality,exit_quality`.
//! The first five columns are required; the rest may be blank or absent.
//! Timestamps are `YYYY-MM-DDTHH:MM` with optional seconds, matching what
//! the journal front ends export.

use crate::domain::error::JournalError;
use crate::domain::quality::ExecutionQuality;
use crate::domain::trade::{Direction, TradeRecord};
use crate::ports::journal_port::JournalPort;
use chrono::NaiveDateTime;
use std::fs;
use std::path::PathBuf;

const COL_SYMBOL: usize = 0;
const COL_DIRECTION: usize = 1;
const COL_ENTRY_PRICE: usize = 2;
const COL_EXIT_PRICE: usize = 3;
const COL_VOLUME: usize = 4;
const COL_STOP_LOSS: usize = 5;
const COL_TAKE_PROFIT: usize = 6;
const COL_ENTRY_TIME: usize = 7;
const COL_EXIT_TIME: usize = 8;
const COL_ENTRY_QUALITY: usize = 9;
const COL_EXIT_QUALITY: usize = 10;

pub struct CsvJournal {
    path: PathBuf,
}

impl CsvJournal {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl JournalPort for CsvJournal {
    fn load_trades(&self) -> Result<Vec<TradeRecord>, JournalError> {
        let content = fs::read_to_string(&self.path).map_err(|e| JournalError::Journal {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut trades = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| JournalError::Journal {
                reason: format!("CSV parse error: {}", e),
            })?;
            // Header is row 0; data rows are reported 1-based.
            let line = row + 2;

            let symbol = required_field(&record, COL_SYMBOL, "symbol", line)?.to_string();
            let direction: Direction = required_field(&record, COL_DIRECTION, "direction", line)?
                .parse()?;
            let entry_price = parse_price(&record, COL_ENTRY_PRICE, "entry_price", line)?;
            let exit_price = parse_price(&record, COL_EXIT_PRICE, "exit_price", line)?;
            let volume = parse_price(&record, COL_VOLUME, "volume", line)?;

            let stop_loss = parse_optional_price(&record, COL_STOP_LOSS, "stop_loss", line)?;
            let take_profit = parse_optional_price(&record, COL_TAKE_PROFIT, "take_profit", line)?;
            let entry_time = parse_optional_time(&record, COL_ENTRY_TIME, "entry_time", line)?;
            let exit_time = parse_optional_time(&record, COL_EXIT_TIME, "exit_time", line)?;

            let entry_quality =
                parse_optional_quality(&record, COL_ENTRY_QUALITY, "entry_quality", line)?;
            let exit_quality =
                parse_optional_quality(&record, COL_EXIT_QUALITY, "exit_quality", line)?;
            let quality = match (entry_quality, exit_quality) {
                (Some(entry), Some(exit)) => Some(ExecutionQuality {
                    entry_quality: entry,
                    exit_quality: exit,
                }),
                _ => None,
            };

            trades.push(TradeRecord {
                symbol,
                direction,
                entry_price,
                exit_price,
                volume,
                stop_loss,
                take_profit,
                entry_time,
                exit_time,
                quality,
            });
        }

        Ok(trades)
    }
}

fn required_field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    name: &str,
    line: usize,
) -> Result<&'a str, JournalError> {
    let value = record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| JournalError::Journal {
            reason: format!("line {line}: missing {name} column"),
        })?;
    if value.is_empty() {
        return Err(JournalError::Journal {
            reason: format!("line {line}: empty {name} column"),
        });
    }
    Ok(value)
}

fn optional_field<'a>(record: &'a csv::StringRecord, index: usize) -> Option<&'a str> {
    record
        .get(index)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_price(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    line: usize,
) -> Result<f64, JournalError> {
    required_field(record, index, name, line)?
        .parse()
        .map_err(|e| JournalError::Journal {
            reason: format!("line {line}: invalid {name} value: {e}"),
        })
}

fn parse_optional_price(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    line: usize,
) -> Result<Option<f64>, JournalError> {
    optional_field(record, index)
        .map(|value| {
            value.parse().map_err(|e| JournalError::Journal {
                reason: format!("line {line}: invalid {name} value: {e}"),
            })
        })
        .transpose()
}

fn parse_optional_time(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    line: usize,
) -> Result<Option<NaiveDateTime>, JournalError> {
    optional_field(record, index)
        .map(|value| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
                .map_err(|e| JournalError::Journal {
                    reason: format!("line {line}: invalid {name} value: {e}"),
                })
        })
        .transpose()
}

fn parse_optional_quality(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    line: usize,
) -> Result<Option<u8>, JournalError> {
    let Some(value) = optional_field(record, index) else {
        return Ok(None);
    };
    let rating: u8 = value.parse().map_err(|e| JournalError::Journal {
        reason: format!("line {line}: invalid {name} value: {e}"),
    })?;
    if !(1..=5).contains(&rating) {
        return Err(JournalError::InvalidQuality { value: rating });
    }
    Ok(Some(rating))
}
