//! Trade record value types.

use crate::domain::error::JournalError;
use crate::domain::quality::ExecutionQuality;
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// Trade direction. Journals written by other tools use "buy"/"sell" where
/// this crate says long/short; both spellings parse to the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Long,
    Short,
}

impl FromStr for Direction {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" | "long" => Ok(Direction::Long),
            "sell" | "short" => Ok(Direction::Short),
            other => Err(JournalError::InvalidDirection {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "long"),
            Direction::Short => write!(f, "short"),
        }
    }
}

/// A single journal entry as supplied by the caller. All validation (positive
/// prices, non-zero volume) happens upstream; this type just carries values.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: f64,
    /// Position size in standard lots.
    pub volume: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub entry_time: Option<NaiveDateTime>,
    pub exit_time: Option<NaiveDateTime>,
    pub quality: Option<ExecutionQuality>,
}
