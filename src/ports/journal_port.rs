//! Journal access port trait.

use crate::domain::error::JournalError;
use crate::domain::trade::TradeRecord;

/// Where trade records come from. Persistence is an external collaborator;
/// the engine only ever sees fully-constructed records.
pub trait JournalPort {
    fn load_trades(&self) -> Result<Vec<TradeRecord>, JournalError>;
}
