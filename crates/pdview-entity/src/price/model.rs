//! Price record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One entry in the append-only price ledger.
///
/// Records are immutable once appended; the ledger never updates or
/// deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PriceRecord {
    /// Monotonically increasing identifier, assigned on append.
    pub id: i64,
    /// Etanol price in local currency. Always strictly positive.
    pub etanol: f64,
    /// Gasolina price in local currency. Always strictly positive.
    pub gasolina: f64,
    /// When the record was appended. Assigned by the ledger, never by
    /// the client.
    pub timestamp: DateTime<Utc>,
}
