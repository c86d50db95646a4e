//! Price ledger domain entities.

pub mod model;

pub use model::PriceRecord;
