//! # pdview-database
//!
//! SQLite connection management and the concrete repository implementation
//! for the price ledger.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
