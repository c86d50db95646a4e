//! Repository implementations.

pub mod price;

pub use price::PriceRepository;
