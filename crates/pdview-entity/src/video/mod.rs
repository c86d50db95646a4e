//! Video library domain entities.

pub mod model;

pub use model::VideoEntry;
