//! Multi-file scoring driver

pub mod aggregator;

pub use aggregator::{AggregateError, Aggregator, AggregatorConfig};
