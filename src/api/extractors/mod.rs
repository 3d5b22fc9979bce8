//! Custom extractors.

pub mod query;

pub use query::Params;
