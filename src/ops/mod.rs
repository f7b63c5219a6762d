pub mod filter;
pub mod format;
pub mod members;
pub mod metrics;
