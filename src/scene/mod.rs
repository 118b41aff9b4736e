pub mod element;
pub mod metrics;
pub mod store;
