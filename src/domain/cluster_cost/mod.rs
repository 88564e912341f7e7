pub mod aggregator;
pub mod query_builder;
pub mod query_executor;
pub mod service;
pub mod totals;
