pub mod chart;
pub mod composition;
pub mod day;
pub mod holding;
pub mod rebalance;
pub mod series;
pub mod settings;
pub mod tooltip;
pub mod viewport;
