pub mod chart_service;
pub mod comparison_service;
pub mod composition_service;
pub mod loader_service;
pub mod rebalance_service;
pub mod tooltip_service;
