pub mod aggregate;
pub mod bulletin;
pub mod chart;
pub mod config;
pub mod export;
pub mod extract;
pub mod fetch;
