pub mod config;
pub mod driver;
pub mod report;
pub mod telemetry;
