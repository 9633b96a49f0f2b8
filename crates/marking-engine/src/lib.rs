pub mod config;
pub mod error;
pub mod marking;
pub mod telemetry;
