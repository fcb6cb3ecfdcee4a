pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod telemetry;

pub use config::ServiceConfig;
pub use generator::Generator;
