pub mod api_client;
pub mod configuration;
pub mod domain;
pub mod report;
pub mod suite;
pub mod telemetry;
