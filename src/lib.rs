//! Support box: portfolio profile and crypto donation widget backend.

pub mod blockchain;
pub mod config;
pub mod donation;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod profile;
pub mod resilience;

pub use config::schema::SupportConfig;
pub use donation::{DonationService, Outcome};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
