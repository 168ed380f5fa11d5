pub mod compose;
pub mod configuration;
pub mod domain;
pub mod email_client;
pub mod routes;
pub mod smtp_mailer;
pub mod startup;
pub mod telemetry;
pub mod transport;
pub mod utils;
