use std::{io, net};

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::http::header;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::domain::EmailAddress;
use crate::routes::{health_check, home, json_error_handler, send};
use crate::transport::EmailTransport;

/// Largest accepted request body, in bytes
const JSON_PAYLOAD_LIMIT: usize = 64 * 1024;

/// How long browsers may cache a CORS preflight answer, in seconds
const CORS_MAX_AGE: usize = 3600;

/// Inbox receiving every relayed contact submission
pub struct OperatorInbox(pub EmailAddress);

/// Application
pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    /// Build an application based on settings
    pub fn build(config: Settings) -> anyhow::Result<Self> {
        // Build the email transport and resolve the operator inbox
        let transport = EmailTransport::from_settings(&config.email)
            .context("Failed to build the email transport")?;
        let inbox = config
            .email
            .recipient_email()
            .map_err(anyhow::Error::msg)
            .context("Invalid recipient email address")?;
        let allowed_origin = config
            .application
            .allowed_origin()
            .context("Invalid allowed origin")?;

        // Run the HTTP server and return its data
        let listener = net::TcpListener::bind(format!(
            "{}:{}",
            config.application.app_host, config.application.app_port
        ))?;
        let port = listener.local_addr()?.port();
        let server = run_server(listener, transport, inbox, allowed_origin)?;
        Ok(Self { server, port })
    }

    /// Get application port
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Run application until it is stopped
    pub async fn run_until_stopped(self) -> io::Result<()> {
        self.server.await
    }
}

/// Run the HTTP server
pub fn run_server(
    listener: net::TcpListener,
    transport: EmailTransport,
    inbox: EmailAddress,
    allowed_origin: String,
) -> io::Result<Server> {
    // Prepare data to be added the application context
    let transport = web::Data::new(transport);
    let inbox = web::Data::new(OperatorInbox(inbox));

    // Start the HTTP server
    Ok(HttpServer::new(move || {
        // Only the portfolio front-end may call the API from a browser
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .block_on_origin_mismatch(true)
            .allowed_methods(vec!["GET", "POST"])
            .allowed_header(header::CONTENT_TYPE)
            .max_age(CORS_MAX_AGE);

        App::new()
            .wrap(cors)
            .wrap(TracingLogger::default())
            .app_data(
                web::JsonConfig::default()
                    .limit(JSON_PAYLOAD_LIMIT)
                    .error_handler(json_error_handler),
            )
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .route("/send", web::post().to(send))
            .app_data(transport.clone())
            .app_data(inbox.clone())
    })
    .listen(listener)?
    .run())
}
