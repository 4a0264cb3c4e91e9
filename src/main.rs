use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use std::sync::Arc;

mod api;
mod auth;
mod config;
mod db;
mod delivery;
mod docs;
mod error;
mod letter;
mod model;
mod models;
mod qr;
mod reports;
mod routes;
mod store;
mod utils;
mod workflow;

use config::Config;
use db::init_db;

use crate::delivery::{
    Dispatcher, LogMailer, LogSender, Mailer, MessageSender, SmtpMailer, TwilioSmsSender,
};
use crate::docs::ApiDoc;
use crate::qr::SvgQrEncoder;
use crate::utils::identity_cache;
use crate::utils::identity_filter;
use crate::workflow::LeaveWorkflow;
use tracing::{error, info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url).await?;

    let pool_for_filter_warmup = pool.clone();
    let pool_for_cache_warmup = pool.clone();

    actix_web::rt::spawn(async move {
        if let Err(e) = identity_filter::warmup_identity_filter(&pool_for_filter_warmup, 100).await
        {
            error!(error = ?e, "Failed to warmup identity filter");
        }
    });

    actix_web::rt::spawn(async move {
        // Warm up last 30 days of registrations in batches of 250
        if let Err(e) =
            identity_cache::warmup_identity_cache(&pool_for_cache_warmup, 30, 250).await
        {
            error!(error = ?e, "Failed to warmup identity cache");
        }
    });

    let sender: Arc<dyn MessageSender> = match config.twilio.clone() {
        Some(options) => Arc::new(TwilioSmsSender::new(options)),
        None => {
            warn!("TWILIO_* not set, parent SMS will only be logged");
            Arc::new(LogSender)
        }
    };

    let mailer: Arc<dyn Mailer> = match config.smtp.clone() {
        Some(options) => Arc::new(SmtpMailer::new(options)?),
        None => {
            warn!("EMAIL_ADDRESS/EMAIL_PASSWORD not set, contact mail will only be logged");
            Arc::new(LogMailer)
        }
    };
    let mailer = Data::from(mailer);

    let workflow = Data::new(LeaveWorkflow::new(pool.clone(), Arc::new(SvgQrEncoder)));
    let dispatcher = Data::new(Dispatcher::new(pool.clone(), sender));

    // messages left queued by a previous run
    let startup_dispatcher = dispatcher.clone();
    actix_web::rt::spawn(async move {
        startup_dispatcher.flush().await;
    });

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(config.clone()))
            .app_data(workflow.clone())
            .app_data(dispatcher.clone())
            .app_data(mailer.clone())
            // Configure auth + protected routes with rate limiting
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
