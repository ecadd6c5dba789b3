//! # Planner Bot Main Entry Point
//!
//! Initializes logging, loads configuration and help texts, sets up the
//! database, and runs the Telegram bot next to the health check server.

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::dispatching::dialogue::InMemStorage;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use planner_bot::bot::conversation::State;
use planner_bot::bot::handlers::BotHandler;
use planner_bot::config::Config;
use planner_bot::database::connection::DatabaseManager;
use planner_bot::services::health::HealthService;
use planner_bot::services::help_texts::HelpTexts;
use planner_bot::utils::logging::log_system_event;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planner_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Planner Bot v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded - Database: {}, HTTP Port: {}",
        config.database_url, config.http_port);

    let help_texts = match HelpTexts::load(&config.help_texts_path) {
        Ok(texts) => {
            info!("Loaded {} help sections from {}", texts.len(), config.help_texts_path);
            texts
        }
        Err(e) => {
            warn!("{:#}; only the global help is available", e);
            HelpTexts::builtin()
        }
    };

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    info!("Running database migrations...");
    db_manager.run_migrations().await?;
    let db_arc = Arc::new(db_manager);
    info!("Database initialized successfully");

    // Initialize bot
    let bot = Bot::new(&config.telegram_bot_token);
    let handler = BotHandler::new(db_arc.as_ref().clone(), Arc::new(help_texts));

    let health_service = HealthService::new(db_arc.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        let storage: Arc<InMemStorage<State>> = InMemStorage::new();
        Dispatcher::builder(bot, handler.schema())
            .dependencies(dptree::deps![storage])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result = bot_task => {
            if let Err(e) = result {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result = health_task => {
            if let Err(e) = result {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    log_system_event("Application stopped", None);
    Ok(())
}
