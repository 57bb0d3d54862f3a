use anyhow::Context;
use medaether_core::channels::{BotChannel, IncomingMessage, Keyboard};
use medaether_core::config::AppConfig;
use medaether_core::consultation::ConsultationOrchestrator;
use medaether_core::gateway::{init_db, PersistenceGateway, SqliteGateway};
use medaether_core::{providers, telemetry};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

const CONSOLE_CHAT_ID: i64 = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env().context("loading configuration")?;
    telemetry::init_tracing("medaether", &config.log_level, config.log_format)?;

    let pool = init_db(&config.database_url).await.context("opening database")?;
    let gateway: Arc<dyn PersistenceGateway> = Arc::new(SqliteGateway::new(pool));

    let orchestrator = Arc::new(ConsultationOrchestrator::new(
        providers::select_advice_provider(&config),
        providers::build_translation_adapter(&config),
        config.advice.timeout,
    ));
    let bot = BotChannel::new(gateway, orchestrator);

    info!(
        ai = config.ai_configured(),
        translation = config.translation_configured(),
        "MedAether console ready, type /start"
    );

    let first_name = std::env::var("USER").ok();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let message = IncomingMessage {
            chat_id: CONSOLE_CHAT_ID,
            first_name: first_name.clone(),
            text: line,
        };

        match bot.handle(message).await {
            Ok(reply) => {
                println!("{}\n", reply.text);
                if let Some(keyboard) = reply.keyboard {
                    print_keyboard(keyboard);
                }
            }
            Err(e) => error!(error = %e, "Failed to handle message"),
        }
    }

    info!("Input closed, shutting down");
    Ok(())
}

fn print_keyboard(keyboard: Keyboard) {
    for row in keyboard.rows() {
        println!("[ {} ]", row.join(" | "));
    }
    println!();
}
