mod api;
mod blockchain;
mod config;
mod error;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;

use api::AppState;
use blockchain::Ledger;
use config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    println!(
        "⛓️ Starting ledger node at http://{}:{}",
        config.host, config.port
    );
    info!(
        "node_id={} difficulty={} reward={} mining_threads={}",
        config.node_id,
        config.ledger.difficulty,
        config.ledger.reward,
        config.ledger.mining_threads
    );

    let ledger = Ledger::new(config.ledger.clone());
    let state = web::Data::new(AppState::new(ledger, config.node_id.clone()));

    let server = HttpServer::new({
        let state = state.clone();
        move || {
            App::new()
                .app_data(state.clone())
                .configure(api::init_routes)
        }
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    // Graceful shutdown waits for in-flight requests, so stop mining first.
    actix_web::rt::spawn({
        let state = state.clone();
        async move {
            if actix_web::rt::signal::ctrl_c().await.is_ok() {
                state.ledger.cancel_mining();
            }
        }
    });

    let result = server.await;
    state.ledger.cancel_mining();
    info!("shutdown complete (chain length {})", state.ledger.length());
    result
}
