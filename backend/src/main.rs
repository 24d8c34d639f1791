mod billing;
mod config;
mod error;
mod services;
mod state;
mod store;

use crate::config::Config;
use crate::state::AppState;
use crate::store::RecordStore;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::parse();

    let store = RecordStore::new(&config.data_dir);
    store.init()?;
    info!("data directory: {}", store.data_dir().display());

    let state = AppState::new(store, config.fonts_dir.clone());
    let json_limit = config.json_limit;

    info!("InvoiceBuddy API server running on {}", config.url());

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(services::json_config(json_limit))
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
