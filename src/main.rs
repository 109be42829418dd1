mod config;
mod errors;
mod handlers;
mod models;
mod services;
mod storage;
mod utils;

use std::io;
use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use crate::config::Config;
use crate::services::employee::EmployeeService;
use crate::storage::JsonFileStore;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;

    let store = JsonFileStore::new(config.data_file.clone());
    info!("Employee records stored in {}", store.path().display());
    let service = web::Data::new(EmployeeService::new(Arc::new(store)));

    let (host, port) = config.bind_address();
    info!("Starting server at {}:{}", host, port);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(handlers::configure)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    server.bind((host, port))?.run().await
}
