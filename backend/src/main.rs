mod config;
mod db;
mod error;
mod report;
mod services;

use std::fs;
use std::io;

use actix_files::Files;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;

use crate::config::AppConfig;
use crate::db::Database;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let db = Database::new(&config.database);
    db.bootstrap().map_err(|e| io::Error::other(format!("database bootstrap failed: {e}")))?;
    fs::create_dir_all(&config.media_dir)?;

    info!("Database ready at {}", db.path().display());
    info!("Templates from {}, media in {}", config.template_dir.display(), config.media_dir.display());
    info!("Server running at http://{}:{}", config.host, config.port);

    let bind = (config.host.clone(), config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(db.clone()))
            .service(services::bast::configure_routes())
            .service(services::checklist::configure_routes())
            .service(services::stations::configure_routes())
            .service(services::personnel::configure_routes())
            .service(Files::new("/media", config.media_dir.clone()))
    })
    .bind(bind)?
    .run()
    .await
}
