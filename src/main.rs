use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;

use travel_booking_api::config::AppConfig;
use travel_booking_api::payments::Payments;
use travel_booking_api::{configure, db};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger and environment
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("Configuration error: {e}");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("Connecting to database...");
    let pool = db::get_db_pool(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;

    log::info!("Running migrations...");
    db::run_migrations(&pool)
        .await
        .map_err(std::io::Error::other)?;

    let pool_data = web::Data::new(pool);
    let auth_data = web::Data::new(config.auth.clone());
    let payments_data = web::Data::new(Payments::from_config(&config.payments));

    let address = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", address.0, address.1);

    HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .app_data(auth_data.clone())
            .app_data(payments_data.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(address)?
    .run()
    .await
}
