use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use transit_booking_api::{
    config::AppConfig, db, routes, services::trip_service::TripService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let client = db::mongo::create_mongo_client(&config.mongo_uri)
        .await
        .map_err(std::io::Error::other)?;
    let trips = web::Data::new(TripService::new(client, &config.database));

    log::info!("Starting HTTP server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(trips.clone())
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .configure(routes::configure_calculations)
                    .configure(routes::configure_trips),
            )
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
