#![allow(dead_code)]

use actix_web::{web, App};
use serde_json::{json, Value};
use std::sync::Arc;

use transit_booking_api::{db::mongo::create_mongo_client, routes, services::trip_service::TripService};

pub const TEST_DATABASE: &str = "TransitTest";

pub struct TestApp {
    pub client: Arc<mongodb::Client>,
}

impl TestApp {
    pub async fn new() -> Self {
        let mongo_uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = create_mongo_client(&mongo_uri)
            .await
            .expect("MongoDB client");

        Self { client }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(TripService::new(self.client.clone(), TEST_DATABASE)))
            .service(
                web::scope("/api")
                    .configure(routes::configure_calculations)
                    .configure(routes::configure_trips),
            )
    }

    pub async fn cleanup(&self) {
        let _ = self.client.database(TEST_DATABASE).drop().await;
    }
}

/// App with only the endpoints that need no database.
pub fn calculation_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().service(web::scope("/api").configure(routes::configure_calculations))
}

pub fn test_route(base_price: f64) -> Value {
    json!({
        "basePrice": base_price,
        "durationMinutes": 300,
        "estimatedFuelCost": 0,
        "tollCharges": 0,
        "stops": []
    })
}

pub fn test_seat(seat_number: &str, available: bool) -> Value {
    json!({
        "id": format!("trip-42-{}", seat_number),
        "seatNumber": seat_number,
        "isAvailable": available,
        "price": 45.0
    })
}
