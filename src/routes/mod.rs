use actix_web::web;

use crate::services::pricing_service::PricingService;

pub mod health;
pub mod location;
pub mod pricing;
pub mod schedule;
pub mod seats;
pub mod trips;

/// Calculation endpoints. They only need the request body.
pub fn configure_calculations(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::Data::new(PricingService::new()))
        .route("/pricing/quote", web::post().to(pricing::quote))
        .route("/schedule/resolve", web::post().to(schedule::resolve))
        .route("/seats/layout", web::post().to(seats::layout))
        .route("/seats/select", web::post().to(seats::select));
}

/// Endpoints backed by stored trips. Expects `web::Data<TripService>` on the app.
pub fn configure_trips(cfg: &mut web::ServiceConfig) {
    cfg.route("/locations", web::get().to(location::get_locations))
        .service(
            web::scope("/trips/{id}")
                .route("/quote", web::get().to(trips::get_quote))
                .route("/schedule", web::get().to(trips::get_schedule))
                .route("/seats", web::get().to(trips::get_seat_map)),
        );
}
