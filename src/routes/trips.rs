use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::{
    errors::AppResult,
    services::{
        pricing_service::PricingService, seat_map_service::SeatMapService,
        timing_service::TimingService, trip_service::TripService,
    },
};

#[derive(Deserialize)]
pub struct QuoteParams {
    date: Option<NaiveDate>,
}

/*
    /api/trips/{id}/quote?date=YYYY-MM-DD
*/
pub async fn get_quote(
    path: web::Path<String>,
    params: web::Query<QuoteParams>,
    trips: web::Data<TripService>,
    pricing: web::Data<PricingService>,
) -> AppResult<HttpResponse> {
    let (trip, route) = trips.get_trip_with_route(&path.into_inner()).await?;
    let date = params
        .date
        .unwrap_or_else(|| trip.departure_datetime.date_naive());

    let quote = pricing.quote(
        &route,
        date,
        trip.available_seats,
        trip.total_seats,
        Utc::now(),
    );
    Ok(HttpResponse::Ok().json(quote))
}

/*
    /api/trips/{id}/schedule
*/
pub async fn get_schedule(
    path: web::Path<String>,
    trips: web::Data<TripService>,
) -> AppResult<HttpResponse> {
    let (trip, route) = trips.get_trip_with_route(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(TimingService::resolve_for_trip(&route, &trip)))
}

/*
    /api/trips/{id}/seats
*/
pub async fn get_seat_map(
    path: web::Path<String>,
    trips: web::Data<TripService>,
) -> AppResult<HttpResponse> {
    let (trip, route) = trips.get_trip_with_route(&path.into_inner()).await?;
    let seats = trips.load_seats(&trip, &route).await;
    Ok(HttpResponse::Ok().json(SeatMapService::build_seat_layout(&seats)))
}
