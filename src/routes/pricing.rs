use actix_web::{web, HttpResponse, Responder};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::{models::route::Route, services::pricing_service::PricingService};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub route: Route,
    pub travel_date: NaiveDate,
    pub available_seats: u32,
    pub total_seats: u32,
}

/*
    /api/pricing/quote
*/
pub async fn quote(
    pricing: web::Data<PricingService>,
    input: web::Json<QuoteRequest>,
) -> impl Responder {
    let input = input.into_inner();
    let quote = pricing.quote(
        &input.route,
        input.travel_date,
        input.available_seats,
        input.total_seats,
        Utc::now(),
    );
    HttpResponse::Ok().json(quote)
}
