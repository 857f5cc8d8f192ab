use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{models::route::Route, services::timing_service::TimingService};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub route: Route,
    pub departure_datetime: DateTime<Utc>,
    #[serde(default, alias = "estimatedArrivalDatetime")]
    pub arrival_datetime: Option<DateTime<Utc>>,
}

/*
    /api/schedule/resolve
*/
pub async fn resolve(input: web::Json<ResolveRequest>) -> impl Responder {
    let input = input.into_inner();
    let schedule = TimingService::resolve_stop_times(
        &input.route,
        input.departure_datetime,
        input.arrival_datetime,
    );
    HttpResponse::Ok().json(schedule)
}
