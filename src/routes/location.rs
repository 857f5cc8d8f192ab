use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::{errors::AppResult, services::trip_service::TripService};

#[derive(Deserialize)]
pub struct QueryParams {
    limit: Option<u16>,
    search: Option<String>,
}

/*
    /api/locations?search=&limit=
*/
pub async fn get_locations(
    trips: web::Data<TripService>,
    params: web::Query<QueryParams>,
) -> AppResult<HttpResponse> {
    let locations = trips
        .get_locations(params.search.as_deref(), params.limit)
        .await?;
    Ok(HttpResponse::Ok().json(locations))
}
