use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::{
    config::MAX_SEATS_PER_BOOKING,
    models::seat::Seat,
    services::{
        seat_map_service::SeatMapService,
        seat_selection_service::{SeatSelection, SeatSelectionService, SelectionOutcome},
    },
};

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    pub seats: Vec<Seat>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRequest {
    #[serde(default)]
    pub selection: SeatSelection,
    pub seat: Seat,
    pub max_seats: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SelectResponse {
    pub selection: SeatSelection,
    pub outcome: SelectionOutcome,
}

/*
    /api/seats/layout
*/
pub async fn layout(input: web::Json<LayoutRequest>) -> impl Responder {
    HttpResponse::Ok().json(SeatMapService::build_seat_layout(&input.seats))
}

/*
    /api/seats/select
    Rejections are part of the response body, not an error status.
*/
pub async fn select(input: web::Json<SelectRequest>) -> impl Responder {
    let input = input.into_inner();
    let (selection, outcome) = SeatSelectionService::toggle_seat_selection(
        &input.selection,
        &input.seat,
        input.max_seats.unwrap_or(MAX_SEATS_PER_BOOKING),
    );
    HttpResponse::Ok().json(SelectResponse { selection, outcome })
}
