//! Documents as they are stored in MongoDB.
//!
//! Older writers used several spellings for the same field (`durationMinutes`,
//! `estimatedDurationMinutes`, `durationHours`, ...). The raw types accept all of them
//! and the `From` conversions produce the canonical [`Route`], [`Trip`] and [`Seat`]
//! shapes, so nothing past this module has to guess which field is present.

use bson::{oid::ObjectId, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    route::{Route, RouteStop},
    seat::Seat,
    trip::Trip,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRoute {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, alias = "routeName")]
    pub name: Option<String>,
    #[serde(default, alias = "origin_location_id", alias = "originId")]
    pub origin_location_id: Option<ObjectId>,
    #[serde(default, alias = "destination_location_id", alias = "destinationId")]
    pub destination_location_id: Option<ObjectId>,
    #[serde(default, alias = "base_price")]
    pub base_price: Option<Decimal>,
    #[serde(default, alias = "distance_km", alias = "distance")]
    pub distance_km: Option<f64>,
    #[serde(
        default,
        alias = "duration_minutes",
        alias = "estimatedDurationMinutes",
        alias = "estimated_duration_minutes"
    )]
    pub duration_minutes: Option<u32>,
    #[serde(default, alias = "duration_hours")]
    pub duration_hours: Option<f64>,
    #[serde(default, alias = "estimated_fuel_cost")]
    pub estimated_fuel_cost: Option<Decimal>,
    #[serde(default, alias = "toll_charges")]
    pub toll_charges: Option<Decimal>,
    #[serde(default)]
    pub stops: Vec<RawRouteStop>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRouteStop {
    #[serde(alias = "location_id", alias = "location")]
    pub location_id: ObjectId,
    #[serde(default, alias = "arrival_offset_minutes", alias = "arrivalOffset")]
    pub arrival_offset_minutes: Option<i64>,
    #[serde(default, alias = "departure_offset_minutes", alias = "departureOffset")]
    pub departure_offset_minutes: Option<i64>,
    #[serde(default, alias = "price_from_origin")]
    pub price_from_origin: Option<Decimal>,
    #[serde(default, alias = "stop_order")]
    pub stop_order: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrip {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(alias = "route_id", alias = "route")]
    pub route_id: ObjectId,
    #[serde(default, alias = "vehicle_type")]
    pub vehicle_type: Option<String>,
    #[serde(alias = "departure_datetime")]
    pub departure_datetime: DateTime,
    #[serde(
        default,
        alias = "arrival_datetime",
        alias = "estimatedArrivalDatetime",
        alias = "estimated_arrival_datetime"
    )]
    pub arrival_datetime: Option<DateTime>,
    #[serde(default, alias = "total_seats", alias = "capacity")]
    pub total_seats: Option<u32>,
    #[serde(default, alias = "available_seats")]
    pub available_seats: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSeat {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(alias = "trip_id")]
    pub trip_id: ObjectId,
    #[serde(alias = "seat_number")]
    pub seat_number: String,
    #[serde(default = "default_available", alias = "is_available")]
    pub is_available: bool,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default, alias = "row_number")]
    pub row_number: Option<u32>,
    #[serde(default)]
    pub position: Option<String>,
}

fn default_available() -> bool {
    true
}

fn non_negative_minutes(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

impl From<RawRouteStop> for RouteStop {
    fn from(raw: RawRouteStop) -> Self {
        let arrival = raw.arrival_offset_minutes.unwrap_or(0);
        // A stop without a departure offset is treated as a pass-through.
        let departure = raw.departure_offset_minutes.unwrap_or(arrival);

        RouteStop {
            location_id: raw.location_id.to_hex(),
            arrival_offset_minutes: non_negative_minutes(arrival),
            departure_offset_minutes: non_negative_minutes(departure),
            price_from_origin: raw.price_from_origin.unwrap_or_default(),
            stop_order: raw.stop_order.unwrap_or(0),
        }
    }
}

impl From<RawRoute> for Route {
    fn from(raw: RawRoute) -> Self {
        let duration_minutes = raw.duration_minutes.or_else(|| {
            raw.duration_hours
                .filter(|hours| hours.is_finite() && *hours >= 0.0)
                .map(|hours| (hours * 60.0).round() as u32)
        });

        let mut stops: Vec<RouteStop> = raw.stops.into_iter().map(RouteStop::from).collect();
        stops.sort_by_key(|stop| stop.stop_order);

        Route {
            id: raw.id.map(|id| id.to_hex()),
            name: raw.name,
            origin_location_id: raw.origin_location_id.map(|id| id.to_hex()),
            destination_location_id: raw.destination_location_id.map(|id| id.to_hex()),
            base_price: raw.base_price.unwrap_or_default(),
            distance_km: raw.distance_km.unwrap_or(0.0),
            duration_minutes,
            estimated_fuel_cost: raw.estimated_fuel_cost.unwrap_or_default(),
            toll_charges: raw.toll_charges.unwrap_or_default(),
            stops,
        }
    }
}

impl From<RawTrip> for Trip {
    fn from(raw: RawTrip) -> Self {
        let total_seats = raw.total_seats.unwrap_or(0);
        let available_seats = raw.available_seats.unwrap_or(total_seats).min(total_seats);

        Trip {
            id: raw.id.map(|id| id.to_hex()).unwrap_or_default(),
            route_id: raw.route_id.to_hex(),
            vehicle_type: raw.vehicle_type,
            departure_datetime: raw.departure_datetime.to_chrono(),
            arrival_datetime: raw.arrival_datetime.map(|dt| dt.to_chrono()),
            total_seats,
            available_seats,
        }
    }
}

impl From<RawSeat> for Seat {
    fn from(raw: RawSeat) -> Self {
        let id = match raw.id {
            Some(id) => id.to_hex(),
            None => format!("{}-{}", raw.trip_id.to_hex(), raw.seat_number),
        };

        Seat {
            id,
            seat_number: raw.seat_number,
            is_available: raw.is_available,
            price: raw.price.unwrap_or_default(),
            row_number: raw.row_number,
            position: raw.position,
        }
    }
}
