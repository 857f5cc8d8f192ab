use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Canonical route as consumed by the pricing and timing services.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub origin_location_id: Option<String>,
    #[serde(default)]
    pub destination_location_id: Option<String>,
    pub base_price: Decimal,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub estimated_fuel_cost: Decimal,
    #[serde(default)]
    pub toll_charges: Decimal,
    #[serde(default)]
    pub stops: Vec<RouteStop>,
}

/// Intermediate stop, timed in minutes from the trip's departure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub location_id: String,
    pub arrival_offset_minutes: u32,
    pub departure_offset_minutes: u32,
    #[serde(default)]
    pub price_from_origin: Decimal,
    #[serde(default)]
    pub stop_order: u32,
}

impl Route {
    pub fn new(base_price: Decimal) -> Self {
        Self {
            id: None,
            name: None,
            origin_location_id: None,
            destination_location_id: None,
            base_price,
            distance_km: 0.0,
            duration_minutes: None,
            estimated_fuel_cost: Decimal::ZERO,
            toll_charges: Decimal::ZERO,
            stops: Vec::new(),
        }
    }

    /// Sum of the operating costs that bound the sale price from below.
    pub fn operating_cost(&self) -> Decimal {
        self.estimated_fuel_cost.saturating_add(self.toll_charges)
    }

    pub fn last_stop(&self) -> Option<&RouteStop> {
        self.stops.last()
    }
}

impl RouteStop {
    pub fn new(location_id: &str, arrival_offset_minutes: u32, departure_offset_minutes: u32) -> Self {
        Self {
            location_id: location_id.to_string(),
            arrival_offset_minutes,
            departure_offset_minutes,
            price_from_origin: Decimal::ZERO,
            stop_order: 0,
        }
    }

    /// Minutes spent at the stop. Negative when the offsets are inverted.
    pub fn dwell_minutes(&self) -> i64 {
        self.departure_offset_minutes as i64 - self.arrival_offset_minutes as i64
    }
}
