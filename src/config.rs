use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::AppError;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATABASE: &str = "Transit";

// Pricing factors, expressed as (mantissa, scale) so they stay exact decimals.
pub const WEEKEND_SURCHARGE: (i64, u32) = (115, 2);
/// Only applied when the holiday calendar says so, which it currently never does.
pub const HOLIDAY_SURCHARGE: (i64, u32) = (125, 2);
pub const HIGH_DEMAND_SURCHARGE: (i64, u32) = (120, 2);
pub const MEDIUM_DEMAND_SURCHARGE: (i64, u32) = (110, 2);
pub const LOW_DEMAND_DISCOUNT: (i64, u32) = (90, 2);
pub const EARLY_BOOKING_DISCOUNT: (i64, u32) = (85, 2);
pub const LAST_MINUTE_SURCHARGE: (i64, u32) = (130, 2);
/// Markup over fuel and tolls below which a seat is never sold.
pub const COST_FLOOR_MARGIN: (i64, u32) = (125, 2);

pub const HIGH_DEMAND_OCCUPANCY: (i64, u32) = (8, 1);
pub const MEDIUM_DEMAND_OCCUPANCY: (i64, u32) = (6, 1);
pub const LOW_DEMAND_OCCUPANCY: (i64, u32) = (3, 1);
pub const EARLY_BOOKING_DAYS: i64 = 14;
pub const LAST_MINUTE_DAYS: i64 = 2;

/// Seats one customer may hold in a single booking.
pub const MAX_SEATS_PER_BOOKING: usize = 4;
/// Step through seat indices when marking synthesized seats as occupied.
pub const OCCUPIED_SEAT_STRIDE: usize = 7;
pub const SEAT_COLUMNS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Used when a route has no recorded duration.
pub const DEFAULT_ROUTE_DURATION_MINUTES: u32 = 300;

fn factor((mantissa, scale): (i64, u32)) -> Decimal {
    Decimal::new(mantissa, scale)
}

/// Every multiplier and threshold the pricing engine applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    pub weekend_surcharge: Decimal,
    pub holiday_surcharge: Decimal,
    pub high_demand_surcharge: Decimal,
    pub medium_demand_surcharge: Decimal,
    pub low_demand_discount: Decimal,
    pub early_booking_discount: Decimal,
    pub last_minute_surcharge: Decimal,
    pub cost_floor_margin: Decimal,
    pub high_demand_occupancy: Decimal,
    pub medium_demand_occupancy: Decimal,
    pub low_demand_occupancy: Decimal,
    pub early_booking_days: i64,
    pub last_minute_days: i64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            weekend_surcharge: factor(WEEKEND_SURCHARGE),
            holiday_surcharge: factor(HOLIDAY_SURCHARGE),
            high_demand_surcharge: factor(HIGH_DEMAND_SURCHARGE),
            medium_demand_surcharge: factor(MEDIUM_DEMAND_SURCHARGE),
            low_demand_discount: factor(LOW_DEMAND_DISCOUNT),
            early_booking_discount: factor(EARLY_BOOKING_DISCOUNT),
            last_minute_surcharge: factor(LAST_MINUTE_SURCHARGE),
            cost_floor_margin: factor(COST_FLOOR_MARGIN),
            high_demand_occupancy: factor(HIGH_DEMAND_OCCUPANCY),
            medium_demand_occupancy: factor(MEDIUM_DEMAND_OCCUPANCY),
            low_demand_occupancy: factor(LOW_DEMAND_OCCUPANCY),
            early_booking_days: EARLY_BOOKING_DAYS,
            last_minute_days: LAST_MINUTE_DAYS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub database: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
        let port = match std::env::var("PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| AppError::Configuration(format!("PORT is not a valid port: {}", value)))?,
            Err(_) => PORT,
        };
        let mongo_uri = std::env::var("MONGODB_URI")
            .map_err(|_| AppError::Configuration("MONGODB_URI must be set".to_string()))?;
        let database = std::env::var("MONGODB_DATABASE").unwrap_or_else(|_| DATABASE.to_string());

        Ok(Self {
            host,
            port,
            mongo_uri,
            database,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_matches_constants() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.weekend_surcharge.to_string(), "1.15");
        assert_eq!(policy.low_demand_discount.to_string(), "0.90");
        assert_eq!(policy.cost_floor_margin.to_string(), "1.25");
        assert_eq!(policy.high_demand_occupancy.to_string(), "0.8");
        assert_eq!(policy.early_booking_days, 14);
    }
}
