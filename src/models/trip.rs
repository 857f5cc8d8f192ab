use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub route_id: String,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    pub departure_datetime: DateTime<Utc>,
    /// Explicit destination arrival, when the schedule publishes one.
    #[serde(default)]
    pub arrival_datetime: Option<DateTime<Utc>>,
    pub total_seats: u32,
    pub available_seats: u32,
}

impl Trip {
    pub fn booked_seats(&self) -> u32 {
        self.total_seats.saturating_sub(self.available_seats)
    }
}
