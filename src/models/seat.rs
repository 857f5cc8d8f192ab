use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: String,
    /// Row number followed by a column letter, e.g. `12C`.
    pub seat_number: String,
    pub is_available: bool,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl Seat {
    pub fn new(id: &str, seat_number: &str, is_available: bool, price: Decimal) -> Self {
        Self {
            id: id.to_string(),
            seat_number: seat_number.to_string(),
            is_available,
            price,
            row_number: None,
            position: None,
        }
    }
}
