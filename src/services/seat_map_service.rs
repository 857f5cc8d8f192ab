use std::{collections::BTreeMap, sync::OnceLock};

use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use xxhash_rust::xxh32::xxh32;

use crate::{
    config::{OCCUPIED_SEAT_STRIDE, SEAT_COLUMNS},
    models::seat::Seat,
};

const TRIP_HASH_SEED: u32 = 0;

/// Where the aisle falls in a row, decided by how many seats the row holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AisleLayout {
    #[serde(rename = "1|2")]
    OneTwo,
    #[serde(rename = "2|2")]
    TwoTwo,
    #[serde(rename = "none")]
    NoAisle,
}

impl AisleLayout {
    pub fn for_cardinality(seats_in_row: usize) -> Self {
        match seats_in_row {
            3 => AisleLayout::OneTwo,
            4 => AisleLayout::TwoTwo,
            _ => AisleLayout::NoAisle,
        }
    }

    /// Number of seats before the aisle break, if the row has one.
    pub fn aisle_after(&self) -> Option<usize> {
        match self {
            AisleLayout::OneTwo => Some(1),
            AisleLayout::TwoTwo => Some(2),
            AisleLayout::NoAisle => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "seat", rename_all = "camelCase")]
pub enum RowSlot {
    Seat(Seat),
    Aisle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatRow {
    pub row_number: u32,
    pub aisle: AisleLayout,
    pub slots: Vec<RowSlot>,
}

impl SeatRow {
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.slots.iter().filter_map(|slot| match slot {
            RowSlot::Seat(seat) => Some(seat),
            RowSlot::Aisle => None,
        })
    }

    pub fn cardinality(&self) -> usize {
        self.seats().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    UnparsableSeatNumber,
    DuplicatePosition,
}

/// A seat left out of the layout because its position could not be placed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedMalformedSeat {
    pub seat_id: String,
    pub seat_number: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatLayout {
    pub rows: Vec<SeatRow>,
    pub skipped: Vec<SkippedMalformedSeat>,
}

impl SeatLayout {
    pub fn seat_count(&self) -> usize {
        self.rows.iter().map(SeatRow::cardinality).sum()
    }
}

fn seat_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^\s*(\d+)\s*([A-D])\s*$").expect("seat number pattern"))
}

fn column_index(letter: char) -> Option<usize> {
    let upper = letter.to_ascii_uppercase();
    SEAT_COLUMNS.iter().position(|column| *column == upper)
}

pub struct SeatMapService;

impl SeatMapService {
    /// Splits a seat number such as `12C` into its row and column index.
    pub fn parse_seat_number(seat_number: &str) -> Option<(u32, usize)> {
        let captures = seat_number_pattern().captures(seat_number)?;
        let row = captures.get(1)?.as_str().parse().ok()?;
        let letter = captures.get(2)?.as_str().chars().next()?;
        Some((row, column_index(letter)?))
    }

    /// Row and column of a seat. Explicit fields take precedence over the seat number.
    pub fn seat_position(seat: &Seat) -> Option<(u32, usize)> {
        let parsed = Self::parse_seat_number(&seat.seat_number);

        let row = seat.row_number.or(parsed.map(|(row, _)| row))?;
        let column = match &seat.position {
            Some(position) => {
                let mut chars = position.trim().chars();
                match (chars.next(), chars.next()) {
                    (Some(letter), None) => column_index(letter)?,
                    _ => return None,
                }
            }
            None => parsed.map(|(_, column)| column)?,
        };

        if row == 0 {
            return None;
        }
        Some((row, column))
    }

    /// Groups seats into rows ordered by row number, columns A to D, with an aisle
    /// slot inserted according to each row's own seat count.
    pub fn build_seat_layout(seats: &[Seat]) -> SeatLayout {
        let mut grid: BTreeMap<u32, [Option<Seat>; 4]> = BTreeMap::new();
        let mut skipped = Vec::new();

        for seat in seats {
            let Some((row, column)) = Self::seat_position(seat) else {
                log::debug!("Skipping seat {} with malformed number {:?}", seat.id, seat.seat_number);
                skipped.push(SkippedMalformedSeat {
                    seat_id: seat.id.clone(),
                    seat_number: seat.seat_number.clone(),
                    reason: SkipReason::UnparsableSeatNumber,
                });
                continue;
            };

            let slot = &mut grid.entry(row).or_default()[column];
            if slot.is_some() {
                log::debug!("Skipping seat {} duplicating position {}", seat.id, seat.seat_number);
                skipped.push(SkippedMalformedSeat {
                    seat_id: seat.id.clone(),
                    seat_number: seat.seat_number.clone(),
                    reason: SkipReason::DuplicatePosition,
                });
                continue;
            }
            *slot = Some(seat.clone());
        }

        let rows = grid
            .into_iter()
            .map(|(row_number, columns)| {
                let row_seats: Vec<Seat> = columns.into_iter().flatten().collect();
                let aisle = AisleLayout::for_cardinality(row_seats.len());

                let mut slots = Vec::with_capacity(row_seats.len() + 1);
                for (index, seat) in row_seats.into_iter().enumerate() {
                    if aisle.aisle_after() == Some(index) {
                        slots.push(RowSlot::Aisle);
                    }
                    slots.push(RowSlot::Seat(seat));
                }

                SeatRow {
                    row_number,
                    aisle,
                    slots,
                }
            })
            .collect();

        SeatLayout { rows, skipped }
    }

    /// Stand-in seat inventory for a trip whose seats could not be loaded.
    ///
    /// The same trip id, capacity and availability always mark the same seats as taken.
    pub fn synthesize_seats(
        trip_id: &str,
        capacity: u32,
        base_price: Decimal,
        available_seats: u32,
    ) -> Vec<Seat> {
        let capacity = capacity as usize;
        if capacity == 0 {
            return Vec::new();
        }

        let occupied_count = capacity - (available_seats as usize).min(capacity);
        let mut occupied = vec![false; capacity];
        let mut index = xxh32(trip_id.as_bytes(), TRIP_HASH_SEED) as usize % capacity;

        for _ in 0..occupied_count {
            while occupied[index] {
                index = (index + 1) % capacity;
            }
            occupied[index] = true;
            index = (index + OCCUPIED_SEAT_STRIDE) % capacity;
        }

        let columns = SEAT_COLUMNS.len();
        (0..capacity)
            .map(|index| {
                let row = (index / columns) as u32 + 1;
                let letter = SEAT_COLUMNS[index % columns];
                let seat_number = format!("{}{}", row, letter);

                Seat {
                    id: format!("{}-{}", trip_id, seat_number),
                    seat_number,
                    is_available: !occupied[index],
                    price: base_price,
                    row_number: Some(row),
                    position: Some(letter.to_string()),
                }
            })
            .collect()
    }
}
