use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{config::MAX_SEATS_PER_BOOKING, models::seat::Seat};

/// Seats picked during one booking session, in the order they were picked.
///
/// Travels with each request instead of living on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatSelection {
    #[serde(default)]
    pub seats: Vec<Seat>,
}

impl SeatSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn contains(&self, seat: &Seat) -> bool {
        self.seats.iter().any(|selected| selected.id == seat.id)
    }

    pub fn seat_numbers(&self) -> Vec<&str> {
        self.seats.iter().map(|seat| seat.seat_number.as_str()).collect()
    }

    pub fn total_price(&self) -> Decimal {
        self.seats.iter().map(|seat| seat.price).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectionReason {
    NotAvailable,
    LimitReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "camelCase")]
pub enum SelectionOutcome {
    Selected,
    Deselected,
    Rejected(RejectionReason),
}

pub struct SeatSelectionService;

impl SeatSelectionService {
    pub fn toggle(selection: &SeatSelection, seat: &Seat) -> (SeatSelection, SelectionOutcome) {
        Self::toggle_seat_selection(selection, seat, MAX_SEATS_PER_BOOKING)
    }

    /// Adds `seat` to the selection, or removes it if already there.
    ///
    /// Unavailable seats and picks beyond `max_seats` leave the selection unchanged.
    pub fn toggle_seat_selection(
        selection: &SeatSelection,
        seat: &Seat,
        max_seats: usize,
    ) -> (SeatSelection, SelectionOutcome) {
        if !seat.is_available {
            return (
                selection.clone(),
                SelectionOutcome::Rejected(RejectionReason::NotAvailable),
            );
        }

        if selection.contains(seat) {
            let seats = selection
                .seats
                .iter()
                .filter(|selected| selected.id != seat.id)
                .cloned()
                .collect();
            return (SeatSelection { seats }, SelectionOutcome::Deselected);
        }

        if selection.len() >= max_seats {
            return (
                selection.clone(),
                SelectionOutcome::Rejected(RejectionReason::LimitReached),
            );
        }

        let mut next = selection.clone();
        next.seats.push(seat.clone());
        (next, SelectionOutcome::Selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(number: &str, available: bool) -> Seat {
        Seat::new(&format!("trip-42-{}", number), number, available, Decimal::from(45))
    }

    #[test]
    fn test_select_then_deselect() {
        let empty = SeatSelection::new();
        let (selected, outcome) = SeatSelectionService::toggle(&empty, &seat("1A", true));
        assert_eq!(outcome, SelectionOutcome::Selected);
        assert_eq!(selected.seat_numbers(), vec!["1A"]);

        let (cleared, outcome) = SeatSelectionService::toggle(&selected, &seat("1A", true));
        assert_eq!(outcome, SelectionOutcome::Deselected);
        assert!(cleared.is_empty());
        // The input selection is never modified.
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_unavailable_seat_rejected() {
        let (selection, outcome) =
            SeatSelectionService::toggle(&SeatSelection::new(), &seat("3C", false));
        assert_eq!(outcome, SelectionOutcome::Rejected(RejectionReason::NotAvailable));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_fifth_seat_hits_limit() {
        let mut selection = SeatSelection::new();
        let mut outcomes = Vec::new();
        for number in ["1A", "1B", "1C", "1D", "2A"] {
            let (next, outcome) = SeatSelectionService::toggle(&selection, &seat(number, true));
            selection = next;
            outcomes.push(outcome);
        }

        assert_eq!(selection.len(), 4);
        assert_eq!(selection.seat_numbers(), vec!["1A", "1B", "1C", "1D"]);
        assert_eq!(outcomes[4], SelectionOutcome::Rejected(RejectionReason::LimitReached));
        assert_eq!(selection.total_price(), Decimal::from(180));
    }

    #[test]
    fn test_deselect_allowed_at_limit() {
        let mut selection = SeatSelection::new();
        for number in ["1A", "1B"] {
            selection = SeatSelectionService::toggle_seat_selection(&selection, &seat(number, true), 2).0;
        }

        let (next, outcome) =
            SeatSelectionService::toggle_seat_selection(&selection, &seat("1B", true), 2);
        assert_eq!(outcome, SelectionOutcome::Deselected);
        assert_eq!(next.seat_numbers(), vec!["1A"]);
    }
}
