use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::{
    config::DEFAULT_ROUTE_DURATION_MINUTES,
    models::{route::Route, trip::Trip},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStop {
    pub location_id: String,
    pub stop_order: u32,
    pub arrival: DateTime<Utc>,
    pub departure: DateTime<Utc>,
    pub dwell_minutes: u32,
}

/// Where the destination arrival time came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DestinationSource {
    Explicit,
    FromLastStop,
    FromRouteDuration,
    DefaultDuration,
}

/// Inconsistent route or trip data that was corrected rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DataIntegrityWarning {
    #[serde(rename_all = "camelCase")]
    NegativeDwell { location_id: String, dwell_minutes: i64 },
    #[serde(rename_all = "camelCase")]
    DurationShorterThanStops { remaining_minutes: i64 },
    #[serde(rename_all = "camelCase")]
    ArrivalBeforeDeparture { arrival: DateTime<Utc> },
    #[serde(rename_all = "camelCase")]
    ArrivalBeforeLastStop {
        arrival: DateTime<Utc>,
        last_stop_departure: DateTime<Utc>,
    },
    MissingDuration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopSchedule {
    pub origin_departure: DateTime<Utc>,
    pub stops: Vec<ResolvedStop>,
    pub destination_arrival: DateTime<Utc>,
    pub destination_source: DestinationSource,
    pub warnings: Vec<DataIntegrityWarning>,
}

impl StopSchedule {
    pub fn total_travel_minutes(&self) -> i64 {
        (self.destination_arrival - self.origin_departure).num_minutes()
    }

    pub fn total_dwell_minutes(&self) -> u32 {
        self.stops.iter().map(|stop| stop.dwell_minutes).sum()
    }
}

pub struct TimingService;

impl TimingService {
    pub fn resolve_for_trip(route: &Route, trip: &Trip) -> StopSchedule {
        Self::resolve_stop_times(route, trip.departure_datetime, trip.arrival_datetime)
    }

    /// Turns the route's minute offsets into timestamps anchored at `departure`.
    ///
    /// The destination arrival is, in order of preference: the explicit arrival,
    /// the last stop's departure plus the rest of the route duration, or the
    /// departure plus the full route duration.
    pub fn resolve_stop_times(
        route: &Route,
        departure: DateTime<Utc>,
        explicit_arrival: Option<DateTime<Utc>>,
    ) -> StopSchedule {
        let mut warnings = Vec::new();

        let stops: Vec<ResolvedStop> = route
            .stops
            .iter()
            .map(|stop| {
                let arrival = departure + minutes(stop.arrival_offset_minutes as i64);
                let dwell = stop.dwell_minutes();
                let dwell_minutes = if dwell < 0 {
                    log::warn!(
                        "Stop {} departs {} minutes before it arrives, clamping dwell to 0",
                        stop.location_id,
                        -dwell
                    );
                    warnings.push(DataIntegrityWarning::NegativeDwell {
                        location_id: stop.location_id.clone(),
                        dwell_minutes: dwell,
                    });
                    0
                } else {
                    dwell as u32
                };

                ResolvedStop {
                    location_id: stop.location_id.clone(),
                    stop_order: stop.stop_order,
                    arrival,
                    departure: arrival + minutes(dwell_minutes as i64),
                    dwell_minutes,
                }
            })
            .collect();

        // An explicit arrival that lands before the vehicle could get there is ignored
        // and the arrival is computed from the route instead.
        let last_departure = stops.last().map(|stop| stop.departure);
        let explicit_arrival = explicit_arrival.filter(|arrival| {
            if *arrival < departure {
                log::warn!(
                    "Explicit arrival {} precedes departure {}, ignoring it",
                    arrival,
                    departure
                );
                warnings.push(DataIntegrityWarning::ArrivalBeforeDeparture { arrival: *arrival });
                return false;
            }
            match last_departure {
                Some(last_stop_departure) if *arrival < last_stop_departure => {
                    log::warn!(
                        "Explicit arrival {} precedes last stop departure {}, ignoring it",
                        arrival,
                        last_stop_departure
                    );
                    warnings.push(DataIntegrityWarning::ArrivalBeforeLastStop {
                        arrival: *arrival,
                        last_stop_departure,
                    });
                    false
                }
                _ => true,
            }
        });

        let (destination_arrival, destination_source) = match explicit_arrival {
            Some(arrival) => (arrival, DestinationSource::Explicit),
            None => {
                let (duration, from_route) = match route.duration_minutes {
                    Some(duration) => (duration, true),
                    None => {
                        log::warn!(
                            "Route {} has no duration, assuming {} minutes",
                            route.id.as_deref().unwrap_or("<unsaved>"),
                            DEFAULT_ROUTE_DURATION_MINUTES
                        );
                        warnings.push(DataIntegrityWarning::MissingDuration);
                        (DEFAULT_ROUTE_DURATION_MINUTES, false)
                    }
                };

                match (route.last_stop(), stops.last()) {
                    (Some(last), Some(resolved_last)) => {
                        let remaining = duration as i64 - last.departure_offset_minutes as i64;
                        let remaining = if remaining < 0 {
                            log::warn!(
                                "Route duration ends {} minutes before the last stop departs",
                                -remaining
                            );
                            warnings.push(DataIntegrityWarning::DurationShorterThanStops {
                                remaining_minutes: remaining,
                            });
                            0
                        } else {
                            remaining
                        };
                        let source = if from_route {
                            DestinationSource::FromLastStop
                        } else {
                            DestinationSource::DefaultDuration
                        };
                        (resolved_last.departure + minutes(remaining), source)
                    }
                    _ => {
                        let source = if from_route {
                            DestinationSource::FromRouteDuration
                        } else {
                            DestinationSource::DefaultDuration
                        };
                        (departure + minutes(duration as i64), source)
                    }
                }
            }
        };

        StopSchedule {
            origin_departure: departure,
            stops,
            destination_arrival,
            destination_source,
            warnings,
        }
    }
}

fn minutes(value: i64) -> Duration {
    Duration::minutes(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::route::RouteStop;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn departure() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 24, 7, 0, 0).unwrap()
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 24, hour, minute, 0).unwrap()
    }

    fn route_with_stops(duration: Option<u32>, stops: Vec<RouteStop>) -> Route {
        let mut route = Route::new(Decimal::from(45));
        route.duration_minutes = duration;
        route.stops = stops;
        route
    }

    #[test]
    fn test_no_stops_uses_route_duration() {
        let route = route_with_stops(Some(300), vec![]);
        let schedule = TimingService::resolve_stop_times(&route, departure(), None);

        assert_eq!(schedule.origin_departure, departure());
        assert!(schedule.stops.is_empty());
        assert_eq!(schedule.destination_arrival, at(12, 0));
        assert_eq!(schedule.destination_source, DestinationSource::FromRouteDuration);
        assert!(schedule.warnings.is_empty());
    }

    #[test]
    fn test_intermediate_stops_and_remaining_duration() {
        let route = route_with_stops(
            Some(300),
            vec![
                RouteStop::new("kandy", 90, 105),
                RouteStop::new("dambulla", 180, 190),
            ],
        );
        let schedule = TimingService::resolve_stop_times(&route, departure(), None);

        assert_eq!(schedule.stops[0].arrival, at(8, 30));
        assert_eq!(schedule.stops[0].departure, at(8, 45));
        assert_eq!(schedule.stops[0].dwell_minutes, 15);
        assert_eq!(schedule.stops[1].location_id, "dambulla");
        assert_eq!(schedule.stops[1].departure, at(10, 10));
        // 300 - 190 = 110 minutes after leaving the last stop.
        assert_eq!(schedule.destination_arrival, at(12, 0));
        assert_eq!(schedule.destination_source, DestinationSource::FromLastStop);
        assert_eq!(schedule.total_dwell_minutes(), 25);
        assert_eq!(schedule.total_travel_minutes(), 300);
    }

    #[test]
    fn test_explicit_arrival_wins() {
        let route = route_with_stops(Some(300), vec![RouteStop::new("kandy", 90, 105)]);
        let schedule = TimingService::resolve_stop_times(&route, departure(), Some(at(13, 15)));

        assert_eq!(schedule.destination_arrival, at(13, 15));
        assert_eq!(schedule.destination_source, DestinationSource::Explicit);
    }

    #[test]
    fn test_missing_duration_falls_back_to_default() {
        let route = route_with_stops(None, vec![]);
        let schedule = TimingService::resolve_stop_times(&route, departure(), None);

        assert_eq!(schedule.destination_arrival, departure() + Duration::minutes(300));
        assert_eq!(schedule.destination_source, DestinationSource::DefaultDuration);
        assert_eq!(schedule.warnings, vec![DataIntegrityWarning::MissingDuration]);
    }

    #[test]
    fn test_negative_dwell_is_clamped() {
        let route = route_with_stops(Some(300), vec![RouteStop::new("kandy", 100, 80)]);
        let schedule = TimingService::resolve_stop_times(&route, departure(), None);

        let stop = &schedule.stops[0];
        assert_eq!(stop.dwell_minutes, 0);
        assert_eq!(stop.arrival, stop.departure);
        assert!(matches!(
            schedule.warnings[0],
            DataIntegrityWarning::NegativeDwell { dwell_minutes: -20, .. }
        ));
    }

    #[test]
    fn test_short_duration_never_arrives_before_last_stop() {
        let route = route_with_stops(Some(120), vec![RouteStop::new("kandy", 150, 160)]);
        let schedule = TimingService::resolve_stop_times(&route, departure(), None);

        assert_eq!(schedule.destination_arrival, schedule.stops[0].departure);
        assert!(matches!(
            schedule.warnings[0],
            DataIntegrityWarning::DurationShorterThanStops { remaining_minutes: -40 }
        ));
    }

    #[test]
    fn test_arrival_before_departure_is_ignored() {
        let route = route_with_stops(Some(60), vec![]);
        let schedule = TimingService::resolve_stop_times(&route, departure(), Some(at(6, 0)));

        assert_eq!(schedule.destination_arrival, at(8, 0));
        assert_eq!(schedule.destination_source, DestinationSource::FromRouteDuration);
        assert_eq!(schedule.warnings.len(), 1);
    }

    #[test]
    fn test_arrival_before_last_stop_is_ignored() {
        let route = route_with_stops(Some(300), vec![RouteStop::new("a", 200, 220)]);
        let schedule = TimingService::resolve_stop_times(&route, departure(), Some(at(8, 0)));

        assert_eq!(schedule.stops[0].departure, at(10, 40));
        // 300 - 220 = 80 minutes after the last stop.
        assert_eq!(schedule.destination_arrival, at(12, 0));
        assert_eq!(schedule.destination_source, DestinationSource::FromLastStop);
        assert_eq!(
            schedule.warnings,
            vec![DataIntegrityWarning::ArrivalBeforeLastStop {
                arrival: at(8, 0),
                last_stop_departure: at(10, 40),
            }]
        );
    }

    #[test]
    fn test_timestamps_are_monotonic() {
        let route = route_with_stops(
            Some(400),
            vec![
                RouteStop::new("a", 30, 30),
                RouteStop::new("b", 75, 90),
                RouteStop::new("c", 200, 215),
                RouteStop::new("d", 330, 335),
            ],
        );
        let schedule = TimingService::resolve_stop_times(&route, departure(), None);

        let mut previous = schedule.origin_departure;
        for stop in &schedule.stops {
            assert!(stop.arrival >= previous);
            assert!(stop.departure >= stop.arrival);
            previous = stop.departure;
        }
        assert!(schedule.destination_arrival >= previous);
    }

    #[test]
    fn test_resolve_for_trip_uses_trip_times() {
        let route = route_with_stops(Some(300), vec![]);
        let trip = Trip {
            id: "trip-42".to_string(),
            route_id: "route-1".to_string(),
            vehicle_type: None,
            departure_datetime: departure(),
            arrival_datetime: Some(at(11, 30)),
            total_seats: 45,
            available_seats: 30,
        };

        let schedule = TimingService::resolve_for_trip(&route, &trip);
        assert_eq!(schedule.destination_arrival, at(11, 30));
        // The route itself is untouched.
        assert_eq!(route.duration_minutes, Some(300));
    }
}
