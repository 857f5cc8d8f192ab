use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{config::PricingPolicy, models::route::Route};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Price of one seat together with every factor that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub base_price: Decimal,
    pub price: Decimal,
    pub occupancy_rate: Decimal,
    pub days_in_advance: i64,
    pub weekend_factor: Decimal,
    pub holiday_factor: Decimal,
    pub demand_factor: Decimal,
    pub advance_factor: Decimal,
    pub cost_floor: Decimal,
    pub floor_applied: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PricingService {
    pub policy: PricingPolicy,
}

impl PricingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    /// Dynamic seat price for travel on `date`, evaluated against the current clock.
    pub fn calculate_dynamic_price(
        &self,
        route: &Route,
        date: NaiveDate,
        available_seats: u32,
        total_seats: u32,
    ) -> Decimal {
        self.calculate_dynamic_price_at(route, date, available_seats, total_seats, Utc::now())
    }

    pub fn calculate_dynamic_price_at(
        &self,
        route: &Route,
        date: NaiveDate,
        available_seats: u32,
        total_seats: u32,
        now: DateTime<Utc>,
    ) -> Decimal {
        self.quote(route, date, available_seats, total_seats, now).price
    }

    /// Applies weekend, holiday, demand and advance-booking factors in that order,
    /// then lifts the result to the operating-cost floor.
    pub fn quote(
        &self,
        route: &Route,
        date: NaiveDate,
        available_seats: u32,
        total_seats: u32,
        now: DateTime<Utc>,
    ) -> PriceQuote {
        let weekend_factor = if Self::is_weekend(date) {
            self.policy.weekend_surcharge
        } else {
            Decimal::ONE
        };

        let holiday_factor = if Self::is_holiday(date) {
            self.policy.holiday_surcharge
        } else {
            Decimal::ONE
        };

        let occupancy_rate = Self::occupancy_rate(available_seats, total_seats);
        let demand_factor = if total_seats == 0 {
            Decimal::ONE
        } else {
            self.demand_factor(occupancy_rate)
        };

        let days_in_advance = Self::days_in_advance(date, now);
        let advance_factor = self.advance_factor(days_in_advance);

        // Saturating so out-of-range inputs pin to the decimal bounds instead of panicking.
        let adjusted = [weekend_factor, holiday_factor, demand_factor, advance_factor]
            .into_iter()
            .fold(route.base_price, |price, factor| price.saturating_mul(factor));

        let cost_floor = route
            .operating_cost()
            .saturating_mul(self.policy.cost_floor_margin);
        let floor_applied = adjusted < cost_floor;
        let price = adjusted.max(cost_floor).max(Decimal::ZERO);

        PriceQuote {
            base_price: route.base_price,
            price,
            occupancy_rate,
            days_in_advance,
            weekend_factor,
            holiday_factor,
            demand_factor,
            advance_factor,
            cost_floor,
            floor_applied,
        }
    }

    pub fn is_weekend(date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// There is no holiday calendar yet, so no date is a holiday.
    pub fn is_holiday(_date: NaiveDate) -> bool {
        false
    }

    /// Share of seats already sold, in `[0, 1]`. Zero when the trip has no seats.
    pub fn occupancy_rate(available_seats: u32, total_seats: u32) -> Decimal {
        if total_seats == 0 {
            return Decimal::ZERO;
        }
        let available = Decimal::from(available_seats.min(total_seats));
        Decimal::ONE - available / Decimal::from(total_seats)
    }

    /// Whole days from `now` until the start of `date`, rounded up.
    pub fn days_in_advance(date: NaiveDate, now: DateTime<Utc>) -> i64 {
        let travel_start = date.and_time(chrono::NaiveTime::MIN).and_utc();
        let millis = (travel_start - now).num_milliseconds();
        if millis > 0 {
            (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
        } else {
            millis / MILLIS_PER_DAY
        }
    }

    // Thresholds are exclusive: a rate sitting exactly on one stays in the lower band.
    fn demand_factor(&self, occupancy_rate: Decimal) -> Decimal {
        if occupancy_rate > self.policy.high_demand_occupancy {
            self.policy.high_demand_surcharge
        } else if occupancy_rate > self.policy.medium_demand_occupancy {
            self.policy.medium_demand_surcharge
        } else if occupancy_rate < self.policy.low_demand_occupancy {
            self.policy.low_demand_discount
        } else {
            Decimal::ONE
        }
    }

    fn advance_factor(&self, days_in_advance: i64) -> Decimal {
        if days_in_advance > self.policy.early_booking_days {
            self.policy.early_booking_discount
        } else if days_in_advance < self.policy.last_minute_days {
            self.policy.last_minute_surcharge
        } else {
            Decimal::ONE
        }
    }
}
