use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::FindOptions,
    Client, Collection,
};
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        location::Location,
        raw::{RawRoute, RawSeat, RawTrip},
        route::Route,
        seat::Seat,
        trip::Trip,
    },
    services::seat_map_service::SeatMapService,
};

const ROUTES: &str = "Routes";
const TRIPS: &str = "Trips";
const SEATS: &str = "Seats";
const LOCATIONS: &str = "Locations";

/// Reads routes, trips and seats and hands back their canonical shapes.
pub struct TripService {
    client: Arc<Client>,
    database: String,
}

impl TripService {
    pub fn new(client: Arc<Client>, database: &str) -> Self {
        Self {
            client,
            database: database.to_string(),
        }
    }

    fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.client.database(&self.database).collection(name)
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    pub fn parse_id(id: &str) -> AppResult<ObjectId> {
        ObjectId::parse_str(id).map_err(|_| AppError::BadRequest(format!("Invalid ID: {}", id)))
    }

    pub async fn get_trip(&self, id: &str) -> AppResult<Trip> {
        let id = Self::parse_id(id)?;
        self.collection::<RawTrip>(TRIPS)
            .find_one(doc! { "_id": id })
            .await?
            .map(Trip::from)
            .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))
    }

    pub async fn get_route(&self, id: &str) -> AppResult<Route> {
        let id = Self::parse_id(id)?;
        self.collection::<RawRoute>(ROUTES)
            .find_one(doc! { "_id": id })
            .await?
            .map(Route::from)
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))
    }

    /// A trip together with the route it runs on.
    pub async fn get_trip_with_route(&self, id: &str) -> AppResult<(Trip, Route)> {
        let trip = self.get_trip(id).await?;
        let route = self.get_route(&trip.route_id).await?;
        Ok((trip, route))
    }

    /// Persisted seats for the trip, or a synthesized inventory when none can be read.
    pub async fn load_seats(&self, trip: &Trip, route: &Route) -> Vec<Seat> {
        match self.fetch_seats(trip).await {
            Ok(seats) if !seats.is_empty() => seats,
            Ok(_) => {
                log::info!("No seats stored for trip {}, synthesizing", trip.id);
                self.synthesize(trip, route)
            }
            Err(err) => {
                log::warn!("Failed to load seats for trip {}: {}", trip.id, err);
                self.synthesize(trip, route)
            }
        }
    }

    async fn fetch_seats(&self, trip: &Trip) -> AppResult<Vec<Seat>> {
        let trip_id = Self::parse_id(&trip.id)?;
        let cursor = self
            .collection::<RawSeat>(SEATS)
            .find(doc! { "tripId": trip_id })
            .await?;
        let seats: Vec<RawSeat> = cursor.try_collect().await?;
        Ok(seats.into_iter().map(Seat::from).collect())
    }

    fn synthesize(&self, trip: &Trip, route: &Route) -> Vec<Seat> {
        SeatMapService::synthesize_seats(
            &trip.id,
            trip.total_seats,
            route.base_price,
            trip.available_seats,
        )
    }

    pub async fn get_locations(
        &self,
        search: Option<&str>,
        limit: Option<u16>,
    ) -> AppResult<Vec<Location>> {
        let mut options = FindOptions::default();
        if let Some(limit) = limit {
            options.limit = Some(limit.into());
        }
        let filter = match search {
            Some(search_text) if !search_text.is_empty() => {
                doc! {
                    "name": {
                        "$regex": format!("^{}", regex::escape(search_text)),
                        "$options": "i"
                    }
                }
            }
            _ => doc! {},
        };

        let cursor = self
            .collection::<Location>(LOCATIONS)
            .find(filter)
            .with_options(options)
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
