use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use drt_routing::{
    error::{RouteError, UnavailableError},
    route::RouteResult,
    route_service::RouteService,
    schedule_time::ScheduleTime,
    stop::{StopRequest, StopType},
};
use jiff::SignedDuration;

pub const TWO_ROUTES_RESPONSE: &str = include_str!("../fixtures/osrm_two_routes.json");
pub const NO_ROUTE_RESPONSE: &str = include_str!("../fixtures/osrm_no_route.json");
pub const SINGLE_LEG_RESPONSE: &str = include_str!("../fixtures/osrm_single_leg.json");
pub const OVERFLOWING_LEG_RESPONSE: &str = include_str!("../fixtures/osrm_overflowing_leg.json");

pub enum ScriptedResponse {
    Body(&'static str),
    ConnectionRefused,
}

/// Answers every route request with the same scripted response.
pub struct ScriptedRouteService {
    response: ScriptedResponse,
    calls: AtomicUsize,
    requested_points: Mutex<Vec<[f64; 2]>>,
}

impl ScriptedRouteService {
    pub fn new(response: ScriptedResponse) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            requested_points: Mutex::new(vec![]),
        }
    }

    pub fn responding(body: &'static str) -> Self {
        Self::new(ScriptedResponse::Body(body))
    }

    pub fn unavailable() -> Self {
        Self::new(ScriptedResponse::ConnectionRefused)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested_points(&self) -> Vec<[f64; 2]> {
        self.requested_points.lock().unwrap().clone()
    }
}

impl RouteService for &ScriptedRouteService {
    async fn fetch_route(&self, points: &[geo_types::Point]) -> Result<String, RouteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.requested_points.lock().unwrap() =
            points.iter().map(|point| [point.x(), point.y()]).collect();

        match self.response {
            ScriptedResponse::Body(body) => Ok(body.to_string()),
            ScriptedResponse::ConnectionRefused => Err(UnavailableError::Api {
                status: 503,
                message: "Service Unavailable".to_string(),
            }
            .into()),
        }
    }
}

pub fn create_stop(
    id: &str,
    name: &str,
    latitude: f64,
    longitude: f64,
    stop_type: StopType,
    reservation_id: Option<&str>,
) -> StopRequest {
    StopRequest {
        stop_id: id.to_string(),
        stop_name: name.to_string(),
        latitude,
        longitude,
        stop_type,
        reservation_id: reservation_id.map(str::to_string),
    }
}

pub fn fukutomi_stops() -> Vec<StopRequest> {
    vec![
        create_stop(
            "40cbac8c-0208-4bba-bbba-afdf188cad9b",
            "福富支所前",
            34.5365,
            132.7776,
            StopType::Pickup,
            Some("res-001"),
        ),
        create_stop(
            "7ad877f4-db1b-4bb1-9990-663dbc2da013",
            "下之谷",
            34.5341,
            132.7532,
            StopType::Pickup,
            Some("res-002"),
        ),
        create_stop(
            "36834a25-5c63-42ba-97d9-ba43f9c6887c",
            "道の駅前",
            34.5330,
            132.7750,
            StopType::Dropoff,
            Some("res-001"),
        ),
    ]
}

pub fn start_time() -> ScheduleTime {
    "2026-02-05T08:00:00+09:00".parse().unwrap()
}

/// Checks ordering, dwell time and monotonic schedule on any route result.
pub fn assert_schedule_invariants(result: &RouteResult, stops: &[StopRequest], dwell: SignedDuration) {
    assert_eq!(result.stops.len(), stops.len());

    for (index, (route_stop, stop)) in result.stops.iter().zip(stops).enumerate() {
        assert_eq!(route_stop.order, index + 1);
        assert_eq!(&route_stop.stop, stop);
        assert_eq!(
            route_stop
                .scheduled_departure
                .duration_since(&route_stop.scheduled_arrival),
            dwell
        );
    }

    for pair in result.stops.windows(2) {
        assert!(pair[0].scheduled_departure.timestamp() <= pair[1].scheduled_arrival.timestamp());
    }
}
