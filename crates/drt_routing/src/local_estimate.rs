use jiff::SignedDuration;
use tracing::debug;

use crate::{
    error::RouteError,
    route::{Leg, RouteGeometry, RouteResult, RouteSource},
    schedule::{DEFAULT_DWELL, build_schedule},
    schedule_time::ScheduleTime,
    stop::StopRequest,
    units::{Kmh, Meters},
};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 30.0;

#[derive(Debug, Clone, Copy)]
pub struct LocalEstimateParams {
    pub average_speed: Kmh,
    pub dwell: SignedDuration,
}

impl Default for LocalEstimateParams {
    fn default() -> Self {
        Self {
            average_speed: Kmh::new(DEFAULT_AVERAGE_SPEED_KMH),
            dwell: DEFAULT_DWELL,
        }
    }
}

/// Great-circle distance on a spherical Earth.
pub fn haversine_distance<P>(from: P, to: P) -> Meters
where
    P: Into<geo_types::Point>,
{
    let (from, to): (geo_types::Point, geo_types::Point) = (from.into(), to.into());
    let (from_lat, to_lat) = (from.y().to_radians(), to.y().to_radians());

    let half_dlat = (to_lat - from_lat) / 2.0;
    let half_dlon = (to.x() - from.x()).to_radians() / 2.0;

    let h = half_dlat.sin().powi(2) + from_lat.cos() * to_lat.cos() * half_dlon.sin().powi(2);
    let central_angle = 2.0 * h.sqrt().min(1.0).asin();

    Meters::new(EARTH_RADIUS_METERS * central_angle)
}

/// Estimates the route without a routing engine.
///
/// Stops are joined by straight segments driven at a constant speed, so the
/// geometry passes through every stop exactly.
pub fn compute_local_estimate(
    stops: &[StopRequest],
    start_time: ScheduleTime,
    params: &LocalEstimateParams,
) -> Result<RouteResult, RouteError> {
    let (legs, leg_durations): (Vec<Leg>, Vec<SignedDuration>) = stops
        .windows(2)
        .map(|pair| {
            let distance = haversine_distance(&pair[0], &pair[1]);
            let duration = distance / params.average_speed;

            let leg = Leg {
                distance_meters: distance.value(),
                duration_seconds: duration.as_secs_f64(),
                steps: vec![],
            };

            (leg, duration)
        })
        .unzip();

    let route_stops = build_schedule(stops, &leg_durations, start_time, params.dwell)
        .map_err(|error| RouteError::InvalidInput(error.to_string()))?;
    let geometry = RouteGeometry::from_points(stops.iter().map(geo_types::Point::from));

    debug!(
        "LocalEstimate: {} stops, {} legs at {} km/h",
        stops.len(),
        legs.len(),
        params.average_speed.value()
    );

    Ok(RouteResult::new(
        route_stops,
        legs,
        geometry,
        RouteSource::LocalEstimate,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_stop, fukutomi_stops, start_time};

    #[test]
    fn should_compute_haversine_distance() {
        // One degree of latitude along a meridian
        let distance = haversine_distance(
            geo_types::Point::new(0.0, 0.0),
            geo_types::Point::new(0.0, 1.0),
        );

        assert!((distance.value() - 111_194.93).abs() < 0.01);
    }

    #[test]
    fn should_estimate_fukutomi_route() {
        let stops = fukutomi_stops();
        let result = compute_local_estimate(&stops, start_time(), &LocalEstimateParams::default())
            .unwrap();

        assert_eq!(result.source, RouteSource::LocalEstimate);
        assert_eq!(result.legs.len(), 2);
        assert_eq!(
            result.stops[0].scheduled_arrival.to_string(),
            "2026-02-05T08:00:00+09:00"
        );
        assert_eq!(
            result.stops[0].scheduled_departure.to_string(),
            "2026-02-05T08:02:00+09:00"
        );

        // Roughly 2.2 km and 2.0 km apart
        assert!(result.total_distance_km > 4.0 && result.total_distance_km < 4.5);
        let summed: f64 = result.legs.iter().map(|leg| leg.distance_meters).sum();
        assert!((result.total_distance_km - summed / 1000.0).abs() < 1e-9);

        // 30 km/h is 2 minutes per kilometer
        let travel_minutes = result.total_distance_km * 2.0;
        assert_eq!(
            result.estimated_duration_minutes,
            travel_minutes.ceil() as u64
        );
    }

    #[test]
    fn should_draw_straight_lines_through_stops() {
        let stops = fukutomi_stops();
        let result = compute_local_estimate(&stops, start_time(), &LocalEstimateParams::default())
            .unwrap();

        let expected: Vec<[f64; 2]> = stops
            .iter()
            .map(|stop| [stop.longitude, stop.latitude])
            .collect();

        assert_eq!(
            result.geometry.as_ref().map(|g| g.coordinates().to_vec()),
            Some(expected)
        );
    }

    #[test]
    fn should_estimate_single_stop() {
        let stops = vec![create_stop("a", 34.5365, 132.7776)];
        let result = compute_local_estimate(&stops, start_time(), &LocalEstimateParams::default())
            .unwrap();

        assert!(result.legs.is_empty());
        assert_eq!(result.total_distance_km, 0.0);
        assert_eq!(result.estimated_duration_minutes, 0);
        assert_eq!(result.stops.len(), 1);
        assert_eq!(result.stops[0].scheduled_arrival, start_time());
    }

    #[test]
    fn should_use_configured_speed() {
        let stops = vec![
            create_stop("a", 0.0, 0.0),
            create_stop("b", 1.0, 0.0),
        ];
        let params = LocalEstimateParams {
            average_speed: Kmh::new(60.0),
            dwell: SignedDuration::from_secs(60),
        };

        let result = compute_local_estimate(&stops, start_time(), &params).unwrap();

        // ~111.19 km at 60 km/h
        assert_eq!(result.estimated_duration_minutes, 112);
        assert_eq!(
            result.stops[1]
                .scheduled_arrival
                .duration_since(&result.stops[0].scheduled_departure),
            Meters::new(result.legs[0].distance_meters) / params.average_speed
        );
    }

    #[test]
    fn should_reject_schedule_past_timestamp_range() {
        let stops = vec![
            create_stop("a", 0.0, 0.0),
            create_stop("b", 1.0, 0.0),
        ];
        let params = LocalEstimateParams {
            average_speed: Kmh::new(1e-12),
            dwell: DEFAULT_DWELL,
        };

        let result = compute_local_estimate(&stops, start_time(), &params);

        assert!(matches!(result, Err(RouteError::InvalidInput(_))));
    }
}
