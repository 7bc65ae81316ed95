use jiff::SignedDuration;
use tracing::debug;

use crate::{
    error::{MalformedError, RouteError},
    osrm::response::parse_route_response,
    route::{Leg, RouteResult, RouteSource},
    route_service::RouteService,
    schedule::{ScheduleError, build_schedule},
    schedule_time::ScheduleTime,
    stop::StopRequest,
};

/// Routes the stops in the given order through the remote routing engine.
pub async fn compute_remote_route<S>(
    service: &S,
    stops: &[StopRequest],
    start_time: ScheduleTime,
    dwell: SignedDuration,
) -> Result<RouteResult, RouteError>
where
    S: RouteService,
{
    let points: Vec<geo_types::Point> = stops.iter().map(geo_types::Point::from).collect();

    let body = service.fetch_route(&points).await?;
    let route = parse_route_response(&body)?;

    debug!(
        "RemoteRoute: OSRM route of {:.0}m in {:.0}s",
        route.distance, route.duration
    );

    let (geometry, legs) = route.into_parts(stops.len())?;

    let leg_durations: Vec<SignedDuration> = legs.iter().map(Leg::duration).collect();
    let route_stops = build_schedule(stops, &leg_durations, start_time, dwell)
        .map_err(schedule_error)?;

    Ok(RouteResult::new(
        route_stops,
        legs,
        geometry,
        RouteSource::Osrm,
    ))
}

// Overflow after a leg blames that leg; overflow at the first stop comes from
// the start time.
fn schedule_error(error: ScheduleError) -> RouteError {
    match error.leg() {
        Some(index) => MalformedError::InvalidLeg {
            index,
            reason: error.to_string(),
        }
        .into(),
        None => RouteError::InvalidInput(error.to_string()),
    }
}
