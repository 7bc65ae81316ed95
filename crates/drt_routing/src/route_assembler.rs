use jiff::SignedDuration;
use tracing::{debug, instrument, warn};

use crate::{
    error::RouteError,
    local_estimate::{DEFAULT_AVERAGE_SPEED_KMH, LocalEstimateParams, compute_local_estimate},
    remote_route::compute_remote_route,
    route::RouteResult,
    route_service::RouteService,
    schedule::DEFAULT_DWELL,
    schedule_time::ScheduleTime,
    stop::StopRequest,
    units::Kmh,
};

#[derive(Debug, Clone, Copy)]
pub struct AssemblerParams {
    /// Estimate the route locally when the routing engine fails
    pub allow_fallback: bool,
    /// Never contact the routing engine
    pub local_only: bool,
    pub dwell: SignedDuration,
    pub average_speed: Kmh,
}

impl Default for AssemblerParams {
    fn default() -> Self {
        Self {
            allow_fallback: true,
            local_only: false,
            dwell: DEFAULT_DWELL,
            average_speed: Kmh::new(DEFAULT_AVERAGE_SPEED_KMH),
        }
    }
}

impl AssemblerParams {
    fn local_estimate_params(&self) -> LocalEstimateParams {
        LocalEstimateParams {
            average_speed: self.average_speed,
            dwell: self.dwell,
        }
    }
}

enum AssemblyState {
    AttemptingRemote,
    AttemptingLocal,
    Done(RouteResult),
}

/// Single entry point for building a route document.
///
/// The routing engine is tried exactly once. When it fails and fallback is
/// allowed, the route is estimated locally instead; the result's `source`
/// tells which path produced it.
pub struct RouteAssembler<S> {
    service: S,
    params: AssemblerParams,
}

impl<S> RouteAssembler<S>
where
    S: RouteService,
{
    pub fn new(service: S, params: AssemblerParams) -> Self {
        Self { service, params }
    }

    pub async fn assemble(
        &self,
        stops: &[StopRequest],
        start_time: ScheduleTime,
    ) -> Result<RouteResult, RouteError> {
        self.assemble_with_fallback(stops, start_time, self.params.allow_fallback)
            .await
    }

    #[instrument(skip_all, fields(stops = stops.len(), allow_fallback = allow_fallback))]
    pub async fn assemble_with_fallback(
        &self,
        stops: &[StopRequest],
        start_time: ScheduleTime,
        allow_fallback: bool,
    ) -> Result<RouteResult, RouteError> {
        validate_stops(stops)?;

        let mut state = if self.params.local_only {
            AssemblyState::AttemptingLocal
        } else {
            AssemblyState::AttemptingRemote
        };

        loop {
            state = match state {
                AssemblyState::AttemptingRemote => {
                    match compute_remote_route(&self.service, stops, start_time, self.params.dwell)
                        .await
                    {
                        Ok(result) => AssemblyState::Done(result),
                        Err(error) if allow_fallback && error.is_recoverable() => {
                            warn!("Routing engine failed, falling back to local estimate: {error}");
                            AssemblyState::AttemptingLocal
                        }
                        Err(error) => return Err(error),
                    }
                }
                AssemblyState::AttemptingLocal => AssemblyState::Done(compute_local_estimate(
                    stops,
                    start_time,
                    &self.params.local_estimate_params(),
                )?),
                AssemblyState::Done(result) => {
                    debug!(
                        source = ?result.source,
                        "Route assembled: {:.2} km, {} min",
                        result.total_distance_km,
                        result.estimated_duration_minutes
                    );
                    return Ok(result);
                }
            };
        }
    }
}

fn validate_stops(stops: &[StopRequest]) -> Result<(), RouteError> {
    if stops.is_empty() {
        return Err(RouteError::InvalidInput(
            "A route needs at least one stop".to_string(),
        ));
    }

    stops.iter().try_for_each(StopRequest::validate)
}
