use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    schedule_time::ScheduleTime,
    stop::{RouteStop, StopRequest},
};

/// Time spent at every stop for boarding and alighting.
pub const DEFAULT_DWELL: SignedDuration = SignedDuration::from_secs(120);

/// A scheduled time past the range of representable timestamps.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Departure from stop {stop} is out of range: {source}")]
    Dwell {
        stop: usize,
        #[source]
        source: jiff::Error,
    },

    #[error("Arrival after leg {leg} is out of range: {source}")]
    Travel {
        leg: usize,
        #[source]
        source: jiff::Error,
    },
}

impl ScheduleError {
    /// Index of the leg whose duration pushed the schedule out of range, if any.
    pub fn leg(&self) -> Option<usize> {
        match self {
            ScheduleError::Dwell { stop, .. } => stop.checked_sub(1),
            ScheduleError::Travel { leg, .. } => Some(*leg),
        }
    }
}

/// Assigns arrival and departure times to the stops in visit order.
///
/// `leg_durations[i]` is the travel time from stop `i` to stop `i + 1`, so
/// callers pass exactly `stops.len() - 1` durations (none for a single stop).
pub fn build_schedule(
    stops: &[StopRequest],
    leg_durations: &[SignedDuration],
    start_time: ScheduleTime,
    dwell: SignedDuration,
) -> Result<Vec<RouteStop>, ScheduleError> {
    debug_assert_eq!(leg_durations.len(), stops.len().saturating_sub(1));

    let mut route_stops = Vec::with_capacity(stops.len());
    let mut current_time = start_time;

    for (index, stop) in stops.iter().enumerate() {
        let arrival = current_time;
        let departure = arrival
            .checked_add(dwell)
            .map_err(|source| ScheduleError::Dwell {
                stop: index,
                source,
            })?;

        if let Some(&travel) = leg_durations.get(index) {
            current_time = departure
                .checked_add(travel)
                .map_err(|source| ScheduleError::Travel { leg: index, source })?;
        }

        route_stops.push(RouteStop {
            order: index + 1,
            stop: stop.clone(),
            scheduled_arrival: arrival,
            scheduled_departure: departure,
        });
    }

    Ok(route_stops)
}
