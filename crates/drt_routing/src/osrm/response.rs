use serde::Deserialize;

use crate::{
    error::{MalformedError, RouteError, UnavailableError},
    route::{Leg, RouteGeometry, RouteStep},
};

const OSRM_OK: &str = "Ok";

#[derive(Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    /// Candidates are decoded lazily, only the best one is ever used
    #[serde(default)]
    routes: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    pub geometry: RouteGeometry,
    pub legs: Vec<OsrmLeg>,
    /// Meters
    pub distance: f64,
    /// Seconds
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
pub struct OsrmLeg {
    pub distance: f64,
    pub duration: f64,
    #[serde(default)]
    pub steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmStep {
    pub distance: f64,
    pub duration: f64,
    pub geometry: RouteGeometry,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mode: String,
}

impl From<OsrmStep> for RouteStep {
    fn from(step: OsrmStep) -> Self {
        RouteStep {
            name: step.name,
            mode: step.mode,
            distance_meters: step.distance,
            duration_seconds: step.duration,
            geometry: step.geometry,
        }
    }
}

/// Extracts the best route from an OSRM `route` service response body.
///
/// A failure code or an empty candidate list means the service could not
/// route, anything that does not decode is a malformed response.
pub fn parse_route_response(body: &str) -> Result<OsrmRoute, RouteError> {
    let response: OsrmRouteResponse =
        serde_json::from_str(body).map_err(MalformedError::Deserialize)?;

    if response.code != OSRM_OK {
        return Err(UnavailableError::Code {
            code: response.code,
            message: response.message.unwrap_or_default(),
        }
        .into());
    }

    let best = response
        .routes
        .into_iter()
        .next()
        .ok_or(UnavailableError::NoRoutes)?;

    let route: OsrmRoute = serde_json::from_value(best).map_err(MalformedError::Deserialize)?;

    Ok(route)
}

fn is_valid_quantity(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl OsrmRoute {
    /// Splits the route into its geometry and legs, checking there is one
    /// leg per pair of consecutive stops.
    pub fn into_parts(self, stop_count: usize) -> Result<(RouteGeometry, Vec<Leg>), MalformedError> {
        let expected = stop_count.saturating_sub(1);

        if self.legs.len() != expected {
            return Err(MalformedError::LegCountMismatch {
                expected,
                actual: self.legs.len(),
            });
        }

        let legs = self
            .legs
            .into_iter()
            .enumerate()
            .map(|(index, leg)| {
                if !is_valid_quantity(leg.distance) {
                    return Err(MalformedError::InvalidLeg {
                        index,
                        reason: format!("distance {}", leg.distance),
                    });
                }

                if !is_valid_quantity(leg.duration) {
                    return Err(MalformedError::InvalidLeg {
                        index,
                        reason: format!("duration {}", leg.duration),
                    });
                }

                Ok(Leg {
                    distance_meters: leg.distance,
                    duration_seconds: leg.duration,
                    steps: leg.steps.into_iter().map(RouteStep::from).collect(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((self.geometry, legs))
    }
}
