use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::{
    stop::RouteStop,
    units::{Meters, seconds_to_duration},
};

/// GeoJSON style geometry, coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum RouteGeometry {
    LineString { coordinates: Vec<[f64; 2]> },
}

impl RouteGeometry {
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = geo_types::Point>,
    {
        RouteGeometry::LineString {
            coordinates: points
                .into_iter()
                .map(|point| [point.x(), point.y()])
                .collect(),
        }
    }

    pub fn coordinates(&self) -> &[[f64; 2]] {
        match self {
            RouteGeometry::LineString { coordinates } => coordinates,
        }
    }
}

impl From<&RouteGeometry> for geo_types::LineString {
    fn from(geometry: &RouteGeometry) -> Self {
        geometry
            .coordinates()
            .iter()
            .map(|&[x, y]| geo_types::coord! { x: x, y: y })
            .collect()
    }
}

/// A single maneuver within a leg, as reported by the routing engine.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteStep {
    pub name: String,
    pub mode: String,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub geometry: RouteGeometry,
}

/// Travel between two consecutive stops.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Leg {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

impl Leg {
    pub fn distance(&self) -> Meters {
        Meters::new(self.distance_meters)
    }

    pub fn duration(&self) -> SignedDuration {
        seconds_to_duration(self.duration_seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSource {
    Osrm,
    LocalEstimate,
}

/// The route document handed back to the caller and persisted as is.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteResult {
    pub stops: Vec<RouteStop>,
    pub total_distance_km: f64,
    pub estimated_duration_minutes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<RouteGeometry>,
    #[serde(default)]
    pub legs: Vec<Leg>,
    pub source: RouteSource,
}

impl RouteResult {
    /// Builds the result and derives the totals from the legs.
    ///
    /// The duration is the travel time only: the ceiling of the summed leg
    /// durations in minutes, whichever provider produced the legs.
    pub fn new(
        stops: Vec<RouteStop>,
        legs: Vec<Leg>,
        geometry: RouteGeometry,
        source: RouteSource,
    ) -> Self {
        let total_distance: Meters = legs.iter().map(Leg::distance).sum();
        let total_duration_seconds: f64 = legs.iter().map(|leg| leg.duration_seconds).sum();

        RouteResult {
            stops,
            total_distance_km: total_distance.kilometers(),
            estimated_duration_minutes: (total_duration_seconds / 60.0).ceil() as u64,
            geometry: Some(geometry),
            legs,
            source,
        }
    }

    pub fn is_estimate(&self) -> bool {
        self.source == RouteSource::LocalEstimate
    }
}
