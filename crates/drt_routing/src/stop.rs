use serde::{Deserialize, Serialize};

use crate::{error::RouteError, schedule_time::ScheduleTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopType {
    Pickup,
    Dropoff,
}

/// A stop the vehicle visits, in the order given by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StopRequest {
    pub stop_id: String,
    pub stop_name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub stop_type: StopType,
    pub reservation_id: Option<String>,
}

impl StopRequest {
    pub fn validate(&self) -> Result<(), RouteError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(RouteError::InvalidInput(format!(
                "Stop {} has invalid latitude {}",
                self.stop_id, self.latitude
            )));
        }

        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(RouteError::InvalidInput(format!(
                "Stop {} has invalid longitude {}",
                self.stop_id, self.longitude
            )));
        }

        Ok(())
    }
}

impl From<&StopRequest> for geo_types::Point {
    fn from(stop: &StopRequest) -> Self {
        geo_types::Point::new(stop.longitude, stop.latitude)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteStop {
    /// 1-based position in the route
    pub order: usize,
    #[serde(flatten)]
    pub stop: StopRequest,
    pub scheduled_arrival: ScheduleTime,
    pub scheduled_departure: ScheduleTime,
}
