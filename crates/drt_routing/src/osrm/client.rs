use std::{fmt::Display, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{RouteError, UnavailableError},
    route_service::RouteService,
    timer_debug,
};

pub const DEFAULT_OSRM_URL: &str = "http://router.project-osrm.org";
pub const DEFAULT_OSRM_TIMEOUT: Duration = Duration::from_secs(10);
pub const OSRM_ROUTE_API_PATH: &str = "/route/v1/";

#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OsrmProfile {
    Driving,
    Cycling,
    Walking,
}

impl Display for OsrmProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OsrmProfile::Driving => "driving",
                OsrmProfile::Cycling => "cycling",
                OsrmProfile::Walking => "walking",
            }
        )
    }
}

impl FromStr for OsrmProfile {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "driving" | "car" => Ok(OsrmProfile::Driving),
            "cycling" | "bike" => Ok(OsrmProfile::Cycling),
            "walking" | "foot" => Ok(OsrmProfile::Walking),
            other => Err(format!("Unknown OSRM profile {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClientParams {
    pub osrm_url: String,
    pub profile: OsrmProfile,
    pub timeout: Duration,
}

impl Default for OsrmClientParams {
    fn default() -> Self {
        Self {
            osrm_url: DEFAULT_OSRM_URL.to_string(),
            profile: OsrmProfile::Driving,
            timeout: DEFAULT_OSRM_TIMEOUT,
        }
    }
}

pub struct OsrmClient {
    params: OsrmClientParams,
    client: reqwest::Client,
}

impl OsrmClient {
    pub fn new(params: OsrmClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    /// `{osrm_url}/route/v1/{profile}/{lon},{lat};{lon},{lat}...`
    pub fn route_url(&self, points: &[geo_types::Point]) -> String {
        let mut url = self.params.osrm_url.trim_end_matches('/').to_string();
        url.push_str(OSRM_ROUTE_API_PATH);
        url.push_str(&self.params.profile.to_string());
        url.push('/');

        for (i, point) in points.iter().enumerate() {
            url.push_str(&format!("{},{}", point.x(), point.y()));

            if i < points.len() - 1 {
                url.push(';');
            }
        }

        url
    }

    async fn request_route(&self, url: String) -> Result<String, UnavailableError> {
        let response = self
            .client
            .get(url)
            .query(&[
                ("overview", "full"),
                ("geometries", "geojson"),
                ("steps", "true"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(UnavailableError::Api { status, message });
        }

        Ok(response.text().await?)
    }
}

impl Default for OsrmClient {
    fn default() -> Self {
        Self::new(OsrmClientParams::default())
    }
}

impl RouteService for OsrmClient {
    async fn fetch_route(&self, points: &[geo_types::Point]) -> Result<String, RouteError> {
        let url = self.route_url(points);
        let timeout = self.params.timeout;

        debug!("OsrmClient: Requesting route through {} points", points.len());

        let body = timer_debug!(
            "OsrmClient: Route request",
            tokio::time::timeout(timeout, self.request_route(url)).await
        )
        .map_err(|_| UnavailableError::Timeout(timeout))??;

        Ok(body)
    }
}
