use crate::error::RouteError;

/// Transport to a remote routing engine.
///
/// Implementations issue one request for the given `(longitude, latitude)`
/// points and return the raw response body, which the caller decodes.
pub trait RouteService {
    fn fetch_route(
        &self,
        points: &[geo_types::Point],
    ) -> impl Future<Output = Result<String, RouteError>> + Send;
}
