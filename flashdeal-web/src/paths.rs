//! Reads the optional `?lat=&lng=` location from the page URL.
use crate::engine::GeoPoint;

/// Parse a location from a query string such as `?lat=40.4&lng=-3.7`.
///
/// Both parameters must be present and in range.
#[must_use]
pub fn location_from_query(search: &str) -> Option<GeoPoint> {
    let mut lat = None;
    let mut lng = None;
    for pair in search.trim_start_matches('?').split('&') {
        match pair.split_once('=') {
            Some(("lat", value)) => lat = value.trim().parse::<f64>().ok(),
            Some(("lng", value)) => lng = value.trim().parse::<f64>().ok(),
            _ => {}
        }
    }
    GeoPoint::checked(lat?, lng?)
}

/// Location from the page URL, if any.
#[must_use]
pub fn current_location() -> Option<GeoPoint> {
    #[cfg(target_arch = "wasm32")]
    {
        let search = gloo::utils::window().location().search().ok()?;
        location_from_query(&search)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}
