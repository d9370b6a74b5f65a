use serde::Serialize;
use tracing::{debug, info};

use crate::error::WeatherError;
use crate::http::QueryClient;
use crate::model::Location;

pub const GEOCODE_PATH: &str = "/geo/1.0/direct";

#[derive(Debug, Serialize)]
struct GeocodeQuery<'a> {
    q: &'a str,
    limit: u8,
    appid: &'a str,
}

pub fn resolve_location(
    client: &QueryClient,
    base_url: &str,
    name: &str,
    token: &str,
) -> Result<Location, WeatherError> {
    let query = GeocodeQuery {
        q: name,
        limit: 1,
        appid: token,
    };

    debug!(location = name, "resolving location");
    let candidates: Vec<Location> = client.get_json(
        &format!("{base_url}{GEOCODE_PATH}"),
        &query,
        "geocode payload",
    )?;
    let location = select_candidate(candidates, name)?;
    info!(
        location = name,
        resolved = %location.name,
        lat = location.lat,
        lon = location.lon,
        "resolved location"
    );
    Ok(location)
}

/// Takes the first candidate. A 0,0 result is the geocoder's "not found"
/// sentinel, so a genuine Null Island lookup is rejected as well.
pub fn select_candidate(candidates: Vec<Location>, name: &str) -> Result<Location, WeatherError> {
    let Some(first) = candidates.into_iter().next() else {
        return Err(WeatherError::UnknownLocation(name.to_string()));
    };

    if first.lat == 0.0 && first.lon == 0.0 {
        return Err(WeatherError::UnknownLocation(format!(
            "{name} (geocoder returned 0,0)"
        )));
    }

    Ok(first)
}

pub fn coordinate_label(lat: f64, lon: f64) -> String {
    format!("{:.4},{:.4}", round4(lat), round4(lon))
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(name: &str, state: &str, lat: f64, lon: f64) -> Location {
        Location {
            name: name.to_string(),
            state: state.to_string(),
            lat,
            lon,
        }
    }

    #[test]
    fn geocode_takes_first_candidate() {
        let body = r#"[
            {"name": "Berlin", "state": "Berlin", "country": "DE", "lat": 52.5170365, "lon": 13.3888599},
            {"name": "Berlin", "state": "New Hampshire", "country": "US", "lat": 44.4686, "lon": -71.1851}
        ]"#;
        let candidates: Vec<Location> = serde_json::from_str(body).expect("candidates");

        let resolved = select_candidate(candidates, "Berlin").expect("location");
        assert_eq!(resolved, location("Berlin", "Berlin", 52.5170365, 13.3888599));
    }

    #[test]
    fn geocode_rejects_empty_result_set() {
        let error = select_candidate(Vec::new(), "Atlantis").expect_err("must fail");
        assert_eq!(error, WeatherError::UnknownLocation("Atlantis".to_string()));
    }

    #[test]
    fn geocode_rejects_zero_zero_regardless_of_name() {
        for (name, state) in [("Null Island", ""), ("Berlin", "Berlin"), ("", "")] {
            let error = select_candidate(vec![location(name, state, 0.0, 0.0)], "query")
                .expect_err("must fail");
            assert!(matches!(error, WeatherError::UnknownLocation(_)));
        }
    }

    #[test]
    fn geocode_accepts_single_zero_coordinate() {
        let greenwich = location("Greenwich", "England", 51.4769, 0.0);
        let resolved = select_candidate(vec![greenwich.clone()], "Greenwich").expect("location");
        assert_eq!(resolved, greenwich);

        let quito = location("Quito", "Pichincha", 0.0, -78.5);
        assert!(select_candidate(vec![quito], "Quito").is_ok());
    }

    #[test]
    fn geocode_query_serializes_expected_parameters() {
        let query = GeocodeQuery {
            q: "Berlin",
            limit: 1,
            appid: "token",
        };
        let value = serde_json::to_value(&query).expect("json");

        assert_eq!(value["q"], "Berlin");
        assert_eq!(value["limit"], 1);
        assert_eq!(value["appid"], "token");
    }

    #[test]
    fn geocoding_coordinate_label_is_deterministic() {
        assert_eq!(coordinate_label(52.5170365, 13.3888599), "52.5170,13.3889");
    }
}
