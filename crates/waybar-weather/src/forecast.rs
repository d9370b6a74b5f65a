use serde::Serialize;
use tracing::debug;

use crate::error::WeatherError;
use crate::geocoding::coordinate_label;
use crate::http::QueryClient;
use crate::model::ConditionSnapshot;

pub const CONDITIONS_PATH: &str = "/data/2.5/weather";
const UNITS: &str = "metric";

#[derive(Debug, Serialize)]
struct ConditionsQuery<'a> {
    lat: f64,
    lon: f64,
    units: &'a str,
    appid: &'a str,
}

pub fn fetch_conditions(
    client: &QueryClient,
    base_url: &str,
    lat: f64,
    lon: f64,
    token: &str,
) -> Result<ConditionSnapshot, WeatherError> {
    let query = ConditionsQuery {
        lat,
        lon,
        units: UNITS,
        appid: token,
    };

    debug!(coordinates = %coordinate_label(lat, lon), "fetching current conditions");
    let snapshot: ConditionSnapshot = client.get_json(
        &format!("{base_url}{CONDITIONS_PATH}"),
        &query,
        "conditions payload",
    )?;
    ensure_conditions(snapshot)
}

pub fn ensure_conditions(snapshot: ConditionSnapshot) -> Result<ConditionSnapshot, WeatherError> {
    if snapshot.weather.is_empty() {
        return Err(WeatherError::NoConditionData);
    }
    Ok(snapshot)
}
