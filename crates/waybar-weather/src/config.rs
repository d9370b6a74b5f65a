use std::collections::HashMap;
use std::path::PathBuf;

pub const WEATHER_CACHE_TTL_SECS: u64 = 5 * 60;
pub const QUERY_TIMEOUT_SECS: u64 = 5;
pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";
pub const CACHE_FILE_NAME: &str = "weather-cache.json";
const CACHE_SUBDIR: &str = "waybar-weather";

pub const WEATHER_LOCATION_ENV: &str = "WAYBAR_WEATHER_LOCATION";
pub const WEATHER_TOKEN_ENV: &str = "OPENWEATHER_API_TOKEN";
pub const WEATHER_CACHE_FILE_ENV: &str = "WAYBAR_WEATHER_CACHE_FILE";
pub const WEATHER_CACHE_DIR_ENV: &str = "WAYBAR_WEATHER_CACHE_DIR";
pub const WEATHER_CACHE_TTL_SECS_ENV: &str = "WAYBAR_WEATHER_CACHE_TTL_SECS";
pub const WEATHER_API_BASE_URL_ENV: &str = "WAYBAR_WEATHER_API_BASE_URL";
pub const WEATHER_LOG_ENV: &str = "WAYBAR_WEATHER_LOG";
const HOME_ENV: &str = "HOME";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub location: Option<String>,
    pub token: Option<String>,
    pub cache_file: PathBuf,
    pub cache_ttl_secs: u64,
    pub api_base_url: String,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_pairs(std::env::vars())
    }

    pub(crate) fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            location: non_empty(&map, WEATHER_LOCATION_ENV),
            token: non_empty(&map, WEATHER_TOKEN_ENV),
            cache_file: resolve_cache_file(&map),
            cache_ttl_secs: resolve_cache_ttl_secs(&map),
            api_base_url: non_empty(&map, WEATHER_API_BASE_URL_ENV)
                .unwrap_or_else(|| OPENWEATHER_BASE_URL.to_string()),
        }
    }
}

fn non_empty(env_map: &HashMap<String, String>, key: &str) -> Option<String> {
    env_map
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Explicit file, then an explicit directory, then the user's cache directory.
/// The executable's own location is never used.
fn resolve_cache_file(env_map: &HashMap<String, String>) -> PathBuf {
    let home = env_map.get(HOME_ENV).map(String::as_str);

    if let Some(file) = non_empty(env_map, WEATHER_CACHE_FILE_ENV) {
        return PathBuf::from(expand_home_path(&file, home));
    }

    if let Some(dir) = non_empty(env_map, WEATHER_CACHE_DIR_ENV) {
        return PathBuf::from(expand_home_path(&dir, home)).join(CACHE_FILE_NAME);
    }

    default_cache_file()
}

pub fn default_cache_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(CACHE_SUBDIR)
        .join(CACHE_FILE_NAME)
}

pub fn expand_home_path(raw: &str, home: Option<&str>) -> String {
    let trimmed = raw.trim();
    let Some(home) = home.map(str::trim).filter(|value| !value.is_empty()) else {
        return trimmed.to_string();
    };

    let home = home.trim_end_matches('/');
    let mut expanded = trimmed.replace("$HOME", home);

    if expanded == "~" {
        expanded = home.to_string();
    } else if let Some(rest) = expanded.strip_prefix("~/") {
        expanded = format!("{home}/{rest}");
    }

    expanded
}

fn resolve_cache_ttl_secs(env_map: &HashMap<String, String>) -> u64 {
    non_empty(env_map, WEATHER_CACHE_TTL_SECS_ENV)
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(WEATHER_CACHE_TTL_SECS)
}
