use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use waybar_core::{Output, redact_sensitive};

use waybar_weather::{
    config::{RuntimeConfig, WEATHER_LOG_ENV},
    error::{AppError, ERROR_CODE_RUNTIME_CLIENT_INIT, ERROR_CODE_RUNTIME_SERIALIZE},
    icon::NightPolicy,
    model::WeatherRequest,
    providers::{OpenWeatherProvider, WeatherApi},
    render,
    service::CacheStore,
};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Current weather for a Waybar custom module (OpenWeatherMap)"
)]
struct Cli {
    /// Place name passed to the geocoder, e.g. "Berlin".
    #[arg(long)]
    location: Option<String>,
    /// OpenWeatherMap API token.
    #[arg(long)]
    token: Option<String>,
    /// Cache file path; overrides WAYBAR_WEATHER_CACHE_FILE.
    #[arg(long)]
    cache_file: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = NightPolicyArg::AsObserved)]
    night_policy: NightPolicyArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum NightPolicyArg {
    AsObserved,
    OutsideDaylight,
}

impl From<NightPolicyArg> for NightPolicy {
    fn from(value: NightPolicyArg) -> Self {
        match value {
            NightPolicyArg::AsObserved => NightPolicy::AsObserved,
            NightPolicyArg::OutsideDaylight => NightPolicy::OutsideDaylight,
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let config = RuntimeConfig::from_env();
    match run(&cli, &config) {
        Ok(line) => println!("{line}"),
        Err(error) => {
            emit_error(&error);
            std::process::exit(error.exit_code());
        }
    }
}

/// Diagnostics go to stderr only; stdout is reserved for the status line.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(WEATHER_LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli, config: &RuntimeConfig) -> Result<String, AppError> {
    let request = build_request(cli, config)?;
    let providers = OpenWeatherProvider::new(&config.api_base_url, request.token.clone())
        .map_err(|error| AppError::runtime(ERROR_CODE_RUNTIME_CLIENT_INIT, error.to_string()))?;
    run_with(cli, config, &providers, Utc::now, &request)
}

fn build_request(cli: &Cli, config: &RuntimeConfig) -> Result<WeatherRequest, AppError> {
    let location = flag_or_env(cli.location.as_deref(), config.location.as_deref());
    let token = flag_or_env(cli.token.as_deref(), config.token.as_deref());
    Ok(WeatherRequest::new(location, token)?)
}

fn flag_or_env<'a>(flag: Option<&'a str>, env: Option<&'a str>) -> Option<&'a str> {
    flag.filter(|value| !value.trim().is_empty()).or(env)
}

fn run_with<P, N>(
    cli: &Cli,
    config: &RuntimeConfig,
    providers: &P,
    now_fn: N,
    request: &WeatherRequest,
) -> Result<String, AppError>
where
    P: WeatherApi,
    N: Fn() -> DateTime<Utc> + Copy,
{
    let cache_file = cli
        .cache_file
        .clone()
        .unwrap_or_else(|| config.cache_file.clone());
    let store = CacheStore::with_ttl(cache_file, config.cache_ttl_secs);

    let report = store.get(providers, now_fn, &request.location)?;
    debug!(
        location = %request.location,
        state = report.state.as_str(),
        refreshed = report.refreshed,
        "weather report ready"
    );

    render::build_output(&report, now_fn(), cli.night_policy.into())
        .to_json()
        .map_err(|error| AppError::runtime(ERROR_CODE_RUNTIME_SERIALIZE, error.to_string()))
}

fn emit_error(error: &AppError) {
    let message = redact_sensitive(&error.message);
    let line = Output::degraded(&format!("[{}] {}", error.code, message))
        .to_json()
        .unwrap_or_else(|_| {
            r#"{"text":"--","alt":"","tooltip":"","class":"","percentage":""}"#.to_string()
        });
    println!("{line}");
    eprintln!("error[{}]: {}", error.code, message);
}
