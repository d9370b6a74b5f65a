use chrono::{DateTime, Utc};
use waybar_core::Output;

use crate::icon::{NightPolicy, select_glyph};
use crate::model::Location;
use crate::service::WeatherReport;

pub fn format_temperature(celsius: f64) -> String {
    format!("{celsius:.2}°C")
}

pub fn format_tooltip(location: &Location, description: &str) -> String {
    format!("{}, {}, {}", location.name, location.state, description)
}

/// Builds the status line; `class` and `percentage` stay empty.
pub fn build_output(report: &WeatherReport, now: DateTime<Utc>, policy: NightPolicy) -> Output {
    let conditions = &report.conditions;
    let (code, description) = conditions
        .primary()
        .map(|condition| (Some(condition.id), condition.description.as_str()))
        .unwrap_or((None, ""));

    let mut output = Output::new(format_temperature(conditions.main.temp))
        .with_tooltip(format_tooltip(&report.location, description));
    if let Some(code) = code {
        output = output.with_alt(select_glyph(code, policy.is_night(now, conditions)));
    }
    output
}
