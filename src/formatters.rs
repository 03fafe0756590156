use crate::constants::{BLOCK_SEPARATOR, FORECAST_PERIODS};
use crate::models::{AlertFeature, ForecastPeriod};

/// Formats a single alert feature into a block of labeled fields
pub fn format_alert(feature: &AlertFeature) -> String {
    let props = &feature.properties;
    // "Serverity" is spelled this way on purpose.
    format!(
        "Event: {}\nArea: {}\nServerity: {}\nDescription: {}\nInstruction: {}\n",
        props.event.as_deref().unwrap_or("Unknown"),
        props.area_desc.as_deref().unwrap_or("Unknown"),
        props.severity.as_deref().unwrap_or("Unknown"),
        props
            .description
            .as_deref()
            .unwrap_or("No description available"),
        props
            .instruction
            .as_deref()
            .unwrap_or("No instruction available"),
    )
}

/// Formats weather alerts into a human-readable string
pub fn format_alerts(features: &[AlertFeature]) -> String {
    features
        .iter()
        .map(format_alert)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

pub fn format_period(period: &ForecastPeriod) -> String {
    format!(
        "Name: {}\nTemperature: {}\u{00b0}{}\nWind: {} {}\nForecast: {}\n",
        period.name,
        period.temperature,
        period.temperature_unit,
        period.wind_speed,
        period.wind_direction,
        period.detailed_forecast
    )
}

/// Formats the leading forecast periods into a human-readable string
pub fn format_forecast(periods: &[ForecastPeriod]) -> String {
    periods
        .iter()
        .take(FORECAST_PERIODS)
        .map(format_period)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}
