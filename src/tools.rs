//! Tool handlers. Each one is a plain function of the gateway and its input and
//! always produces a reply: either formatted data or a fixed sentence.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::constants::{
    ALERTS_UNAVAILABLE, FORECAST_PERIODS, FORECAST_UNAVAILABLE, NO_ALERTS, POINTS_UNAVAILABLE,
};
use crate::formatters::{format_alerts, format_forecast};
use crate::gateway::Gateway;
use crate::models::{AlertResponse, ForecastPeriod, ForecastResponse, PointsResponse};

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Option<T> {
    serde_json::from_value(value)
        .map_err(|e| tracing::warn!("Unexpected {} payload: {}", what, e))
        .ok()
}

/// Active alerts for a two-letter state code
pub async fn alerts_for(gateway: &Gateway, state: &str) -> String {
    let url = format!("{}/alerts/active/area/{}", gateway.base_url(), state);

    let features = gateway
        .fetch(&url)
        .await
        .and_then(|value| decode::<AlertResponse>(value, "alerts"))
        .and_then(|alerts| alerts.features);

    match features {
        None => ALERTS_UNAVAILABLE.to_string(),
        Some(features) if features.is_empty() => NO_ALERTS.to_string(),
        Some(features) => format_alerts(&features),
    }
}

/// Forecast for the next few periods at a coordinate
pub async fn forecast_for(gateway: &Gateway, latitude: f64, longitude: f64) -> String {
    let points_url = format!("{}/points/{},{}", gateway.base_url(), latitude, longitude);

    let forecast_url = gateway
        .fetch(&points_url)
        .await
        .and_then(|value| decode::<PointsResponse>(value, "points"))
        .and_then(|points| points.properties.forecast);

    let Some(forecast_url) = forecast_url else {
        return POINTS_UNAVAILABLE.to_string();
    };

    let periods = gateway
        .fetch(&forecast_url)
        .await
        .and_then(|value| decode::<ForecastResponse>(value, "forecast"))
        .and_then(|forecast| {
            forecast
                .properties
                .periods
                .into_iter()
                .take(FORECAST_PERIODS)
                .map(|period| decode::<ForecastPeriod>(period, "forecast period"))
                .collect::<Option<Vec<_>>>()
        });

    match periods {
        Some(periods) => format_forecast(&periods),
        None => FORECAST_UNAVAILABLE.to_string(),
    }
}
