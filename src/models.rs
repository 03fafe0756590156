use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// National Weather Service API Models
// ============================================================================

/// `features` stays optional so a missing key can be told apart from an empty list.
#[derive(Debug, Deserialize)]
pub struct AlertResponse {
    pub features: Option<Vec<AlertFeature>>,
}

#[derive(Debug, Deserialize)]
pub struct AlertFeature {
    pub properties: AlertProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertProperties {
    pub event: Option<String>,
    #[serde(rename = "areaDesc")]
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PointsResponse {
    pub properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
pub struct PointsProperties {
    pub forecast: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub properties: ForecastProperties,
}

/// Periods stay raw so only the ones that get reported are decoded.
#[derive(Debug, Deserialize)]
pub struct ForecastProperties {
    pub periods: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastPeriod {
    pub name: String,
    pub temperature: i32,
    #[serde(rename = "temperatureUnit")]
    pub temperature_unit: String,
    #[serde(rename = "windSpeed")]
    pub wind_speed: String,
    #[serde(rename = "windDirection")]
    pub wind_direction: String,
    #[serde(rename = "detailedForecast")]
    pub detailed_forecast: String,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAlertsRequest {
    /// Two-letter US state code (e.g. CA, NY)
    pub state: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetForecastRequest {
    /// Latitude of the location
    pub latitude: f64,
    /// Longitude of the location
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn alert_response_distinguishes_missing_features() {
        let missing: AlertResponse =
            serde_json::from_value(json!({ "type": "FeatureCollection" })).unwrap();
        assert!(missing.features.is_none());

        let empty: AlertResponse = serde_json::from_value(json!({ "features": [] })).unwrap();
        assert_eq!(empty.features.map(|f| f.len()), Some(0));
    }

    #[test]
    fn alert_properties_tolerate_absent_fields() {
        let feature: AlertFeature = serde_json::from_value(json!({
            "properties": { "event": "Flood Watch", "id": "urn:oid:2.49.0.1.840.0.1" }
        }))
        .unwrap();

        assert_eq!(feature.properties.event.as_deref(), Some("Flood Watch"));
        assert!(feature.properties.area_desc.is_none());
        assert!(feature.properties.instruction.is_none());
    }

    #[test]
    fn points_response_without_forecast_url() {
        let points: PointsResponse =
            serde_json::from_value(json!({ "properties": { "gridId": "LWX" } })).unwrap();
        assert!(points.properties.forecast.is_none());
    }

    #[test]
    fn forecast_period_uses_camel_case_keys() {
        let period: ForecastPeriod = serde_json::from_value(json!({
            "number": 1,
            "name": "Tonight",
            "temperature": 41,
            "temperatureUnit": "F",
            "windSpeed": "5 mph",
            "windDirection": "NW",
            "shortForecast": "Clear",
            "detailedForecast": "Clear, with a low around 41."
        }))
        .unwrap();

        assert_eq!(period.temperature, 41);
        assert_eq!(period.wind_direction, "NW");
        assert_eq!(period.detailed_forecast, "Clear, with a low around 41.");
    }
}
