use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData as McpError,
};

use crate::gateway::Gateway;
use crate::models::{GetAlertsRequest, GetForecastRequest};
use crate::tools::{alerts_for, forecast_for};

/// MCP server exposing the weather tools
#[derive(Clone)]
pub struct Weather {
    gateway: Gateway,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates the server; the tool router is built once here
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "A weather information service powered by the National Weather Service API. \
                Provides active alerts for US states and short-range forecasts for US locations."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Gets active weather alerts for a US state
    #[tool(description = "Get weather alerts for a US state by two-letter code (e.g. CA, NY).")]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting alerts for state: {}", request.state);

        let text = alerts_for(&self.gateway, &request.state).await;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Gets the forecast for a location
    #[tool(description = "Get weather forecast for a location given its latitude and longitude.")]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting forecast for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let text = forecast_for(&self.gateway, request.latitude, request.longitude).await;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
