//! 物品栏变更上报：POST JSON，fire-and-forget

use std::time::Duration;

use bevy::prelude::*;
use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::TelemetryConfig;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportAction {
    Add,
    Remove,
}

/// 请求体
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InventoryReport {
    pub item_id: String,
    pub action: ReportAction,
}

/// 服务端应答，只有 response == "success" 才算成功
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ServerResponse {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub status: serde_json::Value,
    #[serde(default)]
    pub data_submitted: serde_json::Value,
}

impl ServerResponse {
    pub fn into_result(self) -> Result<Self, TelemetryError> {
        if self.response == "success" {
            Ok(self)
        } else {
            Err(TelemetryError::Rejected(self.response))
        }
    }
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("request failed: {0}")]
    Transport(#[from] Box<ureq::Error>),
    #[error("bad response body: {0}")]
    Decode(#[from] std::io::Error),
    #[error("server rejected report: {0:?}")]
    Rejected(String),
}

#[derive(Resource, Clone)]
pub struct TelemetryClient {
    agent: ureq::Agent,
    endpoint: String,
    token: String,
}

impl TelemetryClient {
    pub fn new(config: &TelemetryConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();
        Self {
            agent,
            endpoint: config.endpoint.clone(),
            token: config.token.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 阻塞调用，放在 IoTaskPool 里跑
    pub fn submit(&self, report: &InventoryReport) -> Result<ServerResponse, TelemetryError> {
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .set("Authorization", &format!("Token {}", self.token))
            .send_json(report)
            .map_err(Box::new)?;
        let body: ServerResponse = response.into_json()?;
        body.into_result()
    }
}
