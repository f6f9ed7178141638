pub mod client;
mod systems;

use bevy::prelude::*;
use crate::core::config::TelemetryConfig;
use client::TelemetryClient;

/// 订阅 ItemAdded / ItemRemoved 并上报服务器
pub struct TelemetryPlugin {
    pub config: TelemetryConfig,
}

impl Plugin for TelemetryPlugin {
    fn build(&self, app: &mut App) {
        if !self.config.enabled {
            info!("telemetry disabled");
            return;
        }
        if self.config.token.is_empty() {
            warn!("telemetry enabled without a token, reports will likely be rejected");
        }
        let client = TelemetryClient::new(&self.config);
        info!("telemetry reporting to {}", client.endpoint());
        app.insert_resource(client)
            .add_systems(PostUpdate, systems::report_inventory_changes);
    }
}
