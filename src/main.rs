use bevy::log::LogPlugin;
use bevy::prelude::*;

mod backpack;
mod core;
mod data;
mod interface;
mod inventory;
mod pickup;
mod telemetry;
mod ui;
mod world;

use backpack::BackpackPlugin;
use crate::core::{CorePlugin, config::{CONFIG_PATH, GameConfig}};
use data::DataPlugin;
use interface::{debug_cli::DebugCliPlugin, input::InputPlugin};
use inventory::InventoryPlugin;
use pickup::PickupPlugin;
use telemetry::TelemetryPlugin;
use ui::UiPlugin;
use world::WorldPlugin;

fn main() {
    let config = GameConfig::load_or_default(CONFIG_PATH);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        visible: false,
                        ..default()
                    }), // 不显示窗口，靠 CLI 驱动
                    ..default()
                })
                .set(LogPlugin {
                    filter: config.log.filter.clone(),
                    ..default()
                }),
        )
        .add_plugins(CorePlugin {
            config: config.clone(),
        })
        .add_plugins(DataPlugin)
        .add_plugins(WorldPlugin)
        .add_plugins(InventoryPlugin {
            slots: config.inventory.slots,
        })
        .add_plugins(BackpackPlugin)
        .add_plugins(PickupPlugin)
        .add_plugins(UiPlugin)
        .add_plugins(TelemetryPlugin {
            config: config.telemetry.clone(),
        })
        .add_plugins((DebugCliPlugin, InputPlugin))
        .run();
}
