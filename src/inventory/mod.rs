pub mod components;
pub mod events;
mod systems;
pub mod transfer;

use bevy::prelude::*;
use crate::core::{GameSet, states::AppState};
use components::*;
use events::*;
use systems::*;

pub use systems::{store_item, withdraw_item};

pub struct InventoryPlugin {
    pub slots: usize,
}

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Inventory::with_capacity(self.slots))
            .init_resource::<SlotVisuals>()
            .add_event::<GiveItemEvent>()
            .add_event::<TakeItemEvent>()
            .add_event::<SlotReleased>()
            .add_event::<ListInventoryEvent>()
            .add_event::<ItemAdded>()
            .add_event::<ItemRemoved>()
            .add_systems(
                Update,
                (give_item, take_item, resolve_slot_release)
                    .chain()
                    .in_set(GameSet::Resolve)
                    .run_if(in_state(AppState::InGame)),
            )
            // 放在 PostUpdate：本帧所有 Update 里的改动都能在同一帧反映到显示上
            .add_systems(
                PostUpdate,
                (
                    refresh_slot_visuals.run_if(resource_changed::<Inventory>),
                    print_inventory,
                )
                    .chain()
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
