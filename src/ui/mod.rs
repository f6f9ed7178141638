pub mod events;
pub mod state;
mod systems;

use bevy::prelude::*;
use crate::core::{GameSet, states::AppState};
use events::*;
use state::*;
use systems::*;

/// 物品栏 / 背包面板的显隐与光标锁定
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InventoryScreen>()
            .init_resource::<BackpackScreen>()
            .init_resource::<CursorState>()
            .init_resource::<HeldButtons>()
            .add_event::<ToggleInventoryEvent>()
            .add_systems(
                Update,
                (toggle_inventory, peek_backpack, backpack_panel)
                    .chain()
                    .in_set(GameSet::Act)
                    .run_if(in_state(AppState::InGame)),
            )
            .add_systems(PostUpdate, apply_cursor.run_if(resource_changed::<CursorState>));
    }
}
