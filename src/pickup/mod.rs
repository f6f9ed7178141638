pub mod components;
pub mod events;
mod systems;

use bevy::prelude::*;
use crate::core::{GameSet, states::AppState};
use crate::world::physics::integrate_bodies;
use components::Hands;
use events::*;
use systems::*;

/// 拾取、搬运、扔出、挂到背包
pub struct PickupPlugin;

impl Plugin for PickupPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Hands>()
            .add_event::<GrabOrThrow>()
            .add_event::<Interact>()
            .add_systems(
                Update,
                (grab_or_throw, interact, move_to_backpack, carry_held)
                    .chain()
                    .in_set(GameSet::Act)
                    .run_if(in_state(AppState::InGame)),
            )
            .add_systems(
                Update,
                throw_rejected
                    .in_set(GameSet::Motion)
                    .before(integrate_bodies)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
