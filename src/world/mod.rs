pub mod components;
pub mod events;
pub mod physics;
pub mod probe;
mod systems;

use bevy::prelude::*;
use crate::core::{GameSet, states::AppState};
use events::*;
use systems::*;

/// 场景、刚体与射线
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SpawnWorldItem>()
            .add_event::<LookAtEvent>()
            .add_event::<ListWorldEvent>()
            .add_systems(OnEnter(AppState::InGame), spawn_scene)
            .add_systems(
                Update,
                look_at_named
                    .in_set(GameSet::Act)
                    .run_if(in_state(AppState::InGame)),
            )
            .add_systems(
                Update,
                ((spawn_dropped_items, list_world), physics::integrate_bodies)
                    .chain()
                    .in_set(GameSet::Motion)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
