pub mod components;
pub mod events;
mod systems;

use bevy::prelude::*;
use crate::core::{GameSet, states::AppState};
use events::*;
use systems::*;

pub struct BackpackPlugin;

impl Plugin for BackpackPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AttachRequest>()
            .add_event::<DetachRequest>()
            .add_event::<AttachRejected>()
            .add_systems(
                Update,
                (handle_detach, handle_attach)
                    .chain()
                    .in_set(GameSet::Resolve)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
