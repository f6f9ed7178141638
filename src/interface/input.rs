//! 键鼠 → 游戏事件

use bevy::prelude::*;

use crate::core::{GameSet, states::AppState};
use crate::pickup::events::{GrabOrThrow, Interact};
use crate::ui::{events::ToggleInventoryEvent, state::HeldButtons};

pub const GRAB_BUTTON: MouseButton = MouseButton::Right;
pub const PRIMARY_BUTTON: MouseButton = MouseButton::Left;
pub const INTERACT_KEY: KeyCode = KeyCode::KeyE;
pub const INVENTORY_KEY: KeyCode = KeyCode::Tab;
pub const PEEK_KEY: KeyCode = KeyCode::KeyQ;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            map_device_input
                .in_set(GameSet::Input)
                .run_if(in_state(AppState::InGame)),
        );
    }
}

/// 只处理按下 / 松开的边沿，持续状态留给 CLI 也能改
pub fn map_device_input(
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut held: ResMut<HeldButtons>,
    mut ev_grab: EventWriter<GrabOrThrow>,
    mut ev_interact: EventWriter<Interact>,
    mut ev_toggle: EventWriter<ToggleInventoryEvent>,
) {
    if mouse.just_pressed(GRAB_BUTTON) {
        ev_grab.write(GrabOrThrow);
    }
    if keys.just_pressed(INTERACT_KEY) {
        ev_interact.write(Interact);
    }
    if keys.just_pressed(INVENTORY_KEY) {
        ev_toggle.write(ToggleInventoryEvent);
    }

    if keys.just_pressed(PEEK_KEY) {
        held.peek = true;
    } else if keys.just_released(PEEK_KEY) {
        held.peek = false;
    }
    if mouse.just_pressed(PRIMARY_BUTTON) {
        held.primary = true;
    } else if mouse.just_released(PRIMARY_BUTTON) {
        held.primary = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn world() -> World {
        let mut world = World::new();
        world.init_resource::<ButtonInput<MouseButton>>();
        world.init_resource::<ButtonInput<KeyCode>>();
        world.init_resource::<HeldButtons>();
        world.init_resource::<Events<GrabOrThrow>>();
        world.init_resource::<Events<Interact>>();
        world.init_resource::<Events<ToggleInventoryEvent>>();
        world
    }

    #[test]
    fn presses_become_events() {
        let mut world = world();
        world.resource_mut::<ButtonInput<MouseButton>>().press(GRAB_BUTTON);
        world.resource_mut::<ButtonInput<KeyCode>>().press(INVENTORY_KEY);
        world.run_system_once(map_device_input).unwrap();

        assert_eq!(world.resource::<Events<GrabOrThrow>>().len(), 1);
        assert_eq!(world.resource::<Events<ToggleInventoryEvent>>().len(), 1);
        assert!(world.resource::<Events<Interact>>().is_empty());
    }

    #[test]
    fn held_buttons_follow_press_and_release() {
        let mut world = world();
        world.resource_mut::<ButtonInput<KeyCode>>().press(PEEK_KEY);
        world.run_system_once(map_device_input).unwrap();
        assert!(world.resource::<HeldButtons>().peek);

        {
            let mut keys = world.resource_mut::<ButtonInput<KeyCode>>();
            keys.clear();
            keys.release(PEEK_KEY);
        }
        world.run_system_once(map_device_input).unwrap();
        assert!(!world.resource::<HeldButtons>().peek);
    }
}
