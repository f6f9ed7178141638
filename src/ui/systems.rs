use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use super::{events::ToggleInventoryEvent, state::*};
use crate::backpack::components::Backpack;
use crate::core::{config::GameConfig, events::LogEvent};
use crate::world::probe::ViewProbe;

fn aiming_at_backpack(probe: &ViewProbe, backpacks: &Query<(), With<Backpack>>, distance: f32) -> bool {
    probe
        .cast(distance, None)
        .is_some_and(|hit| backpacks.contains(hit.entity))
}

pub fn toggle_inventory(
    mut ev_toggle: EventReader<ToggleInventoryEvent>,
    mut screen: ResMut<InventoryScreen>,
    mut cursor: ResMut<CursorState>,
    mut log: EventWriter<LogEvent>,
) {
    for _ in ev_toggle.read() {
        screen.toggle(&mut cursor);
        log.write(LogEvent(
            if screen.open { "物品栏已打开" } else { "物品栏已关闭" }.into(),
        ));
    }
}

pub fn peek_backpack(
    buttons: Res<HeldButtons>,
    probe: ViewProbe,
    backpacks: Query<(), With<Backpack>>,
    mut screen: ResMut<InventoryScreen>,
    mut cursor: ResMut<CursorState>,
    config: Res<GameConfig>,
) {
    if !buttons.peek {
        return;
    }
    let aiming = aiming_at_backpack(&probe, &backpacks, config.inventory.reach_distance);
    // 避免每帧无意义地触发 Changed
    let mut next = screen.clone();
    let mut next_cursor = *cursor;
    next.peek(aiming, &mut next_cursor);
    screen.set_if_neq(next);
    cursor.set_if_neq(next_cursor);
}

pub fn backpack_panel(
    buttons: Res<HeldButtons>,
    probe: ViewProbe,
    backpacks: Query<(), With<Backpack>>,
    screen: Res<InventoryScreen>,
    mut panel: ResMut<BackpackScreen>,
    mut cursor: ResMut<CursorState>,
    config: Res<GameConfig>,
) {
    let aiming = aiming_at_backpack(&probe, &backpacks, config.pickup.distance);
    let mut next = panel.clone();
    let mut next_cursor = *cursor;
    next.update(screen.open, aiming, buttons.primary, &mut next_cursor);
    panel.set_if_neq(next);
    cursor.set_if_neq(next_cursor);
}

/// 光标状态变化时同步到主窗口
pub fn apply_cursor(cursor: Res<CursorState>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = if cursor.locked {
        CursorGrabMode::Locked
    } else {
        CursorGrabMode::None
    };
    window.cursor_options.visible = cursor.visible;
}
