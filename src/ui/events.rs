use bevy::prelude::*;

/// Tab：开关物品栏
#[derive(Event, Debug, Clone, Copy)]
pub struct ToggleInventoryEvent;
