use bevy::prelude::*;

use crate::inventory::components::ItemStack;

/// 在玩家面前生成一个世界物体（从物品栏丢出）
#[derive(Event, Debug, Clone)]
pub struct SpawnWorldItem {
    pub stack: ItemStack,
}

/// 把视线转向某个具名物体（CLI 用来代替鼠标视角）
#[derive(Event)]
pub struct LookAtEvent {
    pub target: String,
}

#[derive(Event)]
pub struct ListWorldEvent;
