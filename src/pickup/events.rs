use bevy::prelude::*;

/// 右键：空手时拿起，拿着时扔出
#[derive(Event, Debug, Clone, Copy)]
pub struct GrabOrThrow;

/// E：拿着时挂到背包，空手时直接收进物品栏
#[derive(Event, Debug, Clone, Copy)]
pub struct Interact;
