use bevy::prelude::*;

use crate::data::schema::ItemDefinition;

/// 玩家眼睛离地高度
pub const EYE_HEIGHT: f32 = 1.6;

/// 玩家标记组件，Transform 即视角
#[derive(Component)]
pub struct Player;

/// 射线从这里发出
#[derive(Component)]
pub struct PlayerEye;

/// 可被拿起的物体
#[derive(Component)]
pub struct Grabbable;

/// 世界中的物品实体：模板 + 数量
#[derive(Component, Debug, Clone)]
pub struct WorldItem {
    pub item: ItemDefinition,
    pub amount: u32,
}
