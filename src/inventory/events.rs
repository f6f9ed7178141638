use bevy::prelude::*;

use super::transfer::{ReleaseTarget, SplitRequest};

/// 按物品 id / 名称给予物品（CLI）
#[derive(Event)]
pub struct GiveItemEvent {
    pub id: String,
    pub count: u32,
}

/// 按名称整格移除
#[derive(Event)]
pub struct TakeItemEvent {
    pub name: String,
}

/// 拖拽松手
#[derive(Event, Debug, Clone, Copy)]
pub struct SlotReleased {
    pub source: usize,
    pub target: ReleaseTarget,
    pub split: SplitRequest,
}

#[derive(Event)]
pub struct ListInventoryEvent; // 让 CLI 请求打印背包

/// 物品进入物品栏（供外部订阅）
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ItemAdded {
    pub item_id: String,
    pub count: u32,
}

/// 物品离开物品栏（供外部订阅）
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ItemRemoved {
    pub item_id: String,
    pub count: u32,
}
