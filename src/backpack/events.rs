use bevy::prelude::*;

use super::components::AttachError;

/// 手持物体已到达背包，请求挂上
#[derive(Event, Debug, Clone, Copy)]
pub struct AttachRequest {
    pub object: Entity,
    pub backpack: Entity,
}

/// 从背包上取下（被玩家重新拿起）
#[derive(Event, Debug, Clone, Copy)]
pub struct DetachRequest {
    pub object: Entity,
}

/// 挂载失败，物体需要被扔出去
#[derive(Event, Debug, Clone)]
pub struct AttachRejected {
    pub object: Entity,
    pub reason: AttachError,
}
