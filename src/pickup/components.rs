use bevy::prelude::*;

use crate::world::physics::Body;

/// 玩家手上：当前拿着的物体，以及正在飞向的背包
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct Hands {
    pub held: Option<Entity>,
    pub attach_target: Option<Entity>,
}

impl Hands {
    pub fn is_attaching(&self) -> bool {
        self.held.is_some() && self.attach_target.is_some()
    }

    pub fn release(&mut self) {
        self.held = None;
        self.attach_target = None;
    }
}

/// 扔出：恢复重力并施加冲量
pub fn throw(body: &mut Body, direction: Vec3, force: f32) {
    body.use_gravity = true;
    body.kinematic = false;
    body.apply_impulse(direction * force);
}
