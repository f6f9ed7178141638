//! 极简刚体：只够拿、扔、落地用，不做碰撞响应

use bevy::prelude::*;

pub const GRAVITY: f32 = 9.81;

/// 落地后水平速度的保留比例（每帧）
const GROUND_FRICTION: f32 = 0.8;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Body {
    pub mass: f32,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub use_gravity: bool,
    /// 运动学刚体不受积分影响（挂在背包上时）
    pub kinematic: bool,
}

impl Body {
    pub fn dynamic(mass: f32) -> Self {
        Self {
            mass,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            use_gravity: true,
            kinematic: false,
        }
    }

    pub fn apply_impulse(&mut self, impulse: Vec3) {
        if self.kinematic {
            return;
        }
        self.velocity += impulse / self.mass.max(0.01);
    }

    pub fn step(&mut self, transform: &mut Transform, radius: f32, dt: f32) {
        if self.kinematic {
            return;
        }
        if self.use_gravity {
            self.velocity.y -= GRAVITY * dt;
        }
        transform.translation += self.velocity * dt;
        if self.angular_velocity != Vec3::ZERO {
            transform.rotate(Quat::from_scaled_axis(self.angular_velocity * dt));
        }

        // 地面 y = 0
        if transform.translation.y < radius {
            transform.translation.y = radius;
            if self.velocity.y < 0.0 {
                self.velocity.y = 0.0;
            }
            self.velocity.x *= GROUND_FRICTION;
            self.velocity.z *= GROUND_FRICTION;
        }
    }
}

/// 球形碰撞体，仅用于射线检测
#[derive(Component, Debug, Clone, Copy)]
pub struct Collider {
    pub radius: f32,
}

pub fn integrate_bodies(time: Res<Time>, mut bodies: Query<(&mut Transform, &mut Body, &Collider)>) {
    let dt = time.delta_secs();
    for (mut transform, mut body, collider) in &mut bodies {
        body.step(&mut transform, collider.radius, dt);
    }
}
