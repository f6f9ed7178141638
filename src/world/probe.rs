//! 视线射线：从玩家眼睛沿朝向发射，返回距离内最近的命中

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::components::PlayerEye;
use super::physics::Collider;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub entity: Entity,
    pub distance: f32,
}

/// 射线与球求交，返回沿射线的距离；起点在球内时为 0
pub fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let m = origin - center;
    let b = m.dot(dir);
    let c = m.length_squared() - radius * radius;
    if c > 0.0 && b > 0.0 {
        return None;
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    Some((-b - disc.sqrt()).max(0.0))
}

/// 在一组碰撞体里找最近命中
pub fn nearest_hit(
    ray: Ray3d,
    max_distance: f32,
    candidates: impl IntoIterator<Item = (Entity, Vec3, f32)>,
) -> Option<ProbeHit> {
    candidates
        .into_iter()
        .filter_map(|(entity, center, radius)| {
            ray_sphere(ray.origin, *ray.direction, center, radius)
                .filter(|d| *d <= max_distance)
                .map(|distance| ProbeHit { entity, distance })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

#[derive(SystemParam)]
pub struct ViewProbe<'w, 's> {
    eye: Query<'w, 's, &'static GlobalTransform, With<PlayerEye>>,
    colliders: Query<'w, 's, (Entity, &'static GlobalTransform, &'static Collider)>,
}

impl ViewProbe<'_, '_> {
    pub fn eye(&self) -> Option<&GlobalTransform> {
        self.eye.single().ok()
    }

    pub fn ray(&self) -> Option<Ray3d> {
        let eye = self.eye()?;
        Some(Ray3d::new(eye.translation(), eye.forward()))
    }

    /// ignore：手里拿着的物体挡在视线前，需要排除
    pub fn cast(&self, max_distance: f32, ignore: Option<Entity>) -> Option<ProbeHit> {
        let ray = self.ray()?;
        nearest_hit(
            ray,
            max_distance,
            self.colliders
                .iter()
                .filter(|(e, _, _)| Some(*e) != ignore)
                .map(|(e, tf, c)| (e, tf.translation(), c.radius)),
        )
    }
}
