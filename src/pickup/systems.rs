use super::{components::*, events::*};
use crate::backpack::{
    components::{AttachedTo, Backpack},
    events::{AttachRejected, AttachRequest, DetachRequest},
};
use crate::core::{config::GameConfig, events::LogEvent};
use crate::inventory::{components::Inventory, events::ItemAdded, store_item};
use crate::world::{
    components::{Grabbable, WorldItem},
    physics::Body,
    probe::ViewProbe,
};
use bevy::prelude::*;

/// 拿起 / 扔出
pub fn grab_or_throw(
    mut ev_grab: EventReader<GrabOrThrow>,
    mut hands: ResMut<Hands>,
    probe: ViewProbe,
    mut bodies: Query<&mut Body>,
    grabbables: Query<Option<&AttachedTo>, With<Grabbable>>,
    mut detach: EventWriter<DetachRequest>,
    config: Res<GameConfig>,
    mut log: EventWriter<LogEvent>,
) {
    for _ in ev_grab.read() {
        if let Some(held) = hands.held {
            let dir = probe.ray().map_or(Vec3::NEG_Z, |r| *r.direction);
            if let Ok(mut body) = bodies.get_mut(held) {
                throw(&mut body, dir, config.pickup.throw_force);
            }
            hands.release();
            log.write(LogEvent("扔出手中的物体".into()));
            continue;
        }

        let Some(hit) = probe.cast(config.pickup.distance, None) else {
            continue;
        };
        let Ok(attached) = grabbables.get(hit.entity) else {
            continue;
        };
        let Ok(mut body) = bodies.get_mut(hit.entity) else {
            log.write(LogEvent("物体没有刚体，无法拿起".into()));
            continue;
        };
        if body.mass > config.pickup.max_mass {
            log.write(LogEvent(format!("物体太重（{:.1} > {:.1}）", body.mass, config.pickup.max_mass)));
            continue;
        }

        body.use_gravity = false;
        body.kinematic = false;
        hands.held = Some(hit.entity);
        if attached.is_some() {
            detach.write(DetachRequest { object: hit.entity });
        }
        info!("picked up {}", hit.entity);
        log.write(LogEvent("拿起物体".into()));
    }
}

/// E 键：拿着东西时瞄准背包开始挂载；空手时把看着的物品收进物品栏
pub fn interact(
    mut commands: Commands,
    mut ev_interact: EventReader<Interact>,
    mut hands: ResMut<Hands>,
    probe: ViewProbe,
    backpacks: Query<(), With<Backpack>>,
    items: Query<&WorldItem, Without<AttachedTo>>,
    mut inventory: ResMut<Inventory>,
    mut added: EventWriter<ItemAdded>,
    config: Res<GameConfig>,
    mut log: EventWriter<LogEvent>,
) {
    for _ in ev_interact.read() {
        if let Some(held) = hands.held {
            if hands.attach_target.is_some() {
                continue;
            }
            match probe.cast(config.pickup.distance, Some(held)) {
                Some(hit) if backpacks.contains(hit.entity) => {
                    hands.attach_target = Some(hit.entity);
                    log.write(LogEvent("放向背包…".into()));
                }
                _ => {
                    log.write(LogEvent("没有对准背包".into()));
                }
            }
            continue;
        }

        let Some(hit) = probe.cast(config.inventory.reach_distance, None) else {
            continue;
        };
        let Ok(item) = items.get(hit.entity) else {
            continue;
        };
        let outcome = store_item(&mut inventory, &item.item, item.amount, &mut added);
        if outcome.stored() == 0 {
            log.write(LogEvent("物品栏已满".into()));
            continue;
        }
        log.write(LogEvent(format!("收起 {} ×{}", item.item.name, outcome.stored())));
        commands.entity(hit.entity).despawn();
    }
}

/// 手持物体跟随视线前方的手持点
pub fn carry_held(
    time: Res<Time>,
    mut hands: ResMut<Hands>,
    probe: ViewProbe,
    mut bodies: Query<(&mut Body, &mut Transform, &GlobalTransform)>,
    config: Res<GameConfig>,
) {
    if hands.is_attaching() {
        return;
    }
    let Some(held) = hands.held else {
        return;
    };
    let Some(eye) = probe.eye() else {
        return;
    };
    let Ok((mut body, mut transform, global)) = bodies.get_mut(held) else {
        // 物体已不存在
        hands.release();
        return;
    };

    let hold_point = eye.translation() + eye.forward() * config.pickup.hold_distance;
    body.velocity = (hold_point - global.translation()) * config.pickup.carry_stiffness;
    body.angular_velocity = Vec3::ZERO;
    let t = (time.delta_secs() * 10.0).min(1.0);
    transform.rotation = transform.rotation.slerp(eye.compute_transform().rotation, t);
}

/// 朝背包移动，足够近时请求挂载
pub fn move_to_backpack(
    mut hands: ResMut<Hands>,
    mut bodies: Query<(&mut Body, &GlobalTransform)>,
    targets: Query<&GlobalTransform, With<Backpack>>,
    mut attach: EventWriter<AttachRequest>,
    config: Res<GameConfig>,
) {
    let (Some(held), Some(target)) = (hands.held, hands.attach_target) else {
        return;
    };
    let (Ok((mut body, tf)), Ok(target_tf)) = (bodies.get_mut(held), targets.get(target)) else {
        hands.release();
        return;
    };

    let to_target = target_tf.translation() - tf.translation();
    body.velocity = to_target * config.pickup.attach_speed;
    if to_target.length() < config.pickup.attach_distance {
        attach.write(AttachRequest {
            object: held,
            backpack: target,
        });
        hands.release();
    }
}

/// 挂载失败的物体沿视线扔出去
pub fn throw_rejected(
    mut ev_rejected: EventReader<AttachRejected>,
    mut bodies: Query<&mut Body>,
    probe: ViewProbe,
    config: Res<GameConfig>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in ev_rejected.read() {
        let dir = probe.ray().map_or(Vec3::NEG_Z, |r| *r.direction);
        if let Ok(mut body) = bodies.get_mut(ev.object) {
            throw(&mut body, dir, config.pickup.throw_force);
            log.write(LogEvent("物体被弹开".into()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backpack::components::AttachError;
    use crate::data::schema::ItemCategory;
    use crate::inventory::components::tests::item;
    use crate::world::{components::PlayerEye, physics::Collider};
    use bevy::ecs::system::RunSystemOnce;

    const EYE: Vec3 = Vec3::new(0.0, 1.6, 0.0);

    /// 眼睛在原点上方朝 -Z 看，正前方 2 米处放一个可拿起的物体
    fn world_with_eye(mass: f32) -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(GameConfig::default());
        world.insert_resource(Inventory::with_capacity(2));
        world.init_resource::<Hands>();
        world.init_resource::<Events<GrabOrThrow>>();
        world.init_resource::<Events<Interact>>();
        world.init_resource::<Events<DetachRequest>>();
        world.init_resource::<Events<AttachRejected>>();
        world.init_resource::<Events<ItemAdded>>();
        world.init_resource::<Events<LogEvent>>();
        world.spawn((PlayerEye, GlobalTransform::from_translation(EYE)));

        let at = EYE + Vec3::NEG_Z * 2.0;
        let object = world
            .spawn((
                Grabbable,
                Body::dynamic(mass),
                Collider { radius: 0.25 },
                Transform::from_translation(at),
                GlobalTransform::from_translation(at),
            ))
            .id();
        (world, object)
    }

    #[test]
    fn grabbing_attached_object_requests_detach() {
        let (mut world, object) = world_with_eye(0.5);
        world.entity_mut(object).insert(AttachedTo {
            backpack: Entity::from_raw(90),
            point: Entity::from_raw(91),
        });
        world.send_event(GrabOrThrow);
        world.run_system_once(grab_or_throw).unwrap();

        assert_eq!(world.resource::<Hands>().held, Some(object));
        assert!(!world.get::<Body>(object).unwrap().use_gravity);
        let events = world.resource::<Events<DetachRequest>>();
        let sent: Vec<_> = events.get_cursor().read(events).copied().collect();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].object, object);
    }

    #[test]
    fn grabbing_loose_object_sends_no_detach() {
        let (mut world, object) = world_with_eye(0.5);
        world.send_event(GrabOrThrow);
        world.run_system_once(grab_or_throw).unwrap();

        assert_eq!(world.resource::<Hands>().held, Some(object));
        assert!(world.resource::<Events<DetachRequest>>().is_empty());
    }

    #[test]
    fn heavy_object_is_refused() {
        let (mut world, object) = world_with_eye(25.0);
        world.send_event(GrabOrThrow);
        world.run_system_once(grab_or_throw).unwrap();

        assert_eq!(*world.resource::<Hands>(), Hands::default());
        assert!(world.get::<Body>(object).unwrap().use_gravity);
    }

    #[test]
    fn second_grab_throws_along_view() {
        let (mut world, object) = world_with_eye(0.5);
        world.send_event(GrabOrThrow);
        world.run_system_once(grab_or_throw).unwrap();
        world.send_event(GrabOrThrow);
        world.run_system_once(grab_or_throw).unwrap();

        assert_eq!(*world.resource::<Hands>(), Hands::default());
        let body = world.get::<Body>(object).unwrap();
        assert!(body.use_gravity);
        assert!(body.velocity.z < 0.0);
    }

    #[test]
    fn rejected_attach_throws_object_outward() {
        let (mut world, object) = world_with_eye(0.5);
        {
            let mut body = world.get_mut::<Body>(object).unwrap();
            body.use_gravity = false;
            body.kinematic = true;
        }
        world.send_event(AttachRejected {
            object,
            reason: AttachError::NoMount(ItemCategory::Weapon),
        });
        world.run_system_once(throw_rejected).unwrap();

        let body = world.get::<Body>(object).unwrap();
        assert!(body.use_gravity);
        assert!(!body.kinematic);
        assert!(body.velocity.z < 0.0);
        assert!(body.velocity.x.abs() < 1e-5);
    }

    #[test]
    fn collect_stores_and_despawns() {
        let (mut world, object) = world_with_eye(0.4);
        world.entity_mut(object).insert(WorldItem {
            item: item("apple", 5),
            amount: 2,
        });
        world.send_event(Interact);
        world.run_system_once(interact).unwrap();

        assert_eq!(world.resource::<Inventory>().total_of("apple"), 2);
        assert!(world.get::<WorldItem>(object).is_none());
    }

    #[test]
    fn collect_with_full_inventory_keeps_object() {
        let (mut world, object) = world_with_eye(0.4);
        world.insert_resource(Inventory::with_capacity(1));
        world.resource_mut::<Inventory>().add_item(&item("apple", 5), 5);
        world.entity_mut(object).insert(WorldItem {
            item: item("apple", 5),
            amount: 2,
        });
        world.send_event(Interact);
        world.run_system_once(interact).unwrap();

        assert_eq!(world.resource::<Inventory>().total_of("apple"), 5);
        assert_eq!(world.get::<WorldItem>(object).unwrap().amount, 2);
        assert!(world.resource::<Events<ItemAdded>>().is_empty());
    }

    fn world_with_backpack(object_at: Vec3) -> (World, Entity, Entity) {
        let mut world = World::new();
        world.insert_resource(GameConfig::default());
        world.init_resource::<Events<AttachRequest>>();
        let backpack = world
            .spawn((Backpack::default(), GlobalTransform::from_translation(Vec3::new(0.0, 0.5, -2.0))))
            .id();
        let object = world
            .spawn((
                Body::dynamic(0.5),
                Transform::from_translation(object_at),
                GlobalTransform::from_translation(object_at),
            ))
            .id();
        world.insert_resource(Hands {
            held: Some(object),
            attach_target: Some(backpack),
        });
        (world, backpack, object)
    }

    #[test]
    fn far_object_is_pulled_toward_backpack() {
        let (mut world, _, object) = world_with_backpack(Vec3::new(0.0, 1.5, -0.5));
        world.run_system_once(move_to_backpack).unwrap();

        let velocity = world.get::<Body>(object).unwrap().velocity;
        assert!(velocity.z < 0.0);
        assert!(world.resource::<Events<AttachRequest>>().is_empty());
        assert!(world.resource::<Hands>().is_attaching());
    }

    #[test]
    fn close_object_requests_attach_and_leaves_hands() {
        let (mut world, backpack, object) = world_with_backpack(Vec3::new(0.0, 0.6, -1.7));
        world.run_system_once(move_to_backpack).unwrap();

        let events = world.resource::<Events<AttachRequest>>();
        let sent: Vec<_> = events.get_cursor().read(events).copied().collect();
        assert_eq!(sent.len(), 1);
        assert_eq!((sent[0].object, sent[0].backpack), (object, backpack));
        assert_eq!(*world.resource::<Hands>(), Hands::default());
    }

    #[test]
    fn vanished_object_clears_hands() {
        let (mut world, _, object) = world_with_backpack(Vec3::ZERO);
        world.despawn(object);
        world.run_system_once(move_to_backpack).unwrap();
        assert_eq!(*world.resource::<Hands>(), Hands::default());
    }
}
