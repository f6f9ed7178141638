use super::{components::*, events::*};
use crate::core::events::LogEvent;
use crate::inventory::{
    components::Inventory,
    events::{ItemAdded, ItemRemoved},
    store_item, withdraw_item,
};
use crate::world::{components::WorldItem, physics::Body};
use bevy::prelude::*;

/// 挂上背包：找到大类对应的挂点 → 重设父节点 → 记入物品栏
pub fn handle_attach(
    mut commands: Commands,
    mut ev_attach: EventReader<AttachRequest>,
    mut backpacks: Query<&mut Backpack>,
    mut objects: Query<(Option<&mut WorldItem>, &mut Body)>,
    mut inventory: ResMut<Inventory>,
    mut added: EventWriter<ItemAdded>,
    mut rejected: EventWriter<AttachRejected>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in ev_attach.read() {
        let result = attach_one(
            &mut commands,
            ev,
            &mut backpacks,
            &mut objects,
            &mut inventory,
            &mut added,
        );
        match result {
            Ok(name) => {
                info!("attached {} to backpack", ev.object);
                log.write(LogEvent(format!("{name} 挂到了背包上")));
            }
            Err(reason) => {
                warn!("attach of {} rejected: {reason}", ev.object);
                log.write(LogEvent(format!("无法挂到背包: {reason}")));
                rejected.write(AttachRejected {
                    object: ev.object,
                    reason,
                });
            }
        }
    }
}

fn attach_one(
    commands: &mut Commands,
    ev: &AttachRequest,
    backpacks: &mut Query<&mut Backpack>,
    objects: &mut Query<(Option<&mut WorldItem>, &mut Body)>,
    inventory: &mut Inventory,
    added: &mut EventWriter<ItemAdded>,
) -> Result<String, AttachError> {
    let mut backpack = backpacks
        .get_mut(ev.backpack)
        .map_err(|_| AttachError::NoBackpack(ev.backpack))?;
    let (item, mut body) = objects
        .get_mut(ev.object)
        .map_err(|_| AttachError::NotAnItem(ev.object))?;
    let mut item = item.ok_or(AttachError::NotAnItem(ev.object))?;
    let point = backpack.claim(item.item.category, ev.object)?;

    // 物品栏放不下就不挂
    let stored = store_item(inventory, &item.item, item.amount, added).stored();
    if stored == 0 {
        backpack.release(ev.object);
        return Err(AttachError::InventoryFull(item.item.id.clone()));
    }
    // 溢出的部分已丢弃，挂上的物体只代表实际放入的数量
    item.amount = stored;

    commands.entity(ev.object).insert((
        ChildOf(point),
        Transform::IDENTITY,
        AttachedTo {
            backpack: ev.backpack,
            point,
        },
    ));
    body.kinematic = true;
    body.velocity = Vec3::ZERO;
    body.angular_velocity = Vec3::ZERO;
    Ok(item.item.name.clone())
}

/// 从背包取下：释放挂点，移出物品栏，回到世界坐标
pub fn handle_detach(
    mut commands: Commands,
    mut ev_detach: EventReader<DetachRequest>,
    mut backpacks: Query<&mut Backpack>,
    attached: Query<(&AttachedTo, &GlobalTransform, Option<&WorldItem>)>,
    mut inventory: ResMut<Inventory>,
    mut removed: EventWriter<ItemRemoved>,
) {
    for ev in ev_detach.read() {
        let Ok((link, global, item)) = attached.get(ev.object) else {
            continue;
        };
        if let Ok(mut backpack) = backpacks.get_mut(link.backpack) {
            backpack.release(ev.object);
        }
        commands
            .entity(ev.object)
            .remove::<(ChildOf, AttachedTo)>()
            .insert(global.compute_transform());
        if let Some(item) = item {
            withdraw_item(&mut inventory, &item.item.name, &mut removed);
        }
        info!("detached {} from mount {}", ev.object, link.point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::{ItemCategory, ItemDefinition};
    use bevy::ecs::system::RunSystemOnce;

    fn apple() -> ItemDefinition {
        ItemDefinition {
            id: "apple".into(),
            name: "Apple".into(),
            weight: 0.2,
            category: ItemCategory::Food,
            max_stack: 5,
            prefab: "apple".into(),
            icon: "icons/apple.png".into(),
        }
    }

    fn setup() -> (World, Entity, Entity) {
        let mut world = World::new();
        world.insert_resource(Inventory::with_capacity(4));
        world.init_resource::<Events<AttachRequest>>();
        world.init_resource::<Events<DetachRequest>>();
        world.init_resource::<Events<AttachRejected>>();
        world.init_resource::<Events<ItemAdded>>();
        world.init_resource::<Events<ItemRemoved>>();
        world.init_resource::<Events<LogEvent>>();

        let point = world.spawn(Transform::default()).id();
        let backpack = world
            .spawn(Backpack {
                mounts: vec![Mount {
                    category: ItemCategory::Food,
                    point,
                    occupant: None,
                }],
            })
            .id();
        let object = world
            .spawn((
                WorldItem { item: apple(), amount: 2 },
                Body::dynamic(0.4),
                Transform::from_xyz(0.0, 1.0, -1.0),
            ))
            .id();
        (world, backpack, object)
    }

    #[test]
    fn attach_mounts_object_and_stores_item() {
        let (mut world, backpack, object) = setup();
        world.send_event(AttachRequest { object, backpack });
        world.run_system_once(handle_attach).unwrap();

        assert!(world.get::<AttachedTo>(object).is_some());
        assert!(world.get::<Body>(object).unwrap().kinematic);
        assert_eq!(world.resource::<Inventory>().total_of("apple"), 2);
        let bp = world.get::<Backpack>(backpack).unwrap();
        assert_eq!(bp.mounts[0].occupant, Some(object));
        assert!(world.resource::<Events<AttachRejected>>().is_empty());
    }

    #[test]
    fn wrong_category_is_rejected_not_dropped() {
        let (mut world, backpack, object) = setup();
        world.get_mut::<WorldItem>(object).unwrap().item.category = ItemCategory::Weapon;
        world.send_event(AttachRequest { object, backpack });
        world.run_system_once(handle_attach).unwrap();

        assert!(world.get::<AttachedTo>(object).is_none());
        assert_eq!(world.resource::<Inventory>().empty_slots(), 4);
        let events = world.resource::<Events<AttachRejected>>();
        let rejected: Vec<_> = events.get_cursor().read(events).cloned().collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].reason, AttachError::NoMount(ItemCategory::Weapon));
    }

    #[test]
    fn full_inventory_rejects_attach_and_keeps_existing_stack() {
        let (mut world, backpack, object) = setup();
        world.insert_resource(Inventory::with_capacity(1));
        world.resource_mut::<Inventory>().add_item(&apple(), 5);
        world.send_event(AttachRequest { object, backpack });
        world.run_system_once(handle_attach).unwrap();

        assert!(world.get::<AttachedTo>(object).is_none());
        assert!(world.get::<ChildOf>(object).is_none());
        assert!(!world.get::<Body>(object).unwrap().kinematic);
        assert_eq!(world.get::<Backpack>(backpack).unwrap().mounts[0].occupant, None);
        assert_eq!(world.resource::<Inventory>().total_of("apple"), 5);
        assert!(world.resource::<Events<ItemAdded>>().is_empty());

        let events = world.resource::<Events<AttachRejected>>();
        let rejected: Vec<_> = events.get_cursor().read(events).cloned().collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].reason, AttachError::InventoryFull("apple".into()));
    }

    #[test]
    fn partial_store_attaches_only_what_fit() {
        let (mut world, backpack, object) = setup();
        world.insert_resource(Inventory::with_capacity(1));
        world.resource_mut::<Inventory>().add_item(&apple(), 4);
        world.send_event(AttachRequest { object, backpack });
        world.run_system_once(handle_attach).unwrap();

        assert!(world.get::<AttachedTo>(object).is_some());
        assert_eq!(world.get::<WorldItem>(object).unwrap().amount, 1);
        assert_eq!(world.resource::<Inventory>().total_of("apple"), 5);
    }

    #[test]
    fn detach_frees_mount_and_removes_item() {
        let (mut world, backpack, object) = setup();
        world.send_event(AttachRequest { object, backpack });
        world.run_system_once(handle_attach).unwrap();
        world.send_event(DetachRequest { object });
        world.run_system_once(handle_detach).unwrap();

        assert!(world.get::<AttachedTo>(object).is_none());
        assert!(world.get::<ChildOf>(object).is_none());
        assert_eq!(world.resource::<Inventory>().total_of("apple"), 0);
        assert_eq!(world.get::<Backpack>(backpack).unwrap().mounts[0].occupant, None);
    }
}
