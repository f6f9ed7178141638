use bevy::prelude::*;

use super::{components::*, events::*, physics::*};
use crate::backpack::components::{Backpack, Mount};
use crate::core::{config::GameConfig, events::LogEvent};
use crate::data::{ItemCatalog, schema::{ItemCategory, ItemDefinition}};
use crate::ui::state::InventoryScreen;

const ITEM_RADIUS: f32 = 0.25;
const BACKPACK_RADIUS: f32 = 0.5;

/// 生成一个世界物品实体（对应原先的预制体）
pub fn spawn_world_item(commands: &mut Commands, item: &ItemDefinition, amount: u32, at: Transform) -> Entity {
    commands
        .spawn((
            Name::new(item.prefab.clone()),
            WorldItem {
                item: item.clone(),
                amount,
            },
            Grabbable,
            Body::dynamic(item.weight * amount as f32),
            Collider { radius: ITEM_RADIUS },
            at,
        ))
        .id()
}

/// 丢出位置：脚下 + 1 米高 + 正前方 1 米
pub fn drop_origin(eye: &Transform) -> Vec3 {
    let feet = eye.translation - Vec3::Y * EYE_HEIGHT;
    feet + Vec3::Y + flat_forward(eye)
}

fn flat_forward(eye: &Transform) -> Vec3 {
    let f = eye.forward().as_vec3();
    Vec3::new(f.x, 0.0, f.z).normalize_or(Vec3::NEG_Z)
}

/// 进入游戏时摆好场景：玩家、背包、几件物品
pub fn spawn_scene(mut commands: Commands, catalog: Res<ItemCatalog>) {
    commands.spawn((
        Name::new("player"),
        Player,
        PlayerEye,
        Transform::from_xyz(0.0, EYE_HEIGHT, 0.0),
    ));

    let mut mount = |category: ItemCategory, offset: Vec3| Mount {
        category,
        point: commands
            .spawn((Name::new(format!("mount_{category:?}").to_lowercase()), Transform::from_translation(offset)))
            .id(),
        occupant: None,
    };
    let mounts = vec![
        mount(ItemCategory::Food, Vec3::new(-0.3, 0.2, 0.0)),
        mount(ItemCategory::Weapon, Vec3::new(0.3, 0.2, 0.0)),
        mount(ItemCategory::Common, Vec3::new(0.0, -0.2, 0.3)),
    ];
    let points: Vec<Entity> = mounts.iter().map(|m| m.point).collect();
    commands
        .spawn((
            Name::new("backpack"),
            Backpack { mounts },
            Collider { radius: BACKPACK_RADIUS },
            Transform::from_xyz(0.0, BACKPACK_RADIUS, -2.0),
        ))
        .add_children(&points);

    let layout = [
        ("apple", 3, Vec3::new(1.0, ITEM_RADIUS, -1.5)),
        ("flashlight", 1, Vec3::new(-1.0, ITEM_RADIUS, -1.5)),
        ("rope", 2, Vec3::new(1.5, ITEM_RADIUS, -0.5)),
        ("anvil", 1, Vec3::new(-1.5, ITEM_RADIUS, -0.5)),
    ];
    for (id, amount, pos) in layout {
        match catalog.find(id) {
            Some(item) => {
                spawn_world_item(&mut commands, item, amount, Transform::from_translation(pos));
            }
            None => warn!("scene item {id} missing from catalog"),
        }
    }
    info!("scene ready");
}

pub fn spawn_dropped_items(
    mut commands: Commands,
    mut ev_spawn: EventReader<SpawnWorldItem>,
    player: Query<&Transform, With<Player>>,
    config: Res<GameConfig>,
) {
    let Ok(eye) = player.single() else {
        if !ev_spawn.is_empty() {
            error!("no player to drop items from");
            ev_spawn.clear();
        }
        return;
    };
    for ev in ev_spawn.read() {
        let at = Transform::from_translation(drop_origin(eye));
        let mut body = Body::dynamic(ev.stack.item.weight * ev.stack.count as f32);
        body.apply_impulse(flat_forward(eye) * config.drop.impulse);
        let entity = spawn_world_item(&mut commands, &ev.stack.item, ev.stack.count, at);
        // 覆盖默认的静止刚体
        commands.entity(entity).insert(body);
        info!("dropped {} ×{} as {entity}", ev.stack.item.id, ev.stack.count);
    }
}

/// 代替鼠标视角：把玩家视线对准具名物体
pub fn look_at_named(
    mut ev_look: EventReader<LookAtEvent>,
    mut player: Query<&mut Transform, With<Player>>,
    named: Query<(&Name, &GlobalTransform), Without<Player>>,
    screen: Res<InventoryScreen>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in ev_look.read() {
        if screen.camera_frozen {
            log.write(LogEvent("视角已锁定（物品栏打开中）".into()));
            continue;
        }
        let Some((_, target)) = named.iter().find(|(n, _)| n.as_str().eq_ignore_ascii_case(&ev.target)) else {
            log.write(LogEvent(format!("找不到物体 {}", ev.target)));
            continue;
        };
        let Ok(mut eye) = player.single_mut() else {
            continue;
        };
        let target = target.translation();
        if target.distance_squared(eye.translation) > f32::EPSILON {
            eye.look_at(target, Vec3::Y);
            log.write(LogEvent(format!("看向 {}", ev.target)));
        }
    }
}

pub fn list_world(
    mut ev_list: EventReader<ListWorldEvent>,
    items: Query<(Entity, &Name, &GlobalTransform, &WorldItem)>,
    mut log: EventWriter<LogEvent>,
) {
    if ev_list.is_empty() {
        return;
    }
    ev_list.clear();
    for (entity, name, tf, item) in &items {
        let p = tf.translation();
        log.write(LogEvent(format!(
            "{entity} {name} ×{} @ ({:.2}, {:.2}, {:.2})",
            item.amount, p.x, p.y, p.z
        )));
    }
}
