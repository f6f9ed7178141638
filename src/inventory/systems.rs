use super::{components::*, events::*, transfer::SlotTransfer};
use crate::core::events::LogEvent;
use crate::data::{ItemCatalog, schema::ItemDefinition};
use crate::world::events::SpawnWorldItem;
use bevy::prelude::*;

/// 放入物品栏并通知订阅者。其它模块（拾取 / 背包）也走这里
pub fn store_item(
    inventory: &mut Inventory,
    item: &ItemDefinition,
    amount: u32,
    added: &mut EventWriter<ItemAdded>,
) -> AddOutcome {
    let outcome = inventory.add_item(item, amount);
    let stored = outcome.stored();
    if stored > 0 {
        info!("stored {} ×{} in {:?}", item.id, stored, outcome.placed);
        added.write(ItemAdded {
            item_id: item.id.clone(),
            count: stored,
        });
    }
    if outcome.overflow > 0 {
        // 只占用一个空格，多出来的直接丢失
        warn!("no free slot for {} ×{}, dropped", item.id, outcome.overflow);
    }
    outcome
}

/// 按名称整格移除并通知订阅者
pub fn withdraw_item(
    inventory: &mut Inventory,
    item_name: &str,
    removed: &mut EventWriter<ItemRemoved>,
) -> Option<ItemStack> {
    match inventory.remove_item(item_name) {
        Some((idx, stack)) => {
            info!("removed {} ×{} from slot {idx}", stack.item.id, stack.count);
            removed.write(ItemRemoved {
                item_id: stack.item.id.clone(),
                count: stack.count,
            });
            Some(stack)
        }
        None => {
            warn!("item {item_name} not found in inventory");
            None
        }
    }
}

/// 处理 give：按物品 id / 名称放入物品栏
pub fn give_item(
    mut ev_give: EventReader<GiveItemEvent>,
    mut inventory: ResMut<Inventory>,
    mut added: EventWriter<ItemAdded>,
    mut log: EventWriter<LogEvent>,
    catalog: Res<ItemCatalog>,
) {
    for ev in ev_give.read() {
        let Some(item) = catalog.find(&ev.id) else {
            log.write(LogEvent(format!("不存在物品 ID {}", ev.id)));
            continue;
        };
        let outcome = store_item(&mut inventory, item, ev.count, &mut added);
        if outcome.stored() > 0 {
            log.write(LogEvent(format!("获得 {} ×{}", item.name, outcome.stored())));
        }
        if outcome.overflow > 0 {
            log.write(LogEvent(format!("物品栏已满，丢失 {} ×{}", item.name, outcome.overflow)));
        }
    }
}

pub fn take_item(
    mut ev_take: EventReader<TakeItemEvent>,
    mut inventory: ResMut<Inventory>,
    mut removed: EventWriter<ItemRemoved>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in ev_take.read() {
        match withdraw_item(&mut inventory, &ev.name, &mut removed) {
            Some(stack) => log.write(LogEvent(format!("移除 {} ×{}", stack.item.name, stack.count))),
            None => log.write(LogEvent(format!("物品栏里没有 {}", ev.name))),
        };
    }
}

/// 拖拽松手结算；丢到世界的部分交给 world 生成
pub fn resolve_slot_release(
    mut ev_release: EventReader<SlotReleased>,
    mut inventory: ResMut<Inventory>,
    mut spawn: EventWriter<SpawnWorldItem>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in ev_release.read() {
        match inventory.release(ev.source, ev.target, ev.split) {
            Ok(SlotTransfer::Unchanged) => {}
            Ok(SlotTransfer::Dropped(stack)) => {
                log.write(LogEvent(format!("丢出 {} ×{}", stack.item.name, stack.count)));
                spawn.write(SpawnWorldItem { stack });
            }
            Ok(SlotTransfer::Split { target, amount }) => {
                log.write(LogEvent(format!("拆分 {amount} 个到 [{target}]")));
            }
            Ok(SlotTransfer::Merged { target, moved }) => {
                log.write(LogEvent(format!("合并 {moved} 个到 [{target}]")));
            }
            Ok(SlotTransfer::Swapped { target }) => {
                log.write(LogEvent(format!("[{}] ⇄ [{target}]", ev.source)));
            }
            Err(err) => {
                warn!("slot release rejected: {err}");
                log.write(LogEvent(format!("无法移动: {err}")));
            }
        }
    }
}

/// 物品栏一有变化就重建所有格子的显示
pub fn refresh_slot_visuals(inventory: Res<Inventory>, mut visuals: ResMut<SlotVisuals>) {
    visuals.slots = inventory.slots().iter().map(SlotVisual::of).collect();
}

/// 打印物品栏内容
pub fn print_inventory(
    mut ev_list: EventReader<ListInventoryEvent>,
    inventory: Res<Inventory>,
    visuals: Res<SlotVisuals>,
    mut log: EventWriter<LogEvent>,
) {
    if ev_list.is_empty() {
        return;
    }
    ev_list.clear();

    let mut empty = true;
    for (idx, (slot, visual)) in inventory.slots().iter().zip(&visuals.slots).enumerate() {
        if let Some(stack) = slot.stack() {
            empty = false;
            log.write(LogEvent(format!(
                "[{idx}] {} ×{} (id={}, icon={}, label='{}')",
                stack.item.name,
                stack.count,
                stack.item.id,
                visual.icon.as_deref().unwrap_or("-"),
                visual.label
            )));
        }
    }

    if empty {
        log.write(LogEvent("  (empty)".into()));
    }
}
