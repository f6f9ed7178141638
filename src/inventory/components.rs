use bevy::prelude::*;
use crate::data::schema::ItemDefinition;

/// 运行时物品实例
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    pub item: ItemDefinition, // 直接复制静态表条目即可
    pub count: u32,
}

/// 单个背包格。空 / 非空只由 stack 决定，不再单独存标记位
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventorySlot {
    stack: Option<ItemStack>,
}

impl InventorySlot {
    pub fn is_empty(&self) -> bool {
        self.stack.is_none()
    }

    pub fn item(&self) -> Option<&ItemDefinition> {
        self.stack.as_ref().map(|s| &s.item)
    }

    pub fn stack(&self) -> Option<&ItemStack> {
        self.stack.as_ref()
    }

    /// 空格返回 0
    pub fn count(&self) -> u32 {
        self.stack.as_ref().map_or(0, |s| s.count)
    }

    /// 还能放入多少个同类物品；空格返回 0
    pub fn spare(&self) -> u32 {
        self.stack
            .as_ref()
            .map_or(0, |s| s.item.max_stack.saturating_sub(s.count))
    }

    pub fn holds(&self, item: &ItemDefinition) -> bool {
        self.item().is_some_and(|i| i.same_kind(item))
    }

    /// 放入新堆叠，数量按上限截断，返回实际放入数量
    pub(crate) fn fill(&mut self, item: &ItemDefinition, count: u32) -> u32 {
        let count = count.min(item.max_stack);
        self.stack = (count > 0).then(|| ItemStack {
            item: item.clone(),
            count,
        });
        count
    }

    pub(crate) fn clear(&mut self) -> Option<ItemStack> {
        self.stack.take()
    }

    /// 取走 n 个（不超过现有数量），取空时清空格子
    pub(crate) fn take(&mut self, n: u32) -> Option<ItemStack> {
        let stack = self.stack.as_mut()?;
        let n = n.min(stack.count);
        if n == 0 {
            return None;
        }
        if n == stack.count {
            return self.stack.take();
        }
        stack.count -= n;
        Some(ItemStack {
            item: stack.item.clone(),
            count: n,
        })
    }

    /// 在现有堆叠上追加，按上限截断，返回实际追加数量
    pub(crate) fn top_up(&mut self, n: u32) -> u32 {
        let moved = n.min(self.spare());
        if let Some(stack) = self.stack.as_mut() {
            stack.count += moved;
        }
        moved
    }
}

/// 格子的显示状态：图标 + 数量文字
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotVisual {
    pub icon: Option<String>,
    /// 数量大于 1 才显示
    pub label: String,
}

impl SlotVisual {
    pub fn of(slot: &InventorySlot) -> Self {
        match slot.stack() {
            None => Self::default(),
            Some(stack) => Self {
                icon: Some(stack.item.icon.clone()),
                label: if stack.count > 1 { stack.count.to_string() } else { String::new() },
            },
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct SlotVisuals {
    pub slots: Vec<SlotVisual>,
}

/// add_item 的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// (格子索引, 放入数量)
    pub placed: Vec<(usize, u32)>,
    /// 没有空位而被丢弃的数量
    pub overflow: u32,
}

impl AddOutcome {
    pub fn stored(&self) -> u32 {
        self.placed.iter().map(|(_, n)| n).sum()
    }
}

/// 玩家物品栏（挂在 Resource），固定容量
#[derive(Resource, Debug, Clone)]
pub struct Inventory {
    pub(crate) slots: Vec<InventorySlot>,
}

impl Inventory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![InventorySlot::default(); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&InventorySlot> {
        self.slots.get(index)
    }

    /// 某个物品在所有格子里的总数
    pub fn total_of(&self, item_id: &str) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.item().is_some_and(|i| i.id == item_id))
            .map(InventorySlot::count)
            .sum()
    }

    pub fn empty_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_empty()).count()
    }

    /// 先补满已有同类堆叠，剩余放进第一个空格。
    /// 只用一个空格：超出部分记入 overflow 并被丢弃。
    pub fn add_item(&mut self, item: &ItemDefinition, amount: u32) -> AddOutcome {
        let mut outcome = AddOutcome::default();
        let mut remaining = amount;
        if remaining == 0 {
            return outcome;
        }

        if let Some((idx, slot)) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, s)| s.holds(item) && s.spare() > 0)
        {
            let moved = slot.top_up(remaining);
            remaining -= moved;
            outcome.placed.push((idx, moved));
        }

        if remaining > 0 {
            if let Some((idx, slot)) = self.slots.iter_mut().enumerate().find(|(_, s)| s.is_empty()) {
                let moved = slot.fill(item, remaining);
                remaining -= moved;
                outcome.placed.push((idx, moved));
            }
        }

        outcome.overflow = remaining;
        outcome
    }

    /// 按名称（忽略大小写）清空第一个匹配的格子（整格移除）
    pub fn remove_item(&mut self, item_name: &str) -> Option<(usize, ItemStack)> {
        let (idx, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, s)| s.item().is_some_and(|i| i.name.eq_ignore_ascii_case(item_name)))?;
        slot.clear().map(|stack| (idx, stack))
    }
}
