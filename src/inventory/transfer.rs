//! 拖拽松手后的格子结算：拆分 / 合并 / 交换 / 丢到世界

use thiserror::Error;

use super::components::{Inventory, InventorySlot, ItemStack};

/// 松手时按住的修饰键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitRequest {
    /// 无修饰键：整堆
    #[default]
    Whole,
    /// Shift：一半（向上取整）
    Half,
    /// Ctrl：一个
    Single,
}

impl SplitRequest {
    pub fn amount_of(self, count: u32) -> u32 {
        match self {
            SplitRequest::Whole => count,
            SplitRequest::Half => count.div_ceil(2),
            SplitRequest::Single => count.min(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseTarget {
    /// 松开在背景上
    World,
    Slot(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotTransfer {
    /// 放回原格
    Unchanged,
    /// 从格子里拿出、需要在世界中生成的物品
    Dropped(ItemStack),
    Split { target: usize, amount: u32 },
    Merged { target: usize, moved: u32 },
    Swapped { target: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("slot {0} is out of range")]
    OutOfRange(usize),
    #[error("slot {0} is empty")]
    EmptySource(usize),
}

impl Inventory {
    /// 结算一次拖拽：source 为拖起的格子，target 为松手位置
    pub fn release(
        &mut self,
        source: usize,
        target: ReleaseTarget,
        split: SplitRequest,
    ) -> Result<SlotTransfer, TransferError> {
        let src = self.slot(source).ok_or(TransferError::OutOfRange(source))?;
        if src.is_empty() {
            return Err(TransferError::EmptySource(source));
        }

        match target {
            ReleaseTarget::World => Ok(self.drop_to_world(source, split)),
            ReleaseTarget::Slot(t) if t == source => Ok(SlotTransfer::Unchanged),
            ReleaseTarget::Slot(t) => {
                if self.slot(t).is_none() {
                    return Err(TransferError::OutOfRange(t));
                }
                let (from, to) = pair_mut(&mut self.slots, source, t);
                Ok(exchange(from, to, t, split))
            }
        }
    }

    fn drop_to_world(&mut self, source: usize, split: SplitRequest) -> SlotTransfer {
        let slot = &mut self.slots[source];
        let amount = if can_split(slot) {
            split.amount_of(slot.count())
        } else {
            slot.count()
        };
        match slot.take(amount) {
            Some(stack) => SlotTransfer::Dropped(stack),
            None => SlotTransfer::Unchanged,
        }
    }
}

/// 只有可堆叠且数量大于 1 时修饰键才生效
fn can_split(slot: &InventorySlot) -> bool {
    slot.item().is_some_and(|i| i.is_stackable()) && slot.count() > 1
}

fn pair_mut(slots: &mut [InventorySlot], a: usize, b: usize) -> (&mut InventorySlot, &mut InventorySlot) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = slots.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = slots.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

fn exchange(from: &mut InventorySlot, to: &mut InventorySlot, target: usize, split: SplitRequest) -> SlotTransfer {
    if to.is_empty() && split != SplitRequest::Whole && can_split(from) {
        let amount = split.amount_of(from.count());
        if let Some(stack) = from.take(amount) {
            to.fill(&stack.item, stack.count);
            return SlotTransfer::Split { target, amount };
        }
    }

    let same_kind = match (from.item(), to.item()) {
        (Some(a), Some(b)) => a.same_kind(b),
        _ => false,
    };
    if same_kind {
        let moved = merge(from, to, split);
        return SlotTransfer::Merged { target, moved };
    }

    std::mem::swap(from, to);
    SlotTransfer::Swapped { target }
}

/// 合并到同类堆叠，目标永远不超过上限；返回移动数量
fn merge(from: &mut InventorySlot, to: &mut InventorySlot, split: SplitRequest) -> u32 {
    let want = match split {
        SplitRequest::Half | SplitRequest::Single if from.count() > 1 => split.amount_of(from.count()),
        _ => from.count(),
    };
    let moved = want.min(to.spare());
    if moved > 0 {
        from.take(moved);
        to.top_up(moved);
    }
    moved
}
