//! Fixed-size stacking inventory.

use terracube_core::types::BlockId;

use crate::drops::ItemSink;

/// Number of inventory slots.
pub const SLOT_COUNT: usize = 36;

/// Maximum stack size per slot.
pub const STACK_LIMIT: u32 = 64;

/// A stack of identical blocks in one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStack {
    pub block: BlockId,
    pub count: u32,
}

/// Player inventory: a fixed array of optional stacks plus a selected
/// slot used for placement.
#[derive(Debug, Clone)]
pub struct Inventory {
    slots: [Option<ItemStack>; SLOT_COUNT],
    selected: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    /// Create an empty inventory with the first slot selected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: [None; SLOT_COUNT],
            selected: 0,
        }
    }

    /// Add items, topping up matching stacks before opening new slots.
    ///
    /// Returns true only if everything fit. On overflow the inventory
    /// keeps whatever it could absorb and the remainder is reported as
    /// rejected.
    pub fn try_add(&mut self, block: BlockId, count: u32) -> bool {
        let mut remaining = count;

        for slot in &mut self.slots {
            if remaining == 0 {
                return true;
            }
            if let Some(stack) = slot {
                if stack.block == block && stack.count < STACK_LIMIT {
                    let space = STACK_LIMIT - stack.count;
                    let moved = remaining.min(space);
                    stack.count += moved;
                    remaining -= moved;
                }
            }
        }

        for slot in &mut self.slots {
            if remaining == 0 {
                return true;
            }
            if slot.is_none() {
                let moved = remaining.min(STACK_LIMIT);
                *slot = Some(ItemStack {
                    block,
                    count: moved,
                });
                remaining -= moved;
            }
        }

        remaining == 0
    }

    /// Take one item from the selected slot, clearing it when it empties.
    pub fn consume_selected(&mut self) -> Option<BlockId> {
        let slot = &mut self.slots[self.selected];
        let stack = slot.as_mut()?;
        let block = stack.block;
        stack.count -= 1;
        if stack.count == 0 {
            *slot = None;
        }
        Some(block)
    }

    /// Change the selected slot. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < SLOT_COUNT {
            self.selected = index;
        }
    }

    /// Index of the selected slot.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Stack in the selected slot, if any.
    #[must_use]
    pub fn selected_item(&self) -> Option<ItemStack> {
        self.slots[self.selected]
    }

    /// Stack in an arbitrary slot.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<ItemStack> {
        self.slots.get(index).copied().flatten()
    }

    /// Total item count across all slots.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.slots.iter().flatten().map(|stack| stack.count).sum()
    }

    /// True if no slot holds anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

impl ItemSink for Inventory {
    fn try_add(&mut self, block: BlockId, count: u32) -> bool {
        Self::try_add(self, block, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_stack_in_one_slot() {
        let mut inv = Inventory::new();
        assert!(inv.try_add(BlockId::DIRT, 10));
        assert!(inv.try_add(BlockId::DIRT, 10));

        assert_eq!(
            inv.slot(0),
            Some(ItemStack {
                block: BlockId::DIRT,
                count: 20
            })
        );
        assert_eq!(inv.slot(1), None);
    }

    #[test]
    fn full_stack_spills_to_next_slot() {
        let mut inv = Inventory::new();
        assert!(inv.try_add(BlockId::STONE, STACK_LIMIT + 5));

        assert_eq!(inv.slot(0).map(|s| s.count), Some(STACK_LIMIT));
        assert_eq!(inv.slot(1).map(|s| s.count), Some(5));
    }

    #[test]
    fn different_blocks_use_different_slots() {
        let mut inv = Inventory::new();
        assert!(inv.try_add(BlockId::DIRT, 1));
        assert!(inv.try_add(BlockId::STONE, 1));

        assert_eq!(inv.slot(0).map(|s| s.block), Some(BlockId::DIRT));
        assert_eq!(inv.slot(1).map(|s| s.block), Some(BlockId::STONE));
    }

    #[test]
    fn overflow_keeps_partial_and_reports_rejection() {
        let mut inv = Inventory::new();
        // Fill every slot to the brim.
        for _ in 0..SLOT_COUNT {
            assert!(inv.try_add(BlockId::STONE, STACK_LIMIT));
        }

        assert!(!inv.try_add(BlockId::STONE, 1));
        assert_eq!(inv.total(), SLOT_COUNT as u32 * STACK_LIMIT);

        // Partially full last slot: 3 of 5 fit, the add still fails.
        let mut inv = Inventory::new();
        for _ in 0..SLOT_COUNT - 1 {
            assert!(inv.try_add(BlockId::STONE, STACK_LIMIT));
        }
        assert!(inv.try_add(BlockId::STONE, STACK_LIMIT - 3));
        assert!(!inv.try_add(BlockId::STONE, 5));
        assert_eq!(inv.total(), SLOT_COUNT as u32 * STACK_LIMIT);
    }

    #[test]
    fn consume_selected_empties_the_slot() {
        let mut inv = Inventory::new();
        assert!(inv.try_add(BlockId::WOOD, 2));

        assert_eq!(inv.consume_selected(), Some(BlockId::WOOD));
        assert_eq!(inv.consume_selected(), Some(BlockId::WOOD));
        assert_eq!(inv.consume_selected(), None);
        assert!(inv.is_empty());
    }

    #[test]
    fn selection_switches_slots() {
        let mut inv = Inventory::new();
        assert!(inv.try_add(BlockId::DIRT, 1));
        assert!(inv.try_add(BlockId::STONE, 1));

        inv.select(1);
        assert_eq!(inv.selected_item().map(|s| s.block), Some(BlockId::STONE));

        // Out-of-range selection is ignored.
        inv.select(SLOT_COUNT);
        assert_eq!(inv.selected_index(), 1);
    }
}
